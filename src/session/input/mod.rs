//! Input decoding
//!
//! Turns raw keyboard and pointer traffic into session commands. The
//! keyboard side owns the global-shortcut table and the focus shield; the
//! pointer side owns control-surface interactions and the visibility
//! side effects that come with them.

pub mod keyboard;
pub mod pointer;

pub use keyboard::{map_global_key, route_global_key, KeyRouting};
pub use pointer::{handle_pointer_event, PointerEvent};
