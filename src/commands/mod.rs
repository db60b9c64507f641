//! Command handlers for the playdeck binary

pub mod config;
pub mod lesson;
pub mod play;
