//! Focus exclusion
//!
//! Global playback shortcuts must never fire while the user is typing
//! somewhere. The policy here answers exactly one question - "is the
//! current focus shielded from global keys?" - and the keyboard router asks
//! it before any key mapping happens, so a shielded space bar inserts a
//! space instead of toggling playback.
//!
//! Shielding is a registry of named rules over the focus path (the focused
//! region plus its enclosing regions, innermost first). New text-accepting
//! surfaces get a rule here instead of a special case in the router.

/// A UI region that can appear on the focus path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// The playback surface itself
    PlayerSurface,
    /// The control bar under the player
    ControlBar,
    /// The speed-menu popup
    SpeedMenu,
    /// The free-text notes pane
    NotesEditor,
    /// The keybinding help overlay
    HelpOverlay,
}

struct ShieldRule {
    name: &'static str,
    applies: fn(Region) -> bool,
}

/// Registry of shield rules.
pub struct FocusPolicy {
    rules: Vec<ShieldRule>,
}

impl FocusPolicy {
    /// The standard policy: text-accepting regions shield global keys.
    pub fn standard() -> Self {
        Self {
            rules: vec![ShieldRule {
                name: "text-entry",
                applies: |region| region == Region::NotesEditor,
            }],
        }
    }

    /// Extend the policy with an additional named rule.
    pub fn with_rule(mut self, name: &'static str, applies: fn(Region) -> bool) -> Self {
        self.rules.push(ShieldRule { name, applies });
        self
    }

    /// Whether any region on the focus path matches any rule.
    ///
    /// The whole path is consulted, so focus nested inside a shielded
    /// region is shielded too.
    pub fn is_shielded(&self, focus_path: &[Region]) -> bool {
        focus_path
            .iter()
            .any(|&region| self.rules.iter().any(|rule| (rule.applies)(region)))
    }

    /// Name of the first rule shielding this path, for log lines.
    pub fn shielding_rule(&self, focus_path: &[Region]) -> Option<&'static str> {
        focus_path.iter().find_map(|&region| {
            self.rules
                .iter()
                .find(|rule| (rule.applies)(region))
                .map(|rule| rule.name)
        })
    }
}

impl Default for FocusPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
