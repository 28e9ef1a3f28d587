use std::fmt;
use std::str::FromStr;

use crate::error::VoiceError;

pub const DEFAULT_HOTKEY: &str = "ctrl+m";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

/// A key press reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub modifiers: Modifiers,
    pub key: String,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            modifiers: Modifiers::default(),
            key: key.into(),
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }
}

/// Keyboard shortcut in `modifier+...+key` form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hotkey {
    modifiers: Modifiers,
    key: String,
}

impl Hotkey {
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Exact modifier set, case-insensitive key
    pub fn matches(&self, press: &KeyPress) -> bool {
        press.modifiers == self.modifiers && press.key.eq_ignore_ascii_case(&self.key)
    }
}

impl Default for Hotkey {
    fn default() -> Self {
        Self {
            modifiers: Modifiers { ctrl: true, ..Modifiers::default() },
            key: "m".to_string(),
        }
    }
}

impl FromStr for Hotkey {
    type Err = VoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| VoiceError::InvalidHotkey(format!("'{s}': {reason}"));

        let parts: Vec<String> = s.split('+').map(|p| p.trim().to_lowercase()).collect();
        let Some((key, modifier_parts)) = parts.split_last() else {
            return Err(invalid("empty binding"));
        };
        if key.is_empty() {
            return Err(invalid("missing key"));
        }

        let mut modifiers = Modifiers::default();
        for part in modifier_parts {
            let flag = match part.as_str() {
                "ctrl" | "control" => &mut modifiers.ctrl,
                "alt" | "option" => &mut modifiers.alt,
                "shift" => &mut modifiers.shift,
                "meta" | "cmd" | "command" | "super" => &mut modifiers.meta,
                other => return Err(invalid(&format!("unknown modifier '{other}'"))),
            };
            if *flag {
                return Err(invalid(&format!("modifier '{part}' repeated")));
            }
            *flag = true;
        }

        if matches!(key.as_str(), "ctrl" | "control" | "alt" | "option" | "shift" | "meta" | "cmd" | "command" | "super") {
            return Err(invalid("binding has no key"));
        }

        Ok(Self { modifiers, key: key.clone() })
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Modifiers { ctrl, alt, shift, meta } = self.modifiers;
        for (enabled, name) in [(ctrl, "ctrl"), (alt, "alt"), (shift, "shift"), (meta, "meta")] {
            if enabled {
                write!(f, "{name}+")?;
            }
        }
        f.write_str(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binding() {
        let hotkey: Hotkey = DEFAULT_HOTKEY.parse().unwrap();
        assert_eq!(hotkey, Hotkey::default());
        assert!(hotkey.matches(&KeyPress::new("M").with_ctrl()));
        assert!(!hotkey.matches(&KeyPress::new("m")));
        assert!(!hotkey.matches(&KeyPress::new("m").with_ctrl().with_shift()));
    }

    #[test]
    fn test_aliases_and_display() {
        let hotkey: Hotkey = "Control + Option + V".parse().unwrap();
        assert_eq!(hotkey.to_string(), "ctrl+alt+v");
        assert!(hotkey.matches(&KeyPress::new("v").with_ctrl().with_alt()));

        let hotkey: Hotkey = "cmd+shift+space".parse().unwrap();
        assert!(hotkey.matches(&KeyPress::new("Space").with_meta().with_shift()));
    }

    #[test]
    fn test_invalid_bindings() {
        for raw in ["", "ctrl+", "ctrl+shift", "hyper+m", "ctrl+ctrl+m"] {
            assert!(
                matches!(raw.parse::<Hotkey>(), Err(VoiceError::InvalidHotkey(_))),
                "{raw} should be rejected"
            );
        }
    }
}
