use std::fmt;

use tracing::{debug, warn};

use crate::storage::PersistenceAdapter;

/// Presentation mode. Stored as the bare token `light` or `dark`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☀️",
            Self::Dark => "🌙",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two-state light/dark preference whose only transition is [`toggle`](Self::toggle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreference {
    current: Theme,
}

impl ThemePreference {
    pub fn new(theme: Theme) -> Self {
        Self { current: theme }
    }

    /// Restores the persisted preference, defaulting to dark.
    pub fn load(adapter: &PersistenceAdapter) -> Self {
        Self::new(adapter.load_theme())
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flips the theme, hands it to `apply`, then persists it. A failed write
    /// is logged and the new theme stays in effect.
    pub fn toggle(&mut self, adapter: &PersistenceAdapter, apply: impl FnOnce(Theme)) -> Theme {
        self.current = self.current.toggled();
        apply(self.current);
        match adapter.save_theme(self.current) {
            Ok(()) => debug!(theme = %self.current, "theme persisted"),
            Err(err) => warn!(error = %err, "theme preference not saved"),
        }
        self.current
    }
}

impl Default for ThemePreference {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn toggle_applies_then_persists() {
        let store = MemoryStore::new();
        let adapter = PersistenceAdapter::new(store.clone());
        let mut preference = ThemePreference::load(&adapter);
        assert_eq!(preference.current(), Theme::Dark);

        let mut applied = None;
        let next = preference.toggle(&adapter, |theme| applied = Some(theme));
        assert_eq!(next, Theme::Light);
        assert_eq!(applied, Some(Theme::Light));
        assert_eq!(store.raw("theme").as_deref(), Some("\"light\""));
    }

    #[test]
    fn toggle_survives_write_failure() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        let adapter = PersistenceAdapter::new(store.clone());
        let mut preference = ThemePreference::default();
        assert_eq!(preference.toggle(&adapter, |_| {}), Theme::Light);
        assert_eq!(preference.current(), Theme::Light);
        assert!(store.raw("theme").is_none());
    }

    #[test]
    fn tokens_are_strict() {
        assert_eq!(Theme::from_token(" light\n"), Some(Theme::Light));
        assert_eq!(Theme::from_token("Light"), None);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
