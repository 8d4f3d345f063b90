//! UI settings: theme preference and log level.

use serde::{Deserialize, Serialize};

use super::{Store, Subscription, load_or, persist_on_change};
use crate::kv::{SharedKv, keys};

/// Theme preference. `Auto` defers to the system; resolution is a UI concern
/// and defaults to light here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Auto,
}

impl Theme {
    /// The next theme in the toggle cycle: light, dark, auto.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Auto,
            Self::Auto => Self::Light,
        }
    }

    /// The concrete theme to render.
    #[must_use]
    pub const fn resolve(self) -> Self {
        match self {
            Self::Auto => Self::Light,
            other => other,
        }
    }
}

/// Persisted log verbosity, mapped to a `tracing` filter directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Theme and log-level preferences, each persisted under its own key.
pub struct SettingsStore {
    theme: Store<Theme>,
    log_level: Store<LogLevel>,
    _subscriptions: (Subscription<Theme>, Subscription<LogLevel>),
}

impl SettingsStore {
    #[must_use]
    pub fn new(kv: SharedKv) -> Self {
        let theme = Store::new(load_or(&kv, keys::THEME, Theme::default));
        let log_level = Store::new(load_or(&kv, keys::LOG_LEVEL, LogLevel::default));
        let theme_sub = persist_on_change(&theme, kv.clone(), keys::THEME);
        let level_sub = persist_on_change(&log_level, kv, keys::LOG_LEVEL);
        Self {
            theme,
            log_level,
            _subscriptions: (theme_sub, level_sub),
        }
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme.snapshot()
    }

    #[must_use]
    pub fn observe_theme(&self) -> Store<Theme> {
        self.theme.clone()
    }

    pub fn set_theme(&self, theme: Theme) {
        self.theme.set(theme);
    }

    /// Cycle to the next theme and return it.
    pub fn toggle_theme(&self) -> Theme {
        self.theme.update(|theme| {
            *theme = theme.next();
            *theme
        })
    }

    #[must_use]
    pub fn log_level(&self) -> LogLevel {
        self.log_level.snapshot()
    }

    pub fn set_log_level(&self, level: LogLevel) {
        self.log_level.set(level);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::kv::MemoryKv;

    #[test]
    fn test_toggle_cycles_light_dark_auto() {
        let settings = SettingsStore::new(Arc::new(MemoryKv::new()));
        assert_eq!(settings.theme(), Theme::Light);
        assert_eq!(settings.toggle_theme(), Theme::Dark);
        assert_eq!(settings.toggle_theme(), Theme::Auto);
        assert_eq!(settings.toggle_theme(), Theme::Light);
    }

    #[test]
    fn test_auto_resolves_to_light() {
        assert_eq!(Theme::Auto.resolve(), Theme::Light);
        assert_eq!(Theme::Dark.resolve(), Theme::Dark);
    }

    #[test]
    fn test_preferences_persist_across_reloads() {
        let kv: SharedKv = Arc::new(MemoryKv::new());
        {
            let settings = SettingsStore::new(Arc::clone(&kv));
            settings.set_theme(Theme::Dark);
            settings.set_log_level(LogLevel::Debug);
        }
        let reloaded = SettingsStore::new(kv);
        assert_eq!(reloaded.theme(), Theme::Dark);
        assert_eq!(reloaded.log_level(), LogLevel::Debug);
    }
}
