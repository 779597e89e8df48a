//! User preferences.
//!
//! Theme choice and the onboarding-seen flag, persisted through the settings
//! store. Unknown stored values fall back to the default rather than erroring
//! so a downgrade never breaks launch.

use crate::error::Result;
use bridge_traits::storage::SettingsStore;
use std::sync::Arc;

const KEY_THEME: &str = "prefs.theme";
const KEY_ONBOARDING_SEEN: &str = "prefs.onboarding_seen";

/// App color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    Light,
    Dark,
    /// Follow the platform setting.
    #[default]
    System,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            "system" => Some(ThemePreference::System),
            _ => None,
        }
    }
}

/// Persisted user preferences.
pub struct Preferences {
    settings: Arc<dyn SettingsStore>,
}

impl Preferences {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    pub async fn theme(&self) -> Result<ThemePreference> {
        let stored = self.settings.get_string(KEY_THEME).await?;
        Ok(stored
            .as_deref()
            .and_then(ThemePreference::parse)
            .unwrap_or_default())
    }

    pub async fn set_theme(&self, theme: ThemePreference) -> Result<()> {
        self.settings.set_string(KEY_THEME, theme.as_str()).await?;
        Ok(())
    }

    pub async fn onboarding_seen(&self) -> Result<bool> {
        Ok(self
            .settings
            .get_bool(KEY_ONBOARDING_SEEN)
            .await?
            .unwrap_or(false))
    }

    pub async fn set_onboarding_seen(&self) -> Result<()> {
        self.settings.set_bool(KEY_ONBOARDING_SEEN, true).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_desktop::settings::SqliteSettingsStore;

    async fn prefs() -> Preferences {
        let settings = SqliteSettingsStore::in_memory().await.unwrap();
        Preferences::new(Arc::new(settings))
    }

    #[tokio::test]
    async fn theme_defaults_to_system() {
        let prefs = prefs().await;
        assert_eq!(prefs.theme().await.unwrap(), ThemePreference::System);
    }

    #[tokio::test]
    async fn theme_roundtrip() {
        let prefs = prefs().await;
        prefs.set_theme(ThemePreference::Dark).await.unwrap();
        assert_eq!(prefs.theme().await.unwrap(), ThemePreference::Dark);
    }

    #[tokio::test]
    async fn onboarding_flag_sticks() {
        let prefs = prefs().await;
        assert!(!prefs.onboarding_seen().await.unwrap());

        prefs.set_onboarding_seen().await.unwrap();
        assert!(prefs.onboarding_seen().await.unwrap());
    }
}
