use weatherq_core::TemperatureUnit;

use crate::error::DashboardError;
use crate::storage::KeyValueStore;

pub const TEMP_UNIT_KEY: &str = "tempUnit";
pub const DARK_MODE_KEY: &str = "darkMode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Glyph on the theme toggle: it shows the theme you would switch to.
    #[must_use]
    pub fn toggle_glyph(self) -> &'static str {
        match self {
            Self::Light => "moon",
            Self::Dark => "sun",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Unit and theme choices, persisted as `tempUnit` (`"C"`/`"F"`) and
/// `darkMode` (`"true"`/`"false"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayPreferences {
    pub unit: TemperatureUnit,
    pub theme: Theme,
}

impl DisplayPreferences {
    /// Reads preferences, defaulting to Celsius and light for anything absent
    /// or unrecognised.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let unit = TemperatureUnit::from_code(store.get(TEMP_UNIT_KEY).as_deref());
        let theme = if store.get(DARK_MODE_KEY).as_deref() == Some("true") {
            Theme::Dark
        } else {
            Theme::Light
        };
        Self { unit, theme }
    }

    /// Flips the unit and persists it. On error nothing changes.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the new value cannot be written.
    pub fn toggle_unit(&mut self, store: &mut impl KeyValueStore) -> Result<(), DashboardError> {
        let next = self.unit.toggled();
        store.set(TEMP_UNIT_KEY, next.code())?;
        self.unit = next;
        Ok(())
    }

    /// Flips the theme and persists it. On error nothing changes.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the new value cannot be written.
    pub fn toggle_theme(&mut self, store: &mut impl KeyValueStore) -> Result<(), DashboardError> {
        let next = self.theme.toggled();
        store.set(DARK_MODE_KEY, if next.is_dark() { "true" } else { "false" })?;
        self.theme = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn defaults_to_celsius_and_light() {
        let prefs = DisplayPreferences::load(&MemoryStore::new());
        assert_eq!(prefs.unit, TemperatureUnit::Celsius);
        assert_eq!(prefs.theme, Theme::Light);
    }

    #[test]
    fn reads_persisted_values() {
        let store = MemoryStore::with_values([(TEMP_UNIT_KEY, "F"), (DARK_MODE_KEY, "true")]);
        let prefs = DisplayPreferences::load(&store);
        assert_eq!(prefs.unit, TemperatureUnit::Fahrenheit);
        assert_eq!(prefs.theme, Theme::Dark);
    }

    #[test]
    fn unrecognised_values_fall_back() {
        let store = MemoryStore::with_values([(TEMP_UNIT_KEY, "K"), (DARK_MODE_KEY, "yes")]);
        assert_eq!(DisplayPreferences::load(&store), DisplayPreferences::default());
    }

    #[test]
    fn toggles_persist() {
        let mut store = MemoryStore::new();
        let mut prefs = DisplayPreferences::load(&store);

        prefs.toggle_unit(&mut store).expect("toggle unit");
        prefs.toggle_theme(&mut store).expect("toggle theme");
        assert_eq!(store.get(TEMP_UNIT_KEY).as_deref(), Some("F"));
        assert_eq!(store.get(DARK_MODE_KEY).as_deref(), Some("true"));

        prefs.toggle_theme(&mut store).expect("toggle theme back");
        assert_eq!(store.get(DARK_MODE_KEY).as_deref(), Some("false"));
        assert_eq!(DisplayPreferences::load(&store), prefs);
    }

    #[test]
    fn toggle_glyph_shows_the_other_theme() {
        assert_eq!(Theme::Light.toggle_glyph(), "moon");
        assert_eq!(Theme::Dark.toggle_glyph(), "sun");
    }
}
