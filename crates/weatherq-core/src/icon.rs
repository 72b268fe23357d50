//! Maps free-text weather descriptions to the fixed set of card icons.

use serde::{Deserialize, Serialize};

/// The icon variants a weather card can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconKey {
    Clear,
    ClearNight,
    FewClouds,
    ScatteredClouds,
    OvercastClouds,
    LightRain,
    Rain,
    Thunderstorm,
    Snow,
    Clouds,
}

impl IconKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::ClearNight => "clear-night",
            Self::FewClouds => "few-clouds",
            Self::ScatteredClouds => "scattered-clouds",
            Self::OvercastClouds => "overcast-clouds",
            Self::LightRain => "light-rain",
            Self::Rain => "rain",
            Self::Thunderstorm => "thunderstorm",
            Self::Snow => "snow",
            Self::Clouds => "clouds",
        }
    }
}

impl std::fmt::Display for IconKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact-match table, keyed by lowercase description.
const DESCRIPTION_TABLE: &[(&str, IconKey)] = &[
    ("clear sky", IconKey::Clear),
    ("few clouds", IconKey::FewClouds),
    ("scattered clouds", IconKey::ScatteredClouds),
    ("broken clouds", IconKey::OvercastClouds),
    ("overcast clouds", IconKey::OvercastClouds),
    ("light rain", IconKey::LightRain),
    ("moderate rain", IconKey::Rain),
    ("heavy intensity rain", IconKey::Rain),
    ("thunderstorm", IconKey::Thunderstorm),
    ("snow", IconKey::Snow),
    ("mist", IconKey::Clouds),
    ("fog", IconKey::Clouds),
    ("haze", IconKey::Clouds),
];

/// Classifies a weather description into an [`IconKey`].
///
/// Lookup order: the exact-match table, then `Clouds` for anything mentioning
/// "cloud", then `Clear`. A `Clear` result becomes `ClearNight` at night; no
/// other key has a night variant.
#[must_use]
pub fn classify(description: &str, is_night: bool) -> IconKey {
    let desc = description.to_lowercase();

    let key = DESCRIPTION_TABLE
        .iter()
        .find(|(text, _)| *text == desc)
        .map(|(_, key)| *key)
        .unwrap_or_else(|| {
            if desc.contains("cloud") {
                IconKey::Clouds
            } else {
                IconKey::Clear
            }
        });

    if is_night && key == IconKey::Clear {
        IconKey::ClearNight
    } else {
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_maps_to_its_key_by_day() {
        for (description, expected) in DESCRIPTION_TABLE {
            assert_eq!(classify(description, false), *expected, "{description}");
        }
    }

    #[test]
    fn only_clear_has_a_night_variant() {
        assert_eq!(classify("clear sky", true), IconKey::ClearNight);
        assert_eq!(classify("overcast clouds", true), IconKey::OvercastClouds);
        assert_eq!(classify("thunderstorm", true), IconKey::Thunderstorm);
        assert_eq!(classify("mist", true), IconKey::Clouds);
    }

    #[test]
    fn unknown_cloudy_description_falls_back_to_clouds() {
        assert_eq!(classify("light clouds", false), IconKey::Clouds);
        assert_eq!(classify("light clouds", true), IconKey::Clouds);
    }

    #[test]
    fn unknown_description_falls_back_to_clear() {
        assert_eq!(classify("tornado", false), IconKey::Clear);
        assert_eq!(classify("tornado", true), IconKey::ClearNight);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("Few Clouds", false), IconKey::FewClouds);
        assert_eq!(classify("HEAVY INTENSITY RAIN", false), IconKey::Rain);
    }

    #[test]
    fn table_match_is_exact_not_prefix() {
        // "light rain and snow" is not in the table and has no "cloud".
        assert_eq!(classify("light rain and snow", false), IconKey::Clear);
    }

    #[test]
    fn keys_render_as_kebab_case() {
        assert_eq!(IconKey::ClearNight.to_string(), "clear-night");
        assert_eq!(
            serde_json::to_value(IconKey::ScatteredClouds).expect("serialize"),
            serde_json::json!("scattered-clouds")
        );
    }
}
