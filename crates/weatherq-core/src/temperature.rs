use serde::{Deserialize, Serialize};

/// Display unit for temperatures. Readings are always stored in Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// The single-letter code persisted in the client store (`"C"` or `"F"`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }

    /// Reads a persisted code. Anything other than `"F"` is Celsius.
    #[must_use]
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("F") => Self::Fahrenheit,
            _ => Self::Celsius,
        }
    }

    /// The unit label shown on the toggle and appended to readings.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }
}

/// Formats a Celsius reading in `unit` with one decimal place, e.g. `"32.0°F"`.
#[must_use]
pub fn format_temp(celsius: f64, unit: TemperatureUnit) -> String {
    let value = match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
    };
    // Round first so readings like -0.04 collapse to -0.0, then fold -0.0 into 0.0.
    let rounded = (value * 10.0).round() / 10.0 + 0.0;
    format!("{rounded:.1}{}", unit.symbol())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_celsius() {
        assert_eq!(format_temp(0.0, TemperatureUnit::Celsius), "0.0°C");
        assert_eq!(format_temp(0.0, TemperatureUnit::Fahrenheit), "32.0°F");
    }

    #[test]
    fn converts_to_fahrenheit() {
        assert_eq!(format_temp(100.0, TemperatureUnit::Fahrenheit), "212.0°F");
        assert_eq!(format_temp(-40.0, TemperatureUnit::Fahrenheit), "-40.0°F");
        assert_eq!(format_temp(21.5, TemperatureUnit::Fahrenheit), "70.7°F");
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(format_temp(23.456, TemperatureUnit::Celsius), "23.5°C");
        assert_eq!(format_temp(-3.0, TemperatureUnit::Celsius), "-3.0°C");
    }

    #[test]
    fn negative_zero_prints_as_zero() {
        assert_eq!(format_temp(-0.0, TemperatureUnit::Celsius), "0.0°C");
        assert_eq!(format_temp(-0.04, TemperatureUnit::Celsius), "0.0°C");
    }

    #[test]
    fn unit_codes_round_trip_and_default_to_celsius() {
        assert_eq!(TemperatureUnit::from_code(Some("F")), TemperatureUnit::Fahrenheit);
        assert_eq!(TemperatureUnit::from_code(Some("C")), TemperatureUnit::Celsius);
        assert_eq!(TemperatureUnit::from_code(Some("kelvin")), TemperatureUnit::Celsius);
        assert_eq!(TemperatureUnit::from_code(None), TemperatureUnit::Celsius);
        assert_eq!(TemperatureUnit::Fahrenheit.code(), "F");
    }

    #[test]
    fn toggle_flips_unit() {
        assert_eq!(TemperatureUnit::Celsius.toggled(), TemperatureUnit::Fahrenheit);
        assert_eq!(TemperatureUnit::Fahrenheit.toggled(), TemperatureUnit::Celsius);
    }
}
