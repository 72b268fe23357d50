//! Normalization of an OpenWeatherMap forecast series into a
//! [`WeatherSummary`]: one current reading plus up to five distinct-day
//! samples.

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, Timelike};
use weatherq_core::{CurrentConditions, DayForecast, WeatherSummary, MAX_FORECAST_DAYS};

use crate::error::OwmError;
use crate::types::{ForecastInterval, ForecastResponse, IntervalWeather};

/// Fixed day/night cutoff: hours in `[18, 24)` and `[0, 6)` count as night.
#[must_use]
pub fn is_night_hour(hour: u32) -> bool {
    hour >= 18 || hour < 6
}

/// Converts a forecast response into a [`WeatherSummary`].
///
/// Intervals are scanned in chronological order. The soonest interval becomes
/// `current`. For the daily forecast the first interval seen for each
/// distinct weekday label is kept, up to [`MAX_FORECAST_DAYS`]; the day's
/// temperature is that single sample, not an aggregate.
///
/// Local time (for the weekday label and the night flag) uses the UTC offset
/// the payload reports for the city.
///
/// # Errors
///
/// Returns [`OwmError::Malformed`] when the series is empty, an interval has
/// no weather condition, a timestamp or offset is out of range, or humidity
/// exceeds 100.
pub fn summarize_forecast(response: &ForecastResponse) -> Result<WeatherSummary, OwmError> {
    let offset = FixedOffset::east_opt(response.city.timezone).ok_or_else(|| {
        OwmError::Malformed(format!(
            "city timezone offset {}s out of range",
            response.city.timezone
        ))
    })?;

    let mut intervals: Vec<&ForecastInterval> = response.list.iter().collect();
    intervals.sort_by_key(|interval| interval.dt);

    let first = intervals
        .first()
        .ok_or_else(|| OwmError::Malformed("forecast list is empty".to_string()))?;

    if first.main.humidity > 100 {
        return Err(OwmError::Malformed(format!(
            "humidity {} is out of range",
            first.main.humidity
        )));
    }

    let first_local = local_time(first.dt, offset)?;
    let first_weather = primary_condition(first)?;

    let current = CurrentConditions {
        temp: first.main.temp,
        feels_like: first.main.feels_like,
        humidity: first.main.humidity,
        wind_speed: first.wind.speed,
        description: first_weather.description.clone(),
        icon: first_weather.icon.clone(),
        is_night: is_night_hour(first_local.hour()),
    };

    let mut seen: HashSet<String> = HashSet::new();
    let mut forecast = Vec::with_capacity(MAX_FORECAST_DAYS);

    for interval in &intervals {
        if forecast.len() >= MAX_FORECAST_DAYS {
            break;
        }

        let local = local_time(interval.dt, offset)?;
        let label = local.format("%a").to_string();
        if seen.contains(&label) {
            continue;
        }

        let weather = primary_condition(interval)?;
        forecast.push(DayForecast {
            date: label.clone(),
            temp: interval.main.temp,
            description: weather.description.clone(),
            icon: weather.icon.clone(),
            is_night: is_night_hour(local.hour()),
        });
        seen.insert(label);
    }

    Ok(WeatherSummary {
        city: response.city.name.clone(),
        country: response.city.country.clone(),
        current,
        forecast,
    })
}

fn local_time(dt: i64, offset: FixedOffset) -> Result<DateTime<FixedOffset>, OwmError> {
    DateTime::from_timestamp(dt, 0)
        .map(|utc| utc.with_timezone(&offset))
        .ok_or_else(|| OwmError::Malformed(format!("timestamp {dt} is out of range")))
}

fn primary_condition(interval: &ForecastInterval) -> Result<&IntervalWeather, OwmError> {
    interval.weather.first().ok_or_else(|| {
        OwmError::Malformed(format!("interval at {} has no weather condition", interval.dt))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ForecastCity, IntervalMain, IntervalWind};

    /// 2024-01-01T00:00:00Z, a Monday.
    const MONDAY_MIDNIGHT_UTC: i64 = 1_704_067_200;
    const HOUR: i64 = 3_600;

    fn interval(dt: i64, temp: f64, description: &str) -> ForecastInterval {
        ForecastInterval {
            dt,
            main: IntervalMain {
                temp,
                feels_like: temp - 1.0,
                humidity: 55,
            },
            wind: IntervalWind { speed: 4.2 },
            weather: vec![IntervalWeather {
                description: description.to_string(),
                icon: "01d".to_string(),
            }],
        }
    }

    fn response(list: Vec<ForecastInterval>, timezone: i32) -> ForecastResponse {
        ForecastResponse {
            list,
            city: ForecastCity {
                name: "Testville".to_string(),
                country: "TV".to_string(),
                timezone,
            },
        }
    }

    /// Three-hour steps starting at `start`, temperature = step index.
    fn series(start: i64, steps: usize) -> Vec<ForecastInterval> {
        (0..steps)
            .map(|i| {
                let step = i64::try_from(i).expect("small index");
                interval(start + step * 3 * HOUR, f64::from(u32::try_from(i).expect("small")), "clear sky")
            })
            .collect()
    }

    #[test]
    fn night_cutoff_boundaries() {
        assert!(is_night_hour(0));
        assert!(is_night_hour(5));
        assert!(!is_night_hour(6));
        assert!(!is_night_hour(17));
        assert!(is_night_hour(18));
        assert!(is_night_hour(23));
    }

    #[test]
    fn seven_days_of_intervals_yield_five_distinct_days() {
        // 56 steps * 3h = 7 days.
        let summary = summarize_forecast(&response(series(MONDAY_MIDNIGHT_UTC, 56), 0))
            .expect("summary");

        let labels: Vec<&str> = summary.forecast.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(labels, vec!["Mon", "Tue", "Wed", "Thu", "Fri"]);
    }

    #[test]
    fn daily_temperature_is_first_seen_sample_not_aggregate() {
        let summary = summarize_forecast(&response(series(MONDAY_MIDNIGHT_UTC, 16), 0))
            .expect("summary");

        // Step 0 opens Monday, step 8 opens Tuesday (24h / 3h).
        assert!((summary.forecast[0].temp - 0.0).abs() < f64::EPSILON);
        assert!((summary.forecast[1].temp - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn current_comes_from_soonest_interval_even_if_unsorted() {
        let mut list = series(MONDAY_MIDNIGHT_UTC + 9 * HOUR, 4);
        list.reverse();
        let summary = summarize_forecast(&response(list, 0)).expect("summary");

        assert!((summary.current.temp - 0.0).abs() < f64::EPSILON);
        assert!((summary.current.feels_like - -1.0).abs() < f64::EPSILON);
        assert_eq!(summary.current.humidity, 55);
        assert!((summary.current.wind_speed - 4.2).abs() < f64::EPSILON);
        // 09:00 local.
        assert!(!summary.current.is_night);
        assert_eq!(summary.city, "Testville");
        assert_eq!(summary.country, "TV");
    }

    #[test]
    fn night_flag_uses_city_offset() {
        // 14:00 UTC is 20:00 at UTC+6.
        let list = vec![interval(MONDAY_MIDNIGHT_UTC + 14 * HOUR, 20.0, "clear sky")];

        let utc = summarize_forecast(&response(list.clone(), 0)).expect("summary");
        assert!(!utc.current.is_night);

        let dhaka = summarize_forecast(&response(list, 6 * 3_600)).expect("summary");
        assert!(dhaka.current.is_night);
        assert!(dhaka.forecast[0].is_night);
    }

    #[test]
    fn weekday_label_uses_city_offset() {
        // 20:00 UTC Monday is 01:00 Tuesday at UTC+5.
        let list = vec![interval(MONDAY_MIDNIGHT_UTC + 20 * HOUR, 10.0, "snow")];
        let summary = summarize_forecast(&response(list, 5 * 3_600)).expect("summary");
        assert_eq!(summary.forecast[0].date, "Tue");
    }

    #[test]
    fn empty_series_is_malformed() {
        let err = summarize_forecast(&response(vec![], 0)).unwrap_err();
        assert!(matches!(err, OwmError::Malformed(_)));
    }

    #[test]
    fn interval_without_weather_is_malformed() {
        let mut bare = interval(MONDAY_MIDNIGHT_UTC, 1.0, "fog");
        bare.weather.clear();
        let err = summarize_forecast(&response(vec![bare], 0)).unwrap_err();
        assert!(matches!(err, OwmError::Malformed(_)));
    }

    #[test]
    fn humidity_above_hundred_is_malformed() {
        let mut wet = interval(MONDAY_MIDNIGHT_UTC, 1.0, "fog");
        wet.main.humidity = 140;
        let err = summarize_forecast(&response(vec![wet], 0)).unwrap_err();
        assert!(matches!(err, OwmError::Malformed(_)));
    }
}
