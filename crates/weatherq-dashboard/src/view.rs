//! Pure projection of dashboard state into what a surface draws.

use weatherq_core::{classify, format_temp, DayForecast, IconKey, TemperatureUnit};

use crate::preferences::{DisplayPreferences, Theme};
use crate::store::{CityEntry, CityWeatherStore};

pub const EMPTY_LIST_NOTICE: &str = "No cities added yet.";

/// Which page the dashboard is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Slider of weather cards; resolves geolocation and favorites.
    #[default]
    Main,
    /// Search box plus list of saved cities; favorites only.
    Add,
}

/// Active slider card. Starts at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    active: usize,
}

impl Selection {
    #[must_use]
    pub fn active(self) -> usize {
        self.active
    }

    /// Activates card `index`. Out-of-range indices are ignored and return
    /// `false`.
    pub fn select(&mut self, index: usize, len: usize) -> bool {
        if index < len {
            self.active = index;
            true
        } else {
            false
        }
    }

    /// Keeps the active index across a reload when it is still in range,
    /// otherwise falls back to the first card.
    pub fn reconcile(&mut self, len: usize) {
        if self.active >= len {
            self.active = 0;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    pub theme: Theme,
    pub theme_toggle: &'static str,
    pub unit_label: &'static str,
}

impl Chrome {
    fn from_preferences(prefs: DisplayPreferences) -> Self {
        Self {
            theme: prefs.theme,
            theme_toggle: prefs.theme.toggle_glyph(),
            unit_label: prefs.unit.symbol(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCellView {
    pub day: String,
    pub icon: IconKey,
    pub temp: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub title: String,
    pub is_current_location: bool,
    pub icon: IconKey,
    pub temp: String,
    pub description: String,
    pub feels: String,
    pub humidity: String,
    pub wind: String,
    pub forecast: Vec<ForecastCellView>,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotView {
    pub active: bool,
    pub is_location: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliderView {
    pub chrome: Chrome,
    pub cards: Vec<CardView>,
    pub dots: Vec<DotView>,
    pub active: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Key passed back to `remove_city`.
    pub city: String,
    pub title: String,
    pub icon: IconKey,
    pub temp: String,
    pub removable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub chrome: Chrome,
    pub rows: Vec<RowView>,
    pub empty_notice: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Slider(SliderView),
    List(ListView),
}

impl View {
    #[must_use]
    pub fn chrome(&self) -> &Chrome {
        match self {
            Self::Slider(slider) => &slider.chrome,
            Self::List(list) => &list.chrome,
        }
    }
}

/// Builds the view for `page`. The selection is clamped here as well, so a
/// stale index never yields a slider without an active card.
#[must_use]
pub fn build_view(
    store: &CityWeatherStore,
    prefs: DisplayPreferences,
    page: Page,
    selection: Selection,
) -> View {
    let chrome = Chrome::from_preferences(prefs);
    match page {
        Page::Main => View::Slider(build_slider(store, prefs.unit, chrome, selection)),
        Page::Add => View::List(build_list(store, prefs.unit, chrome)),
    }
}

fn build_slider(
    store: &CityWeatherStore,
    unit: TemperatureUnit,
    chrome: Chrome,
    mut selection: Selection,
) -> SliderView {
    selection.reconcile(store.len());
    let active = selection.active();

    let cards = store
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| card(entry, unit, i == active))
        .collect();

    let dots = store
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| DotView {
            active: i == active,
            is_location: i == 0 && entry.is_current_location,
        })
        .collect();

    SliderView {
        chrome,
        cards,
        dots,
        active,
    }
}

fn card(entry: &CityEntry, unit: TemperatureUnit, active: bool) -> CardView {
    let current = &entry.summary.current;
    CardView {
        title: title(entry),
        is_current_location: entry.is_current_location,
        icon: classify(&current.description, current.is_night),
        temp: format_temp(current.temp, unit),
        description: current.description.clone(),
        feels: format!("Feels {}", format_temp(current.feels_like, unit)),
        humidity: format!("Humidity {}%", current.humidity),
        wind: format!("Wind {} m/s", current.wind_speed),
        forecast: entry
            .summary
            .forecast
            .iter()
            .map(|day| forecast_cell(day, unit))
            .collect(),
        active,
    }
}

fn forecast_cell(day: &DayForecast, unit: TemperatureUnit) -> ForecastCellView {
    ForecastCellView {
        day: day.date.clone(),
        icon: classify(&day.description, day.is_night),
        temp: format_temp(day.temp, unit),
        description: day.description.clone(),
    }
}

fn build_list(store: &CityWeatherStore, unit: TemperatureUnit, chrome: Chrome) -> ListView {
    let rows: Vec<RowView> = store
        .entries()
        .iter()
        .map(|entry| {
            let current = &entry.summary.current;
            RowView {
                city: entry.city().to_string(),
                title: title(entry),
                icon: classify(&current.description, current.is_night),
                temp: format_temp(current.temp, unit),
                removable: !entry.is_current_location,
            }
        })
        .collect();

    let empty_notice = rows.is_empty().then_some(EMPTY_LIST_NOTICE);
    ListView {
        chrome,
        rows,
        empty_notice,
    }
}

fn title(entry: &CityEntry) -> String {
    format!("{}, {}", entry.summary.city, entry.summary.country)
}
