//! The side-effecting half of rendering: a surface receives a finished view
//! and any notices produced since the last render.

use std::io::{self, Write};

use crate::view::{CardView, ListView, SliderView, View};

/// Something that can display a [`View`].
pub trait Surface {
    /// Draws `view`, replacing whatever was drawn before.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying output.
    fn present(&mut self, view: &View) -> io::Result<()>;

    /// Shows a transient message such as a failed lookup.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying output.
    fn notify(&mut self, message: &str) -> io::Result<()>;
}

/// Plain-text surface for terminals and tests.
#[derive(Debug)]
pub struct TextSurface<W> {
    out: W,
}

impl<W: Write> TextSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_slider(&mut self, slider: &SliderView) -> io::Result<()> {
        if slider.cards.is_empty() {
            writeln!(self.out, "(no weather to show)")?;
            return Ok(());
        }

        let dots: String = slider
            .dots
            .iter()
            .map(|d| match (d.active, d.is_location) {
                (true, true) => '◉',
                (false, true) => '◎',
                (true, false) => '●',
                (false, false) => '○',
            })
            .collect();
        writeln!(self.out, "{dots}")?;

        // Only the active card is expanded; the rest are listed by title.
        for card in &slider.cards {
            if card.active {
                self.write_card(card)?;
            } else {
                writeln!(self.out, "  {}", card.title)?;
            }
        }
        Ok(())
    }

    fn write_card(&mut self, card: &CardView) -> io::Result<()> {
        let marker = if card.is_current_location { " (current location)" } else { "" };
        writeln!(self.out, "> {}{marker}", card.title)?;
        writeln!(self.out, "  [{}] {} {}", card.icon, card.temp, card.description)?;
        writeln!(self.out, "  {} | {} | {}", card.feels, card.humidity, card.wind)?;
        for cell in &card.forecast {
            writeln!(
                self.out,
                "    {:<4}[{}] {} {}",
                cell.day, cell.icon, cell.temp, cell.description
            )?;
        }
        Ok(())
    }

    fn write_list(&mut self, list: &ListView) -> io::Result<()> {
        if let Some(notice) = list.empty_notice {
            writeln!(self.out, "{notice}")?;
            return Ok(());
        }
        for row in &list.rows {
            let control = if row.removable { "  [remove]" } else { "" };
            writeln!(self.out, "{} [{}] {}{control}", row.title, row.icon, row.temp)?;
        }
        Ok(())
    }
}

impl<W: Write> Surface for TextSurface<W> {
    fn present(&mut self, view: &View) -> io::Result<()> {
        let chrome = view.chrome();
        writeln!(
            self.out,
            "theme: {} [{}]  unit: {}",
            if chrome.theme.is_dark() { "dark" } else { "light" },
            chrome.theme_toggle,
            chrome.unit_label
        )?;
        match view {
            View::Slider(slider) => self.write_slider(slider)?,
            View::List(list) => self.write_list(list)?,
        }
        self.out.flush()
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "! {message}")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::DisplayPreferences;
    use crate::store::CityWeatherStore;
    use crate::view::{build_view, Page, Selection};
    use weatherq_core::{CurrentConditions, DayForecast, WeatherSummary};

    fn summary(city: &str) -> WeatherSummary {
        WeatherSummary {
            city: city.to_string(),
            country: "NO".to_string(),
            current: CurrentConditions {
                temp: -2.0,
                feels_like: -6.0,
                humidity: 80,
                wind_speed: 4.0,
                description: "snow".to_string(),
                icon: "13d".to_string(),
                is_night: false,
            },
            forecast: vec![DayForecast {
                date: "Tue".to_string(),
                temp: -1.0,
                description: "few clouds".to_string(),
                icon: "02d".to_string(),
                is_night: false,
            }],
        }
    }

    fn rendered(view: &View) -> String {
        let mut surface = TextSurface::new(Vec::new());
        surface.present(view).expect("present");
        String::from_utf8(surface.into_inner()).expect("utf8")
    }

    #[test]
    fn slider_expands_active_card() {
        let mut store = CityWeatherStore::new();
        store.upsert(summary("Oslo"), true);
        store.upsert(summary("Bergen"), false);

        let out = rendered(&build_view(
            &store,
            DisplayPreferences::default(),
            Page::Main,
            Selection::default(),
        ));

        assert!(out.starts_with("theme: light [moon]  unit: °C\n"));
        assert!(out.contains("◉○\n"));
        assert!(out.contains("> Oslo, NO (current location)\n"));
        assert!(out.contains("  [snow] -2.0°C snow\n"));
        assert!(out.contains("Feels -6.0°C | Humidity 80% | Wind 4 m/s"));
        assert!(out.contains("Tue [few-clouds] -1.0°C few clouds"));
        assert!(out.contains("\n  Bergen, NO\n"));
    }

    #[test]
    fn list_marks_removable_rows() {
        let mut store = CityWeatherStore::new();
        store.upsert(summary("Oslo"), true);
        store.upsert(summary("Bergen"), false);

        let out = rendered(&build_view(
            &store,
            DisplayPreferences::default(),
            Page::Add,
            Selection::default(),
        ));

        assert!(out.contains("Oslo, NO [snow] -2.0°C\n"));
        assert!(out.contains("Bergen, NO [snow] -2.0°C  [remove]\n"));
    }

    #[test]
    fn empty_list_prints_notice() {
        let out = rendered(&build_view(
            &CityWeatherStore::new(),
            DisplayPreferences::default(),
            Page::Add,
            Selection::default(),
        ));
        assert!(out.ends_with("No cities added yet.\n"));
    }

    #[test]
    fn notify_prefixes_message() {
        let mut surface = TextSurface::new(Vec::new());
        surface.notify("City not found").expect("notify");
        assert_eq!(surface.into_inner(), b"! City not found\n");
    }
}
