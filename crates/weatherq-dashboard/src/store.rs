//! The ordered, size-bounded set of city weather records the dashboard shows.

use weatherq_core::WeatherSummary;

/// Most entries the store holds, current location included.
pub const MAX_CITIES: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct CityEntry {
    pub summary: WeatherSummary,
    /// Derived from the user's geolocation rather than a search or favorite.
    pub is_current_location: bool,
}

impl CityEntry {
    #[must_use]
    pub fn city(&self) -> &str {
        &self.summary.city
    }
}

/// Result of [`CityWeatherStore::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The city was new and is now in the store.
    Inserted,
    /// An entry with the same city name was replaced.
    Replaced,
    /// The store was full and the new back entry fell off the end.
    Dropped,
}

/// City weather records keyed by case-sensitive city name.
///
/// Invariants after every operation: no duplicate names, at most
/// [`MAX_CITIES`] entries, at most one current-location entry and, when
/// present, it sits at index 0.
#[derive(Debug, Clone, Default)]
pub struct CityWeatherStore {
    entries: Vec<CityEntry>,
}

impl CityWeatherStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the record for `summary.city`.
    ///
    /// A current-location record goes to the front and evicts any previous
    /// current-location record; any other record goes to the back. The store
    /// is then truncated to its first [`MAX_CITIES`] entries, so the front is
    /// always kept.
    ///
    /// Re-adding the current location's city as a plain city refreshes its
    /// data in place and keeps it as the current location.
    pub fn upsert(&mut self, summary: WeatherSummary, is_current_location: bool) -> UpsertOutcome {
        let existing = self.position(&summary.city);

        if let Some(i) = existing {
            if !is_current_location && self.entries[i].is_current_location {
                self.entries[i].summary = summary;
                return UpsertOutcome::Replaced;
            }
            self.entries.remove(i);
        }

        let city = summary.city.clone();
        let entry = CityEntry {
            summary,
            is_current_location,
        };

        if is_current_location {
            self.entries.retain(|e| !e.is_current_location);
            self.entries.insert(0, entry);
        } else {
            self.entries.push(entry);
        }
        self.entries.truncate(MAX_CITIES);

        if !self.contains(&city) {
            UpsertOutcome::Dropped
        } else if existing.is_some() {
            UpsertOutcome::Replaced
        } else {
            UpsertOutcome::Inserted
        }
    }

    /// Removes and returns the entry for `city`, if any.
    pub fn remove(&mut self, city: &str) -> Option<CityEntry> {
        self.position(city).map(|i| self.entries.remove(i))
    }

    #[must_use]
    pub fn entries(&self) -> &[CityEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, city: &str) -> Option<&CityEntry> {
        self.entries.iter().find(|e| e.city() == city)
    }

    #[must_use]
    pub fn contains(&self, city: &str) -> bool {
        self.position(city).is_some()
    }

    #[must_use]
    pub fn current_location(&self) -> Option<&CityEntry> {
        self.entries.first().filter(|e| e.is_current_location)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, city: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.city() == city)
    }
}
