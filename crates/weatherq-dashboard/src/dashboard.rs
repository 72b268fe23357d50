//! The dashboard controller: owns all client state and applies every user
//! action to it. Front ends call an operation, then [`Dashboard::render`].

use futures::stream::{FuturesUnordered, StreamExt};
use weatherq_core::{Coordinates, WeatherSummary};

use crate::api::WeatherApi;
use crate::error::DashboardError;
use crate::favorites::{Favorites, MAX_FAVORITES};
use crate::preferences::DisplayPreferences;
use crate::render::Surface;
use crate::storage::KeyValueStore;
use crate::store::{CityWeatherStore, UpsertOutcome, MAX_CITIES};
use crate::view::{build_view, Page, Selection, View};

pub const LOCATION_DENIED_NOTICE: &str = "Location access denied";

/// Outcome of asking the host for the user's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geolocation {
    Granted(Coordinates),
    /// The user refused; reported as a notice.
    Denied,
    /// No geolocation support. Silently skipped.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
enum Lookup {
    CurrentLocation(Coordinates),
    Favorite(String),
}

impl Lookup {
    fn is_current_location(&self) -> bool {
        matches!(self, Self::CurrentLocation(_))
    }

    fn label(&self) -> &str {
        match self {
            Self::CurrentLocation(_) => "current location",
            Self::Favorite(name) => name,
        }
    }
}

async fn run_lookup<A: WeatherApi>(
    api: &A,
    lookup: &Lookup,
) -> Result<WeatherSummary, DashboardError> {
    match lookup {
        Lookup::CurrentLocation(coords) => api.by_coordinates(*coords).await,
        Lookup::Favorite(name) => api.by_city(name).await,
    }
}

pub struct Dashboard<A, S> {
    api: A,
    storage: S,
    page: Page,
    store: CityWeatherStore,
    favorites: Favorites,
    preferences: DisplayPreferences,
    selection: Selection,
    notices: Vec<String>,
}

impl<A: WeatherApi, S: KeyValueStore> Dashboard<A, S> {
    /// Creates a dashboard for `page`, reading favorites and display
    /// preferences from `storage`. No lookups happen until [`Self::load`].
    pub fn new(api: A, storage: S, page: Page) -> Self {
        let favorites = Favorites::load(&storage);
        let preferences = DisplayPreferences::load(&storage);
        Self {
            api,
            storage,
            page,
            store: CityWeatherStore::new(),
            favorites,
            preferences,
            selection: Selection::default(),
            notices: Vec::new(),
        }
    }

    /// Resolves the current location (main page only) and every saved
    /// favorite concurrently. Each result is upserted as it arrives; a failed
    /// lookup becomes a notice and does not stop the others.
    pub async fn load(&mut self, geolocation: Geolocation) {
        let mut lookups = Vec::with_capacity(MAX_FAVORITES + 1);
        if self.page == Page::Main {
            match geolocation {
                Geolocation::Granted(coords) => lookups.push(Lookup::CurrentLocation(coords)),
                Geolocation::Denied => self.notices.push(LOCATION_DENIED_NOTICE.to_string()),
                Geolocation::Unavailable => {}
            }
        }
        lookups.extend(self.favorites.names().iter().cloned().map(Lookup::Favorite));

        tracing::debug!(page = ?self.page, lookups = lookups.len(), "loading dashboard");

        let api = &self.api;
        let mut pending: FuturesUnordered<_> = lookups
            .into_iter()
            .map(|lookup| async move {
                let result = run_lookup(api, &lookup).await;
                (lookup, result)
            })
            .collect();

        while let Some((lookup, result)) = pending.next().await {
            match result {
                Ok(summary) => {
                    let outcome = self.store.upsert(summary, lookup.is_current_location());
                    tracing::debug!(target_city = lookup.label(), ?outcome, "lookup applied");
                }
                Err(e) => {
                    tracing::warn!(target_city = lookup.label(), error = %e, "lookup failed");
                    self.notices.push(format!("{}: {e}", lookup.label()));
                }
            }
        }

        self.selection.reconcile(self.store.len());
    }

    /// Searches for `query` and, on success, shows it and saves the resolved
    /// city name as a favorite when there is room. Blank input is ignored
    /// and returns `None`, as does a failed lookup.
    pub async fn add_city(&mut self, query: &str) -> Option<UpsertOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let summary = match self.api.by_city(query).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(query, error = %e, "city search failed");
                self.notices.push(e.to_string());
                return None;
            }
        };

        let city = summary.city.clone();
        let outcome = self.store.upsert(summary, false);
        tracing::info!(query, city = %city, ?outcome, "city added");

        if outcome == UpsertOutcome::Dropped {
            self.notices.push(format!(
                "{city} was not added: at most {MAX_CITIES} cities can be shown"
            ));
        } else if !self.favorites.contains(&city) {
            if self.favorites.is_full() {
                self.notices.push(format!(
                    "{city} is shown but not saved: at most {MAX_FAVORITES} cities can be saved"
                ));
            } else if let Err(e) = self.favorites.insert(&city, &mut self.storage) {
                tracing::warn!(city = %city, error = %e, "could not save favorite");
                self.notices.push(format!("Could not save {city}: {e}"));
            }
        }

        self.selection.reconcile(self.store.len());
        Some(outcome)
    }

    /// Removes `city` from the dashboard and, unless it is the current
    /// location, from the saved favorites. The favorites write happens first;
    /// if it fails nothing changes. Returns whether anything was removed.
    pub fn remove_city(&mut self, city: &str) -> bool {
        let is_current = self
            .store
            .get(city)
            .is_some_and(|entry| entry.is_current_location);

        let mut changed = false;
        if !is_current && self.favorites.contains(city) {
            if let Err(e) = self.favorites.remove(city, &mut self.storage) {
                tracing::warn!(city, error = %e, "could not remove favorite");
                self.notices.push(format!("Could not remove {city}: {e}"));
                return false;
            }
            changed = true;
        }

        changed |= self.store.remove(city).is_some();
        self.selection.reconcile(self.store.len());
        changed
    }

    /// Flips between Celsius and Fahrenheit. Returns whether it changed.
    pub fn toggle_unit(&mut self) -> bool {
        match self.preferences.toggle_unit(&mut self.storage) {
            Ok(()) => true,
            Err(e) => {
                self.notices.push(format!("Could not save unit: {e}"));
                false
            }
        }
    }

    /// Flips between light and dark. Returns whether it changed.
    pub fn toggle_theme(&mut self) -> bool {
        match self.preferences.toggle_theme(&mut self.storage) {
            Ok(()) => true,
            Err(e) => {
                self.notices.push(format!("Could not save theme: {e}"));
                false
            }
        }
    }

    /// Activates slider card `index`. Out-of-range indices are ignored.
    pub fn select_card(&mut self, index: usize) -> bool {
        self.selection.select(index, self.store.len())
    }

    #[must_use]
    pub fn view(&self) -> View {
        build_view(&self.store, self.preferences, self.page, self.selection)
    }

    /// Presents the current view on `surface`, then delivers and clears
    /// pending notices.
    ///
    /// # Errors
    ///
    /// Returns the surface's I/O error. Undelivered notices are kept.
    pub fn render(&mut self, surface: &mut impl Surface) -> std::io::Result<()> {
        surface.present(&self.view())?;
        while !self.notices.is_empty() {
            surface.notify(&self.notices[0])?;
            self.notices.remove(0);
        }
        Ok(())
    }

    #[must_use]
    pub fn store(&self) -> &CityWeatherStore {
        &self.store
    }

    #[must_use]
    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    #[must_use]
    pub fn preferences(&self) -> DisplayPreferences {
        self.preferences
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[must_use]
    pub fn page(&self) -> Page {
        self.page
    }

    #[must_use]
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
