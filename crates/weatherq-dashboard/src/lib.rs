//! Client-side state for the weather dashboard: the bounded city store,
//! persisted favorites and display preferences, the pure view model, and the
//! controller that ties lookups, mutations and rendering together.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod favorites;
pub mod preferences;
pub mod render;
pub mod storage;
pub mod store;
pub mod view;

pub use api::{HttpWeatherApi, WeatherApi};
pub use dashboard::{Dashboard, Geolocation, LOCATION_DENIED_NOTICE};
pub use error::DashboardError;
pub use favorites::{Favorites, FAVORITES_KEY, MAX_FAVORITES};
pub use preferences::{DisplayPreferences, Theme, DARK_MODE_KEY, TEMP_UNIT_KEY};
pub use render::{Surface, TextSurface};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use store::{CityEntry, CityWeatherStore, UpsertOutcome, MAX_CITIES};
pub use view::{build_view, Page, Selection, View, EMPTY_LIST_NOTICE};
