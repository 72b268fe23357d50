//! Saved cities, re-resolved on every load.

use crate::error::DashboardError;
use crate::storage::KeyValueStore;

pub const FAVORITES_KEY: &str = "weatherq_cities";
pub const MAX_FAVORITES: usize = 4;

/// Ordered, deduplicated, at most [`MAX_FAVORITES`] city names, persisted as
/// a JSON array under [`FAVORITES_KEY`].
///
/// Every mutation writes the candidate list first and only then updates the
/// in-memory copy, so a failed write leaves both sides unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    names: Vec<String>,
}

impl Favorites {
    /// Reads the saved list. A missing or undecodable value is an empty list;
    /// duplicates and anything past the cap are discarded.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let Some(raw) = store.get(FAVORITES_KEY) else {
            return Self::default();
        };

        let stored: Vec<String> = match serde_json::from_str(&raw) {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(key = FAVORITES_KEY, error = %e, "ignoring undecodable favorites");
                return Self::default();
            }
        };

        let mut names: Vec<String> = Vec::with_capacity(MAX_FAVORITES);
        for name in stored {
            if names.len() == MAX_FAVORITES {
                break;
            }
            if !name.trim().is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }
        Self { names }
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn contains(&self, city: &str) -> bool {
        self.names.iter().any(|n| n == city)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.names.len() >= MAX_FAVORITES
    }

    /// Appends `city` unless it is already saved or the list is full.
    /// Returns whether the list changed.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the new list cannot be written.
    pub fn insert(
        &mut self,
        city: &str,
        store: &mut impl KeyValueStore,
    ) -> Result<bool, DashboardError> {
        if self.contains(city) || self.is_full() {
            return Ok(false);
        }
        let mut next = self.names.clone();
        next.push(city.to_string());
        self.commit(next, store)?;
        Ok(true)
    }

    /// Removes `city` if saved. Returns whether the list changed.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the new list cannot be written.
    pub fn remove(
        &mut self,
        city: &str,
        store: &mut impl KeyValueStore,
    ) -> Result<bool, DashboardError> {
        if !self.contains(city) {
            return Ok(false);
        }
        let next: Vec<String> = self.names.iter().filter(|n| *n != city).cloned().collect();
        self.commit(next, store)?;
        Ok(true)
    }

    fn commit(
        &mut self,
        next: Vec<String>,
        store: &mut impl KeyValueStore,
    ) -> Result<(), DashboardError> {
        let raw = serde_json::to_string(&next).map_err(|e| DashboardError::Decode {
            context: FAVORITES_KEY.to_string(),
            source: e,
        })?;
        store.set(FAVORITES_KEY, &raw)?;
        self.names = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), DashboardError> {
            Err(std::io::Error::other("read-only").into())
        }
    }

    #[test]
    fn load_missing_is_empty() {
        assert!(Favorites::load(&MemoryStore::new()).names().is_empty());
    }

    #[test]
    fn load_corrupt_is_empty() {
        let store = MemoryStore::with_values([(FAVORITES_KEY, "{oops")]);
        assert!(Favorites::load(&store).names().is_empty());
    }

    #[test]
    fn load_dedupes_and_caps() {
        let store = MemoryStore::with_values([(
            FAVORITES_KEY,
            r#"["Paris","Paris","Oslo","Lima","Rome","Cairo"]"#,
        )]);
        let favorites = Favorites::load(&store);
        assert_eq!(favorites.names(), ["Paris", "Oslo", "Lima", "Rome"]);
    }

    #[test]
    fn insert_persists_and_dedupes() {
        let mut store = MemoryStore::new();
        let mut favorites = Favorites::default();

        assert!(favorites.insert("Dhaka", &mut store).expect("insert"));
        assert!(!favorites.insert("Dhaka", &mut store).expect("insert again"));
        assert_eq!(favorites.names(), ["Dhaka"]);
        assert_eq!(store.get(FAVORITES_KEY).as_deref(), Some(r#"["Dhaka"]"#));
    }

    #[test]
    fn insert_refuses_past_cap() {
        let mut store = MemoryStore::new();
        let mut favorites = Favorites::default();
        for city in ["A", "B", "C", "D"] {
            assert!(favorites.insert(city, &mut store).expect("insert"));
        }
        assert!(favorites.is_full());
        assert!(!favorites.insert("E", &mut store).expect("insert"));
        assert_eq!(Favorites::load(&store).names(), ["A", "B", "C", "D"]);
    }

    #[test]
    fn remove_persists() {
        let mut store = MemoryStore::with_values([(FAVORITES_KEY, r#"["Oslo","Lima"]"#)]);
        let mut favorites = Favorites::load(&store);

        assert!(favorites.remove("Oslo", &mut store).expect("remove"));
        assert!(!favorites.remove("Oslo", &mut store).expect("remove again"));
        assert_eq!(Favorites::load(&store).names(), ["Lima"]);
    }

    #[test]
    fn failed_write_leaves_list_unchanged() {
        let mut store = ReadOnlyStore(MemoryStore::with_values([(FAVORITES_KEY, r#"["Oslo"]"#)]));
        let mut favorites = Favorites::load(&store);

        assert!(favorites.remove("Oslo", &mut store).is_err());
        assert!(favorites.insert("Lima", &mut store).is_err());
        assert_eq!(favorites.names(), ["Oslo"]);
    }
}
