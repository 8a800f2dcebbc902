use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::catalog::Bike;
use crate::foundation::error::{VahanError, VahanResult};
use crate::persist::store::KvStore;

/// Storage key of the saved-bikes list.
pub const WISHLIST_KEY: &str = "vahan-wishlist";
/// Storage key of the comparison tray.
pub const COMPARE_KEY: &str = "bikesToCompare";
/// Most bikes the comparison tray holds.
pub const MAX_COMPARE: usize = 4;

/// Read `key`, discarding (and removing) values that do not parse.
fn load_or_discard<T: DeserializeOwned + Default>(store: &mut dyn KvStore, key: &str) -> T {
    let value = match store.get(key) {
        Ok(Some(value)) => value,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "stored list unreadable; starting empty");
            return T::default();
        }
    };
    match serde_json::from_value(value) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding corrupt stored list");
            if let Err(e) = store.remove(key) {
                tracing::warn!(key, error = %e, "failed to remove corrupt stored list");
            }
            T::default()
        }
    }
}

fn save<T: Serialize>(store: &mut dyn KvStore, key: &str, value: &T) -> VahanResult<()> {
    let json = serde_json::to_value(value)
        .map_err(|e| VahanError::persistence(format!("serialize '{key}': {e}")))?;
    store.set(key, json)
}

/// Ordered, duplicate-free list of saved bike ids.
pub struct Wishlist<S> {
    store: S,
    ids: Vec<String>,
}

impl<S: KvStore> Wishlist<S> {
    pub fn open(mut store: S) -> Self {
        let mut ids: Vec<String> = load_or_discard(&mut store, WISHLIST_KEY);
        let mut seen = std::collections::HashSet::new();
        ids.retain(|id| seen.insert(id.clone()));
        Self { store, ids }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_saved(&self, bike_id: &str) -> bool {
        self.ids.iter().any(|id| id == bike_id)
    }

    /// Save or unsave `bike_id`; returns whether it is saved afterwards.
    pub fn toggle(&mut self, bike_id: &str) -> VahanResult<bool> {
        let now_saved = !self.is_saved(bike_id);
        if now_saved {
            self.ids.push(bike_id.to_owned());
        } else {
            self.ids.retain(|id| id != bike_id);
        }
        save(&mut self.store, WISHLIST_KEY, &self.ids)?;
        Ok(now_saved)
    }

    /// Union with ids saved elsewhere, keeping local order first.
    pub fn merge<I: IntoIterator<Item = String>>(&mut self, ids: I) -> VahanResult<()> {
        let before = self.ids.len();
        for id in ids {
            if !self.is_saved(&id) {
                self.ids.push(id);
            }
        }
        if self.ids.len() != before {
            save(&mut self.store, WISHLIST_KEY, &self.ids)?;
        }
        Ok(())
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

/// Comparison tray of up to [`MAX_COMPARE`] distinct bikes.
pub struct CompareList<S> {
    store: S,
    bikes: Vec<Bike>,
}

impl<S: KvStore> CompareList<S> {
    pub fn open(mut store: S) -> Self {
        let mut bikes: Vec<Bike> = load_or_discard(&mut store, COMPARE_KEY);
        let mut seen = std::collections::HashSet::new();
        bikes.retain(|b| seen.insert(b.id.clone()));
        bikes.truncate(MAX_COMPARE);
        Self { store, bikes }
    }

    pub fn bikes(&self) -> &[Bike] {
        &self.bikes
    }

    pub fn len(&self) -> usize {
        self.bikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bikes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.bikes.len() >= MAX_COMPARE
    }

    pub fn contains(&self, bike_id: &str) -> bool {
        self.bikes.iter().any(|b| b.id == bike_id)
    }

    /// Add `bike` unless it is already present or the tray is full. Returns whether it was added.
    pub fn add(&mut self, bike: &Bike) -> VahanResult<bool> {
        if self.is_full() || self.contains(&bike.id) {
            return Ok(false);
        }
        self.bikes.push(bike.clone());
        save(&mut self.store, COMPARE_KEY, &self.bikes)?;
        Ok(true)
    }

    pub fn remove(&mut self, bike_id: &str) -> VahanResult<()> {
        let before = self.bikes.len();
        self.bikes.retain(|b| b.id != bike_id);
        if self.bikes.len() != before {
            save(&mut self.store, COMPARE_KEY, &self.bikes)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> VahanResult<()> {
        self.bikes.clear();
        save(&mut self.store, COMPARE_KEY, &self.bikes)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/lists.rs"]
mod tests;
