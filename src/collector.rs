//! Keyed image accumulation across repeated workflow runs.
//!
//! The host invokes each operation once per run with no memory of its own, so
//! collected images live in a [`CollectionStore`]: create-on-first-use,
//! explicit reset, auto-clear on a successful drain. Operations on the store
//! are serialized behind a single mutex; every critical section is a short
//! map update, never a wait.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use image::RgbaImage;
use once_cell::sync::Lazy;

static GLOBAL_STORE: Lazy<CollectionStore> = Lazy::new(CollectionStore::new);

#[derive(Debug, Default)]
pub struct CollectionStore {
    collections: Mutex<HashMap<String, Vec<RgbaImage>>>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide store shared by all invocation contexts. Tests should
    /// construct their own isolated stores instead.
    pub fn global() -> &'static CollectionStore {
        &GLOBAL_STORE
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<RgbaImage>>> {
        // A poisoned map is still structurally valid; keep serving it.
        self.collections.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a batch to the named collection in submission order, creating
    /// the collection if absent. Returns the count after the append.
    pub fn append(&self, id: &str, images: &[RgbaImage]) -> usize {
        let mut collections = self.lock();
        let collection = collections.entry(id.to_owned()).or_default();
        collection.extend(images.iter().cloned());
        collection.len()
    }

    /// Clears the named collection regardless of its current state.
    pub fn reset(&self, id: &str) {
        self.lock().remove(id);
    }

    pub fn status(&self, id: &str, expected: usize) -> (usize, bool) {
        let collections = self.lock();
        let count = collections.get(id).map_or(0, Vec::len);
        (count, count >= expected)
    }

    /// If the collection has reached `expected` images, returns them all and
    /// atomically clears the collection; otherwise leaves it untouched.
    pub fn drain_if_complete(&self, id: &str, expected: usize) -> Option<Vec<RgbaImage>> {
        let mut collections = self.lock();
        let count = collections.get(id).map_or(0, Vec::len);
        if count >= expected {
            Some(collections.remove(id).unwrap_or_default())
        } else {
            None
        }
    }

    /// Returns and clears the collection unconditionally.
    pub fn drain(&self, id: &str) -> Vec<RgbaImage> {
        self.lock().remove(id).unwrap_or_default()
    }

    /// Returns a copy of the collection without clearing it (live preview).
    pub fn snapshot(&self, id: &str) -> Vec<RgbaImage> {
        self.lock().get(id).cloned().unwrap_or_default()
    }
}
