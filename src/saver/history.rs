/*
history.rs

Copyright 2025 Hervé Quatremain

This file is part of Thread.

Thread is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Thread is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Thread. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Save and restore the history of the completed days.
//!
//! The saved object is a serialization of the [`History`] object in JSON format by
//! using [`serde`].

use log::{debug, warn};
use std::error::Error;

use serde_json::Value;

use super::store::Store;
use crate::config;
use crate::history::History;

/// Object to save and restore the history.
pub struct SaverHistory<'a> {
    /// Store that keeps the history record.
    store: &'a dyn Store,
}

impl<'a> SaverHistory<'a> {
    /// Create a [`SaverHistory`] object.
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Retrieve the [`History`] object from the store.
    ///
    /// A missing, unreadable, or corrupted record gives an empty history.
    pub fn get_history(&self) -> History {
        let value: Value = match self.store.get_or_absent(config::HISTORY_KEY) {
            Some(v) => v,
            None => return History::new(),
        };
        match serde_json::from_value::<History>(value) {
            Ok(history) => {
                debug!("History loaded: {} entries", history.len());
                history
            }
            Err(e) => {
                warn!("Cannot parse the saved history, starting with an empty one: {e}");
                History::new()
            }
        }
    }

    /// Save the provided [`History`] object.
    pub fn save_history(&self, history: &History) -> Result<(), Box<dyn Error>> {
        let value: Value = serde_json::to_value(history)?;
        self.store.set(config::HISTORY_KEY, &value)
    }

    /// Remove the saved history and the reminder sign-up flag.
    pub fn delete_history(&self) -> Result<(), Box<dyn Error>> {
        self.store.delete(config::HISTORY_KEY)?;
        self.store.delete(config::REMINDER_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::DailyHistoryEntry;
    use crate::saver::store::{JsonFileStore, MemoryStore};
    use crate::saver::store::tests::BrokenStore;
    use serde_json::json;

    #[test]
    fn test_save_and_restore() {
        let store: MemoryStore = MemoryStore::new();
        let saver: SaverHistory = SaverHistory::new(&store);
        assert!(saver.get_history().is_empty());

        let mut history: History = History::new();
        history.upsert(DailyHistoryEntry::new(12, vec![1.0, 2.0, 1.5, 0.9, 3.2], 13));
        saver.save_history(&history).unwrap();
        assert_eq!(saver.get_history(), history);
    }

    #[test]
    fn test_corrupted_record_is_empty_history() {
        let store: MemoryStore = MemoryStore::new();
        store.set(config::HISTORY_KEY, &json!({"day": "x"})).unwrap();
        assert!(SaverHistory::new(&store).get_history().is_empty());
    }

    #[test]
    fn test_delete_history() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonFileStore = JsonFileStore::new(dir.path().to_path_buf());
        let saver: SaverHistory = SaverHistory::new(&store);

        let mut history: History = History::new();
        history.upsert(DailyHistoryEntry::new(3, vec![1.0; 5], 4));
        saver.save_history(&history).unwrap();
        store.set(config::REMINDER_KEY, &json!(true)).unwrap();

        saver.delete_history().unwrap();
        assert!(saver.get_history().is_empty());
        assert_eq!(store.get_or_absent(config::REMINDER_KEY), None);

        // Nothing left to remove
        assert!(saver.delete_history().is_ok());
    }

    #[test]
    fn test_broken_store() {
        let saver: SaverHistory = SaverHistory::new(&BrokenStore);
        assert!(saver.get_history().is_empty());
        assert!(saver.save_history(&History::new()).is_err());
        assert!(saver.delete_history().is_err());
    }
}
