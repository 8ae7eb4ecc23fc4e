/*
store.rs

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

//! Key-value stores for JSON documents.

use log::{debug, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fs::{File, create_dir_all, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use serde_json::Value;

/// Storage for JSON values, indexed by a key.
pub trait Store {
    /// Return the value for the key, or None if the store has no value for that key.
    fn get(&self, key: &str) -> Result<Option<Value>, Box<dyn Error>>;

    /// Save the value for the key.
    fn set(&self, key: &str, value: &Value) -> Result<(), Box<dyn Error>>;

    /// Remove the value for the key. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), Box<dyn Error>>;

    /// Return the value for the key, or None if the value is missing or cannot be read.
    fn get_or_absent(&self, key: &str) -> Option<Value> {
        match self.get(key) {
            Ok(v) => v,
            Err(e) => {
                warn!("Cannot read {key}: {e}");
                None
            }
        }
    }
}

/// Store that saves each value in a `<key>.json` file.
pub struct JsonFileStore {
    /// Absolute path to the directory that contains the files.
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Create a [`JsonFileStore`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the values are saved.
    /// The directory is created when the first value is saved.
    pub fn new(data_dir: PathBuf) -> Self {
        debug!("Data directory: {data_dir:?}");
        Self { data_dir }
    }

    /// Return the default data directory, under the user's local data directory.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_local_dir().map(|d| d.join(crate::config::APPLICATION_ID))
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

impl Store for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, Box<dyn Error>> {
        let file: File;
        match File::open(self.file_path(key)) {
            Ok(f) => file = f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        }
        let reader: BufReader<File> = BufReader::new(file);
        let value: Value = serde_json::from_reader(reader)?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), Box<dyn Error>> {
        create_dir_all(&self.data_dir)?;

        // Write to a temporary file, and then replace the previous file
        let tmp_path: PathBuf = self.data_dir.join(format!("{key}.json.tmp"));
        let file: File = File::create(&tmp_path)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer(&mut writer, value)?;
        writer.flush()?;
        std::fs::rename(&tmp_path, self.file_path(key))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), Box<dyn Error>> {
        match remove_file(self.file_path(key)) {
            Ok(()) => {
                debug!("Removed {key}");
                Ok(())
            }
            Err(error) => match error.kind() {
                ErrorKind::NotFound => Ok(()),
                _ => Err(Box::new(error)),
            },
        }
    }
}

/// Store that keeps the values in memory. Nothing is kept when the program exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty [`MemoryStore`] object.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, Box<dyn Error>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), Box<dyn Error>> {
        self.values.borrow_mut().insert(key.to_string(), value.clone());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), Box<dyn Error>> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}
