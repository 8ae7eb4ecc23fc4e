/*
reminder.rs

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

//! Sign up for the daily reminder.
//!
//! The phone number is queued in a channel and the function returns immediately.
//! A worker thread consumes the queue and appends the numbers to an outbox file.
//! Delivering the messages is left to an external sender that reads that file.
//! Once the player has signed up, a flag is saved so that the sign-up form is not offered again.

use async_channel::{Receiver, Sender};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt;
use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use serde_json::Value;

use crate::config;
use crate::saver::store::Store;

/// Type of errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderError {
    /// The phone number does not have enough digits.
    InvalidNumber,

    /// The outbox worker is not running anymore.
    Closed,
}

impl fmt::Display for ReminderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReminderError::InvalidNumber => write!(
                f,
                "the phone number must have at least {} digits",
                config::PHONE_MIN_DIGITS
            ),
            ReminderError::Closed => write!(f, "the reminder service is not available"),
        }
    }
}

impl Error for ReminderError {}

/// Keep the digits of the phone number. Return None if there are not enough digits.
pub fn normalize_phone(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < config::PHONE_MIN_DIGITS {
        None
    } else {
        Some(digits)
    }
}

/// Whether the player already signed up.
pub fn is_opted_in(store: &dyn Store) -> bool {
    matches!(store.get_or_absent(config::REMINDER_KEY), Some(Value::Bool(true)))
}

/// Queue of reminder sign-ups.
#[derive(Clone)]
pub struct ReminderSignup {
    sender: Sender<String>,
}

impl ReminderSignup {
    /// Create a [`ReminderSignup`] object and the receiving end of its queue.
    pub fn channel() -> (Self, Receiver<String>) {
        let (sender, receiver) = async_channel::unbounded::<String>();
        (Self { sender }, receiver)
    }

    /// Queue the identifier without waiting.
    pub fn submit(&self, identifier: &str) -> Result<(), ReminderError> {
        self.sender
            .try_send(identifier.to_string())
            .map_err(|_| ReminderError::Closed)
    }

    /// Validate the phone number, queue it, and remember that the player signed up.
    ///
    /// Failing to save the flag is not an error: the player might be offered to sign up again.
    pub fn sign_up(&self, store: &dyn Store, phone: &str) -> Result<(), ReminderError> {
        let number: String = normalize_phone(phone).ok_or(ReminderError::InvalidNumber)?;
        self.submit(&number)?;
        if let Err(e) = store.set(config::REMINDER_KEY, &Value::Bool(true)) {
            warn!("Cannot save the reminder flag: {e}");
        }
        info!("Signed up for the daily reminder");
        Ok(())
    }
}

/// Start the worker that appends the queued identifiers to the outbox file.
///
/// The worker stops when all the [`ReminderSignup`] objects are dropped.
pub fn spawn_outbox(receiver: Receiver<String>, outbox: PathBuf) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(identifier) = receiver.recv_blocking() {
            if let Err(e) = append_line(&outbox, &identifier) {
                warn!("Cannot write to the reminder outbox {outbox:?}: {e}");
            }
        }
        debug!("Reminder outbox closed");
    })
}

fn append_line(path: &Path, line: &str) -> Result<(), Box<dyn Error>> {
    if let Some(dir) = path.parent() {
        create_dir_all(dir)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saver::store::MemoryStore;
    use crate::saver::store::tests::BrokenStore;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("(555) 123-4567"), Some("5551234567".to_string()));
        assert_eq!(normalize_phone("+1 555 123 4567"), Some("15551234567".to_string()));
        assert_eq!(normalize_phone("555-1234"), None);
        assert_eq!(normalize_phone(""), None);
    }

    #[test]
    fn test_sign_up_sets_flag() {
        let store: MemoryStore = MemoryStore::new();
        let (signup, receiver) = ReminderSignup::channel();
        assert!(!is_opted_in(&store));

        signup.sign_up(&store, "555 123 4567").unwrap();
        assert!(is_opted_in(&store));
        assert_eq!(receiver.try_recv().unwrap(), "5551234567");
    }

    #[test]
    fn test_invalid_number_is_not_queued() {
        let store: MemoryStore = MemoryStore::new();
        let (signup, receiver) = ReminderSignup::channel();

        assert_eq!(signup.sign_up(&store, "12345"), Err(ReminderError::InvalidNumber));
        assert!(receiver.is_empty());
        assert!(!is_opted_in(&store));
    }

    #[test]
    fn test_closed_queue() {
        let (signup, receiver) = ReminderSignup::channel();
        drop(receiver);
        assert_eq!(signup.submit("5551234567"), Err(ReminderError::Closed));
    }

    #[test]
    fn test_broken_store_does_not_fail_sign_up() {
        let (signup, _receiver) = ReminderSignup::channel();
        assert!(signup.sign_up(&BrokenStore, "5551234567").is_ok());
        assert!(!is_opted_in(&BrokenStore));
    }

    #[test]
    fn test_outbox_worker() {
        let dir = tempfile::tempdir().unwrap();
        let outbox: PathBuf = dir.path().join("outbox.txt");
        let (signup, receiver) = ReminderSignup::channel();
        let worker: JoinHandle<()> = spawn_outbox(receiver, outbox.clone());

        signup.submit("5551234567").unwrap();
        signup.submit("5559876543").unwrap();
        drop(signup);
        worker.join().unwrap();

        let content: String = std::fs::read_to_string(outbox).unwrap();
        assert_eq!(content, "5551234567\n5559876543\n");
    }
}
