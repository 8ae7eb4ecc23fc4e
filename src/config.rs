/*
config.rs

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

//! Build-time configuration.
//!
//! Changing any of the puzzle constants ([`GEOMETRY_ORDER`], [`SEED_MULTIPLIER`],
//! [`SEED_OFFSET`], or the epoch) changes the puzzles of the days already published.

/// Name of the directory, under the user's local data directory, that stores the save files.
pub const APPLICATION_ID: &str = "thread-puzzle";

pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2025 Hervé Quatremain\n",
    "License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.\n",
    "This is free software: you are free to change and redistribute it.\n",
    "There is NO WARRANTY, to the extent permitted by law."
);

/// Order of the projective plane. Must be a prime number.
pub const GEOMETRY_ORDER: usize = 5;

/// Number of rounds in a daily puzzle.
pub const ROUNDS_PER_PUZZLE: usize = 5;

/// Constants used to derive the random seed from the day index.
pub const SEED_MULTIPLIER: i64 = 7919;
pub const SEED_OFFSET: i64 = 1337;

/// The daily puzzle resets at 14:00 UTC (9am EST). Day 0 started on 2025-01-01 at that time,
/// which is this number of milliseconds after the Unix epoch.
pub const EPOCH_MS: i64 = 1_735_740_000_000;

/// Length of a puzzle day in milliseconds.
pub const DAY_MS: i64 = 86_400_000;

/// Time added to the round time for each wrong tap.
pub const PENALTY_SECS: f64 = 2.0;

/// Delay between the correct tap and the next round, so that the player sees the answer.
pub const SETTLE_DELAY_MS: i64 = 450;

/// Input is locked for that duration after a wrong tap.
pub const WRONG_COOLDOWN_MS: i64 = 250;

/// Round times below this value are fast.
pub const FAST_MAX_SECS: f64 = 1.5;

/// Round times up to (and including) this value are medium. Above are slow.
pub const MEDIUM_MAX_SECS: f64 = 3.0;

/// Keys in the persistent store.
pub const HISTORY_KEY: &str = "thread-history";
pub const REMINDER_KEY: &str = "thread-reminder-opted-in";

/// Minimum number of digits for a reminder phone number.
pub const PHONE_MIN_DIGITS: usize = 10;
