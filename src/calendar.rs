/*
calendar.rs

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

//! Convert wall-clock time to puzzle days.
//!
//! A new puzzle is published every day at the same UTC time.
//! The day index counts the resets since the configured epoch ([`config::EPOCH_MS`]).

use chrono::{DateTime, TimeDelta, Utc};

use crate::config;

/// Return the index of the puzzle day that contains the given instant.
///
/// Instants before the epoch give negative indexes.
pub fn day_index(now: DateTime<Utc>) -> i64 {
    (now.timestamp_millis() - config::EPOCH_MS).div_euclid(config::DAY_MS)
}

/// Return the time left before the next puzzle.
pub fn time_until_next_puzzle(now: DateTime<Utc>) -> TimeDelta {
    let into_day: i64 = (now.timestamp_millis() - config::EPOCH_MS).rem_euclid(config::DAY_MS);
    TimeDelta::milliseconds(config::DAY_MS - into_day)
}

/// Return the instant of the next daily reset.
pub fn next_reset(now: DateTime<Utc>) -> DateTime<Utc> {
    now + time_until_next_puzzle(now)
}

/// Return the time left before the next puzzle in hours, minutes, and seconds.
pub fn countdown_hms(now: DateTime<Utc>) -> (i64, i64, i64) {
    let left: i64 = time_until_next_puzzle(now).num_seconds();
    (left / 3600, (left % 3600) / 60, (left % 3600) % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_epoch_is_first_reset() {
        let epoch: DateTime<Utc> = at(2025, 1, 1, 14, 0, 0);
        assert_eq!(epoch.timestamp_millis(), config::EPOCH_MS);
        assert_eq!(day_index(epoch), 0);
        assert_eq!(day_index(epoch - TimeDelta::milliseconds(1)), -1);
    }

    #[test]
    fn test_day_changes_at_reset_time() {
        assert_eq!(day_index(at(2025, 1, 2, 13, 59, 59)), 0);
        assert_eq!(day_index(at(2025, 1, 2, 14, 0, 0)), 1);
        assert_eq!(day_index(at(2026, 1, 1, 14, 0, 0)), 365);
    }

    #[test]
    fn test_next_reset() {
        let now: DateTime<Utc> = at(2025, 3, 10, 8, 30, 0);
        assert_eq!(next_reset(now), at(2025, 3, 10, 14, 0, 0));
        assert_eq!(countdown_hms(now), (5, 30, 0));

        // Exactly at the reset, the next puzzle is one full day away
        let reset: DateTime<Utc> = at(2025, 3, 10, 14, 0, 0);
        assert_eq!(next_reset(reset), at(2025, 3, 11, 14, 0, 0));
    }
}
