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

//! Manage the results of the past days and compute the player statistics.
//!
//! The main object, [`History`], keeps one [`DailyHistoryEntry`] per completed day.
//! This object is saved when the player completes the daily puzzle, and is restored when Thread
//! starts.
//! See the [`crate::saver::history`] module that saves and restores the [`History`] object.
//!
//! The [`Stats`] object is never saved. It is computed from the history when needed.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Entries for which `today - day` is lower than this value are part of the week average.
const WEEK_DAYS: i64 = 7;

/// Entries for which `today - day` is lower than this value are part of the month average.
const MONTH_DAYS: i64 = 30;

/// Result of a completed daily puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyHistoryEntry {
    /// Day index of the puzzle.
    pub day: i64,

    /// Time in seconds for each round, penalties included.
    pub times: Vec<f64>,

    /// Sum of the round times.
    pub total: f64,

    /// Puzzle number, as displayed to the player.
    pub puzzle_number: i64,
}

impl DailyHistoryEntry {
    /// Create a [`DailyHistoryEntry`] object. The total is computed from the round times.
    pub fn new(day: i64, times: Vec<f64>, puzzle_number: i64) -> Self {
        let total: f64 = times.iter().sum();
        Self {
            day,
            times,
            total,
            puzzle_number,
        }
    }
}

/// List of the completed days.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct History {
    entries: Vec<DailyHistoryEntry>,
}

impl History {
    /// Create an empty [`History`] object.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add the entry, or replace the entry of the same day.
    pub fn upsert(&mut self, entry: DailyHistoryEntry) {
        match self.entries.iter_mut().find(|e| e.day == entry.day) {
            Some(e) => *e = entry,
            None => self.entries.push(entry),
        }
    }

    /// Return the entry for the given day.
    pub fn get(&self, day: i64) -> Option<&DailyHistoryEntry> {
        self.entries.iter().find(|e| e.day == day)
    }

    pub fn entries(&self) -> &[DailyHistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compute the statistics as seen on the given day.
    pub fn stats(&self, today: i64) -> Stats {
        Stats::compute(&self.entries, today)
    }
}

/// Player statistics.
///
/// Averages are `None` when no entry is part of the period, which is not the same as an
/// average of zero.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Stats {
    /// Number of consecutive days, ending today, with a completed puzzle.
    pub current_streak: u32,

    /// Number of completed puzzles.
    pub total_solved: usize,

    /// Average total time over the last seven days.
    pub avg_week: Option<f64>,

    /// Number of entries in the week average.
    pub week_count: usize,

    /// Average total time over the last thirty days.
    pub avg_month: Option<f64>,

    /// Number of entries in the month average.
    pub month_count: usize,

    /// Average total time of all the entries.
    pub avg_all_time: Option<f64>,
}

impl Stats {
    /// Compute the statistics from the entries, in any order.
    pub fn compute(entries: &[DailyHistoryEntry], today: i64) -> Self {
        let days: HashSet<i64> = entries.iter().map(|e| e.day).collect();
        let mut current_streak: u32 = 0;
        while days.contains(&(today - i64::from(current_streak))) {
            current_streak += 1;
        }

        let week: Vec<f64> = Self::totals_since(entries, today, WEEK_DAYS);
        let month: Vec<f64> = Self::totals_since(entries, today, MONTH_DAYS);
        let all: Vec<f64> = entries.iter().map(|e| e.total).collect();

        Self {
            current_streak,
            total_solved: entries.len(),
            avg_week: mean(&week),
            week_count: week.len(),
            avg_month: mean(&month),
            month_count: month.len(),
            avg_all_time: mean(&all),
        }
    }

    /// Return the totals of the entries for which `today - day` is lower than `days`.
    fn totals_since(entries: &[DailyHistoryEntry], today: i64, days: i64) -> Vec<f64> {
        entries
            .iter()
            .filter(|e| today - e.day < days)
            .map(|e| e.total)
            .collect()
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(days_and_totals: &[(i64, f64)]) -> History {
        let mut h: History = History::new();
        for (day, total) in days_and_totals {
            h.upsert(DailyHistoryEntry::new(*day, vec![*total], *day + 1));
        }
        h
    }

    #[test]
    fn test_entry_total() {
        let entry: DailyHistoryEntry = DailyHistoryEntry::new(3, vec![1.2, 0.8, 2.5, 3.1, 1.4], 4);
        assert!((entry.total - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_upsert_replaces_same_day() {
        let mut h: History = history(&[(4, 10.0), (5, 12.0)]);
        h.upsert(DailyHistoryEntry::new(5, vec![8.0], 6));
        assert_eq!(h.len(), 2);
        assert_eq!(h.get(5).map(|e| e.total), Some(8.0));
        assert!(h.get(6).is_none());
    }

    #[test]
    fn test_streak() {
        assert_eq!(history(&[(10, 1.0), (9, 1.0), (8, 1.0)]).stats(10).current_streak, 3);
        assert_eq!(history(&[(8, 1.0), (10, 1.0), (9, 1.0)]).stats(10).current_streak, 3);
        assert_eq!(history(&[(10, 1.0), (7, 1.0)]).stats(10).current_streak, 1);
        assert_eq!(history(&[(9, 1.0), (8, 1.0)]).stats(10).current_streak, 0);
        assert_eq!(History::new().stats(10).current_streak, 0);
    }

    #[test]
    fn test_averages() {
        let stats: Stats = history(&[(100, 10.0), (95, 20.0), (80, 30.0), (10, 40.0)]).stats(100);
        assert_eq!(stats.total_solved, 4);
        assert_eq!(stats.avg_week, Some(15.0));
        assert_eq!(stats.week_count, 2);
        assert_eq!(stats.avg_month, Some(20.0));
        assert_eq!(stats.month_count, 3);
        assert_eq!(stats.avg_all_time, Some(25.0));
    }

    #[test]
    fn test_window_boundaries() {
        // today - day = 7 is outside the week, 29 is inside the month
        let stats: Stats = history(&[(93, 10.0), (71, 20.0)]).stats(100);
        assert_eq!(stats.avg_week, None);
        assert_eq!(stats.week_count, 0);
        assert_eq!(stats.avg_month, Some(15.0));
    }

    #[test]
    fn test_empty_history_has_no_averages() {
        let stats: Stats = History::new().stats(0);
        assert_eq!(stats.total_solved, 0);
        assert_eq!(stats.avg_week, None);
        assert_eq!(stats.avg_month, None);
        assert_eq!(stats.avg_all_time, None);
    }

    #[test]
    fn test_serialized_as_list() {
        let h: History = history(&[(1, 5.0)]);
        let json: serde_json::Value = serde_json::to_value(&h).unwrap();
        assert!(json.is_array());
        let back: History = serde_json::from_value(json).unwrap();
        assert_eq!(back, h);
    }
}
