/*
game.rs

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

//! Manage the status of a game in progress.
//!
//! A [`Session`] drives the player through the five rounds of the daily puzzle:
//!
//! ```text
//! Idle --start--> Playing(round 0) --...--> Playing(round 4) --> Finished
//! ```
//!
//! The caller provides the current time to every operation, which makes the session
//! replayable from a list of timed events.
//! Tapping a symbol can lock the input for a short time.
//! The caller releases the lock by calling [`Session::tick`] once [`Session::lock_deadline`] is
//! reached.
//! Moving to the next round, and saving the result after the last round, also happen in
//! [`Session::tick`].

use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::error::Error;

use crate::calendar;
use crate::config;
use crate::generator::daily::{self, Puzzle, Round};
use crate::generator::deck::{DeckError, Symbol};
use crate::history::{DailyHistoryEntry, History, Stats};
use crate::saver::history::SaverHistory;
use crate::saver::store::Store;
use crate::share;

/// Status of a symbol that the player tapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Correct,
    Wrong,
}

/// Reason why the input is locked, and until when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lock {
    /// The player found the answer. The next round starts at the end of the delay.
    Settle { until: DateTime<Utc> },

    /// The player tapped a wrong symbol. The mark is removed at the end of the delay.
    Cooldown {
        symbol: Symbol,
        until: DateTime<Utc>,
    },
}

impl Lock {
    fn until(&self) -> DateTime<Utc> {
        match self {
            Lock::Settle { until } | Lock::Cooldown { until, .. } => *until,
        }
    }
}

/// State of the round in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct Play {
    /// Index of the active round.
    round: usize,

    /// Number of wrong taps in the active round.
    penalties: u32,

    /// Time when the active round started.
    round_start: DateTime<Utc>,

    /// Time of the rounds already solved.
    times: Vec<f64>,

    /// Marks on the symbols of the active round.
    marks: HashMap<Symbol, Mark>,

    /// Whether the input is locked.
    lock: Option<Lock>,
}

impl Play {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            round: 0,
            penalties: 0,
            round_start: now,
            times: Vec::with_capacity(config::ROUNDS_PER_PUZZLE),
            marks: HashMap::new(),
            lock: None,
        }
    }

    /// Remove the wrong-tap lock if its delay is over.
    fn release_cooldown(&mut self, now: DateTime<Utc>) -> bool {
        if let Some(Lock::Cooldown { symbol, until }) = self.lock
            && until <= now
        {
            self.marks.remove(&symbol);
            self.lock = None;
            return true;
        }
        false
    }
}

/// Phase of the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// The player has not started yet.
    Idle,

    /// A round is in progress.
    Playing(Play),

    /// All the rounds are solved. Contains the round times.
    Finished { times: Vec<f64> },
}

/// Result of a tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapOutcome {
    /// No round in progress, input locked, or symbol not displayed in the round.
    Ignored,

    /// Wrong symbol. Contains the number of wrong taps in the round so far.
    Wrong { penalties: u32 },

    /// Correct symbol. Contains the round time, penalties included.
    Correct { elapsed: f64 },
}

/// Result of a [`Session::tick`] call.
#[derive(Debug)]
pub enum Transition {
    /// Nothing changed.
    None,

    /// The wrong-tap delay is over and the player can tap again.
    Unlocked,

    /// The given round has started.
    NextRound(usize),

    /// The puzzle is solved. `saved` reports whether the history could be saved.
    Finished { saved: Result<(), Box<dyn Error>> },
}

/// Play session for the puzzle of a day.
pub struct Session<'a> {
    /// Day index of the puzzle.
    day: i64,

    /// Puzzle number, as displayed to the player.
    puzzle_number: i64,

    /// Puzzle being played. None when the day was already completed.
    puzzle: Option<Puzzle>,

    /// Current phase.
    phase: Phase,

    /// History of the completed days, including today once finished.
    history: History,

    /// Object that saves the history when the puzzle is solved.
    saver: SaverHistory<'a>,
}

impl<'a> Session<'a> {
    /// Create a [`Session`] object for the puzzle of the current day.
    pub fn open(store: &'a dyn Store, now: DateTime<Utc>) -> Result<Self, DeckError> {
        Self::for_day(store, calendar::day_index(now))
    }

    /// Create a [`Session`] object for the puzzle of the given day.
    ///
    /// If the history already has an entry for that day, then the session starts in the
    /// [`Phase::Finished`] phase with the saved times, and the puzzle is not generated.
    ///
    /// # Errors
    ///
    /// The function returns an error if the puzzle cannot be built, which is a bug in the deck.
    pub fn for_day(store: &'a dyn Store, day: i64) -> Result<Self, DeckError> {
        let saver: SaverHistory = SaverHistory::new(store);
        let history: History = saver.get_history();

        if let Some(entry) = history.get(day) {
            debug!("Day {day} already completed in {:.1}s", entry.total);
            return Ok(Self {
                day,
                puzzle_number: entry.puzzle_number,
                puzzle: None,
                phase: Phase::Finished {
                    times: entry.times.clone(),
                },
                history,
                saver,
            });
        }

        let puzzle: Puzzle = daily::daily_puzzle(day)?;
        Ok(Self {
            day,
            puzzle_number: puzzle.puzzle_number,
            puzzle: Some(puzzle),
            phase: Phase::Idle,
            history,
            saver,
        })
    }

    /// Start playing from the first round.
    ///
    /// Starting again while playing discards the rounds in progress.
    /// Return `false` when the puzzle of the day is already solved.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if matches!(self.phase, Phase::Finished { .. }) || self.puzzle.is_none() {
            return false;
        }
        debug!("Puzzle #{} started", self.puzzle_number);
        self.phase = Phase::Playing(Play::new(now));
        true
    }

    /// Process a tap on the given symbol.
    pub fn tap(&mut self, symbol: Symbol, now: DateTime<Utc>) -> TapOutcome {
        let Phase::Playing(play) = &mut self.phase else {
            return TapOutcome::Ignored;
        };
        let Some(round) = self.puzzle.as_ref().and_then(|p| p.rounds.get(play.round)) else {
            return TapOutcome::Ignored;
        };

        play.release_cooldown(now);
        if play.lock.is_some() || !round.contains(symbol) {
            return TapOutcome::Ignored;
        }

        if symbol == round.answer {
            let elapsed: f64 = elapsed_secs(play.round_start, now)
                + f64::from(play.penalties) * config::PENALTY_SECS;
            play.times.push(elapsed);
            play.marks.clear();
            play.marks.insert(symbol, Mark::Correct);
            play.lock = Some(Lock::Settle {
                until: now + TimeDelta::milliseconds(config::SETTLE_DELAY_MS),
            });
            info!(
                "Round {} solved in {elapsed:.3}s ({} penalties)",
                play.round + 1,
                play.penalties
            );
            TapOutcome::Correct { elapsed }
        } else {
            play.marks.insert(symbol, Mark::Wrong);
            play.penalties += 1;
            play.lock = Some(Lock::Cooldown {
                symbol,
                until: now + TimeDelta::milliseconds(config::WRONG_COOLDOWN_MS),
            });
            debug!("Wrong symbol {symbol}: penalties = {}", play.penalties);
            TapOutcome::Wrong {
                penalties: play.penalties,
            }
        }
    }

    /// Release the input lock if its delay is over.
    ///
    /// At the end of the delay that follows a correct tap, the next round starts. After the last
    /// round, the result is added to the history, the history is saved, and the session
    /// finishes. The session finishes even if the history cannot be saved.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Transition {
        let num_rounds: usize = self.puzzle.as_ref().map_or(0, |p| p.rounds.len());
        let Phase::Playing(play) = &mut self.phase else {
            return Transition::None;
        };

        if play.release_cooldown(now) {
            return Transition::Unlocked;
        }
        let Some(Lock::Settle { until }) = play.lock else {
            return Transition::None;
        };
        if until > now {
            return Transition::None;
        }

        if play.round + 1 < num_rounds {
            play.round += 1;
            play.penalties = 0;
            play.marks.clear();
            // The new round starts when the delay ends, not when the caller noticed it
            play.round_start = until;
            play.lock = None;
            return Transition::NextRound(play.round);
        }

        let times: Vec<f64> = std::mem::take(&mut play.times);
        self.finish(times)
    }

    /// Record the result of the day and switch to the [`Phase::Finished`] phase.
    fn finish(&mut self, times: Vec<f64>) -> Transition {
        let entry: DailyHistoryEntry =
            DailyHistoryEntry::new(self.day, times.clone(), self.puzzle_number);
        info!("Puzzle #{} solved in {:.3}s", self.puzzle_number, entry.total);
        self.history.upsert(entry);

        let saved: Result<(), Box<dyn Error>> = self.saver.save_history(&self.history);
        if let Err(e) = &saved {
            warn!("Cannot save the history: {e}");
        }
        self.phase = Phase::Finished { times };
        Transition::Finished { saved }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn day(&self) -> i64 {
        self.day
    }

    pub fn puzzle_number(&self) -> i64 {
        self.puzzle_number
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished { .. })
    }

    /// Return the index of the active round, if playing.
    pub fn round_index(&self) -> Option<usize> {
        match &self.phase {
            Phase::Playing(play) => Some(play.round),
            _ => None,
        }
    }

    /// Return the active round, if playing.
    pub fn current_round(&self) -> Option<&Round> {
        let index: usize = self.round_index()?;
        self.puzzle.as_ref()?.rounds.get(index)
    }

    /// Return the times of the solved rounds.
    pub fn times(&self) -> &[f64] {
        match &self.phase {
            Phase::Idle => &[],
            Phase::Playing(play) => &play.times,
            Phase::Finished { times } => times,
        }
    }

    /// Return the mark of the given symbol in the active round.
    pub fn mark(&self, symbol: Symbol) -> Option<Mark> {
        match &self.phase {
            Phase::Playing(play) => play.marks.get(&symbol).copied(),
            _ => None,
        }
    }

    /// Return the number of wrong taps in the active round.
    pub fn penalties(&self) -> u32 {
        match &self.phase {
            Phase::Playing(play) => play.penalties,
            _ => 0,
        }
    }

    /// Return the time that the wrong taps add to the active round.
    pub fn penalty_seconds(&self) -> f64 {
        f64::from(self.penalties()) * config::PENALTY_SECS
    }

    /// Return the time since the active round started, without the penalties.
    ///
    /// This is for display only. The round time is computed when the player taps the answer.
    pub fn live_elapsed(&self, now: DateTime<Utc>) -> Option<f64> {
        match &self.phase {
            Phase::Playing(play) => Some(elapsed_secs(play.round_start, now)),
            _ => None,
        }
    }

    /// Whether the input is locked.
    pub fn is_locked(&self) -> bool {
        matches!(&self.phase, Phase::Playing(play) if play.lock.is_some())
    }

    /// Return the time when [`Session::tick`] must be called to release the input lock.
    pub fn lock_deadline(&self) -> Option<DateTime<Utc>> {
        match &self.phase {
            Phase::Playing(play) => play.lock.map(|l| l.until()),
            _ => None,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Return the player statistics for the day of the session.
    pub fn stats(&self) -> Stats {
        self.history.stats(self.day)
    }

    /// Return the text that the player can share, once the puzzle is solved.
    pub fn share_text(&self) -> Option<String> {
        match &self.phase {
            Phase::Finished { times } => Some(share::share_text(times)),
            _ => None,
        }
    }
}

/// Return the number of seconds between the two instants, or zero if the clock went back.
fn elapsed_secs(start: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - start).num_milliseconds().max(0) as f64 / 1000.0
}
