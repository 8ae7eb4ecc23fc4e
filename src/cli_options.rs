/*
cli_options.rs

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

//! Process command-line options.
//!
//! # Examples
//!
//! Play the puzzle of the day. Enter the number of the symbol that both cards share:
//!
//! ```
//! $ thread-puzzle play
//! Thread #656 - round 1/5
//!    17   4  28  11  30   9
//!   ------------------------
//!    25  13  22  30   5  20
//! >
//! ```
//!
//! Print the rounds of a past puzzle with their answers:
//!
//! ```
//! $ thread-puzzle show --day 41 --answers
//! ```
//!
//! Print the statistics in JSON format:
//!
//! ```
//! $ thread-puzzle stats --json
//! ```

use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand};
use log::{debug, error};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use thread_puzzle::calendar;
use thread_puzzle::config::{self, COPYRIGHT_NOTICE};
use thread_puzzle::game::{Session, TapOutcome, Transition};
use thread_puzzle::generator::daily::{self, Puzzle, Round};
use thread_puzzle::generator::deck::Symbol;
use thread_puzzle::history::{DailyHistoryEntry, History, Stats};
use thread_puzzle::reminder::{self, ReminderSignup};
use thread_puzzle::saver::history::SaverHistory;
use thread_puzzle::saver::store::{JsonFileStore, MemoryStore, Store};
use thread_puzzle::share::{self, Pace};

/// Find the one shape shared by two cards, five times a day.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Directory where the history is saved
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Do not read nor save the history
    #[arg(long, default_value_t = false, global = true)]
    no_save: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play the puzzle of the day (default)
    Play,

    /// Print the rounds of a daily puzzle
    Show {
        /// Day index of the puzzle (the puzzle number minus one). Defaults to today
        #[arg(long, allow_negative_numbers = true)]
        day: Option<i64>,

        /// Also print the answer of each round
        #[arg(short, long, default_value_t = false)]
        answers: bool,

        /// Print the puzzle in JSON format, answers included
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the result of today's puzzle, ready to be shared
    Share,

    /// Print the player statistics
    Stats {
        /// Print the statistics in JSON format
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Sign up for the daily reminder
    Remind {
        /// Phone number (at least 10 digits)
        phone: String,
    },

    /// List the results of the past days
    History,

    /// Print the time left before the next puzzle
    Countdown,

    /// Delete the saved history and the reminder sign-up
    Reset,
}

/// Parse and process command-line options. Return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let data_dir: PathBuf = args
        .data_dir
        .or_else(JsonFileStore::default_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let store: Box<dyn Store> = if args.no_save {
        Box::new(MemoryStore::new())
    } else {
        Box::new(JsonFileStore::new(data_dir.clone()))
    };
    let outbox: Option<PathBuf> = if args.no_save {
        None
    } else {
        Some(data_dir.join("reminder-outbox.txt"))
    };
    let now: DateTime<Utc> = Utc::now();

    match args.command.unwrap_or(Command::Play) {
        Command::Play => play(store.as_ref()),
        Command::Show { day, answers, json } => show(
            day.unwrap_or_else(|| calendar::day_index(now)),
            answers,
            json,
        ),
        Command::Share => share(store.as_ref(), now),
        Command::Stats { json } => stats(store.as_ref(), now, json),
        Command::Remind { phone } => remind(store.as_ref(), outbox.as_deref(), &phone),
        Command::Reset => reset(store.as_ref()),
        Command::History => history(store.as_ref()),
        Command::Countdown => {
            let (h, m, s) = calendar::countdown_hms(now);
            println!(
                "Next thread in {h:02}:{m:02}:{s:02} ({})",
                calendar::next_reset(now).with_timezone(&Local).format("%c")
            );
            0
        }
    }
}

/// Print the symbols of a card on one line.
fn format_card(card: &[Symbol]) -> String {
    card.iter().map(|s| format!("{s:>4}")).collect()
}

fn print_round(round: &Round) {
    println!("{}", format_card(&round.top));
    println!("  {}", "-".repeat(4 * round.top.len()));
    println!("{}", format_card(&round.bottom));
}

fn print_result(times: &[f64]) {
    for (i, t) in times.iter().enumerate() {
        println!("  Round {}: {t:>5.1}s  {}", i + 1, Pace::classify(*t));
    }
    println!("  Total:  {:>5.1}s", times.iter().sum::<f64>());
}

fn print_stats(stats: &Stats) {
    let avg = |v: Option<f64>| v.map_or("-".to_string(), |a| format!("{a:.1}s"));
    let days: &str = if stats.current_streak == 1 { "day" } else { "days" };

    println!("Current streak        {} {days}", stats.current_streak);
    println!("Total solved          {}", stats.total_solved);
    println!("Avg this week ({})     {}", stats.week_count, avg(stats.avg_week));
    println!("Avg this month ({})    {}", stats.month_count, avg(stats.avg_month));
    println!("Avg all time          {}", avg(stats.avg_all_time));
}

/// Play the puzzle of the day from the standard input.
fn play(store: &dyn Store) -> u8 {
    let mut session: Session = match Session::open(store, Utc::now()) {
        Ok(s) => s,
        Err(e) => {
            error!("Cannot build the puzzle of the day: {e}");
            return 1;
        }
    };

    if !session.start(Utc::now()) {
        println!("Thread #{} is already solved.", session.puzzle_number());
        print_result(session.times());
        return 0;
    }

    let stdin = io::stdin();
    let mut line: String = String::new();
    while !session.is_finished() {
        if let Some(round) = session.current_round() {
            println!(
                "\nThread #{} - round {}/{}",
                session.puzzle_number(),
                session.round_index().map_or(0, |i| i + 1),
                config::ROUNDS_PER_PUZZLE
            );
            print_round(round);
        }
        print!("> ");
        let _ = io::stdout().flush();

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                println!();
                return 0;
            }
            Ok(_) => (),
            Err(e) => {
                error!("Cannot read the standard input: {e}");
                return 1;
            }
        }
        let input: &str = line.trim();
        if input == "q" {
            return 0;
        }
        let symbol: Symbol = match input.parse() {
            Ok(s) => s,
            Err(_) => {
                println!("Enter the number of the symbol, or q to quit.");
                continue;
            }
        };

        match session.tap(symbol, Utc::now()) {
            TapOutcome::Correct { elapsed } => println!("Found in {elapsed:.1}s"),
            TapOutcome::Wrong { penalties } => println!(
                "Wrong symbol ({penalties}): +{}s penalty",
                session.penalty_seconds()
            ),
            TapOutcome::Ignored => println!("Symbol {symbol} is not on the cards."),
        }

        // Wait for the end of the lock, then let the session move on
        if let Some(deadline) = session.lock_deadline() {
            thread::sleep((deadline - Utc::now()).to_std().unwrap_or_default());
            match session.tick(Utc::now()) {
                Transition::Finished { saved } => {
                    if let Err(e) = saved {
                        eprintln!("Your result could not be saved: {e}");
                    }
                }
                t => debug!("Transition: {t:?}"),
            }
        }
    }

    println!("\nThread #{} solved!", session.puzzle_number());
    print_result(session.times());
    if let Some(text) = session.share_text() {
        println!("\n{text}\n");
    }
    print_stats(&session.stats());
    0
}

/// Print the rounds of the puzzle of the given day.
fn show(day: i64, answers: bool, json: bool) -> u8 {
    let puzzle: Puzzle = match daily::daily_puzzle(day) {
        Ok(p) => p,
        Err(e) => {
            error!("Cannot build the puzzle of day {day}: {e}");
            return 1;
        }
    };

    if json {
        return match serde_json::to_string_pretty(&puzzle) {
            Ok(s) => {
                println!("{s}");
                0
            }
            Err(e) => {
                error!("Cannot format the puzzle: {e}");
                1
            }
        };
    }

    println!("Thread #{}", puzzle.puzzle_number);
    for (i, round) in puzzle.rounds.iter().enumerate() {
        println!("\nRound {}", i + 1);
        print_round(round);
        if answers {
            println!("  Answer: {}", round.answer);
        }
    }
    0
}

/// Print the shareable result of today's puzzle.
fn share(store: &dyn Store, now: DateTime<Utc>) -> u8 {
    match Session::open(store, now) {
        Ok(session) => match session.share_text() {
            Some(text) => {
                println!("{text}");
                0
            }
            None => {
                eprintln!("Thread #{} is not solved yet.", session.puzzle_number());
                1
            }
        },
        Err(e) => {
            error!("Cannot build the puzzle of the day: {e}");
            1
        }
    }
}

fn stats(store: &dyn Store, now: DateTime<Utc>, json: bool) -> u8 {
    let stats: Stats = SaverHistory::new(store)
        .get_history()
        .stats(calendar::day_index(now));

    if json {
        match serde_json::to_string_pretty(&stats) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                error!("Cannot format the statistics: {e}");
                return 1;
            }
        }
    } else {
        print_stats(&stats);
    }
    0
}

/// List the completed days, most recent first.
fn history(store: &dyn Store) -> u8 {
    let history: History = SaverHistory::new(store).get_history();
    if history.is_empty() {
        println!("No puzzle solved yet.");
        return 0;
    }

    let mut entries: Vec<&DailyHistoryEntry> = history.entries().iter().collect();
    entries.sort_unstable_by(|a, b| b.day.cmp(&a.day));
    for entry in entries {
        println!(
            "#{:<5} {:>6.1}s  {}",
            entry.puzzle_number,
            entry.total,
            share::share_text(&entry.times)
        );
    }
    0
}

/// Sign up for the daily reminder.
///
/// Without an outbox file, the number is validated but not recorded.
fn remind(store: &dyn Store, outbox: Option<&Path>, phone: &str) -> u8 {
    if reminder::is_opted_in(store) {
        println!("You're already signed up for reminders.");
        return 0;
    }

    let (signup, receiver) = ReminderSignup::channel();
    let worker: Option<JoinHandle<()>> =
        outbox.map(|path| reminder::spawn_outbox(receiver.clone(), path.to_path_buf()));
    let ret: u8 = match signup.sign_up(store, phone) {
        Ok(()) => {
            println!("You're signed up for reminders.");
            0
        }
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    };

    // Closing the queue stops the worker once the number is written
    drop(signup);
    drop(receiver);
    if let Some(worker) = worker
        && worker.join().is_err()
    {
        error!("The reminder outbox worker failed");
    }
    ret
}

/// Delete the saved history.
fn reset(store: &dyn Store) -> u8 {
    match SaverHistory::new(store).delete_history() {
        Ok(()) => {
            println!("History deleted.");
            0
        }
        Err(e) => {
            error!("Cannot delete the history: {e}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remind_writes_outbox() {
        let dir = tempfile::tempdir().unwrap();
        let outbox: PathBuf = dir.path().join("outbox.txt");
        let store: MemoryStore = MemoryStore::new();

        assert_eq!(remind(&store, Some(&outbox), "555 123 4567"), 0);
        assert_eq!(std::fs::read_to_string(&outbox).unwrap(), "5551234567\n");
        assert!(reminder::is_opted_in(&store));
    }

    #[test]
    fn test_remind_without_outbox() {
        let store: MemoryStore = MemoryStore::new();
        assert_eq!(remind(&store, None, "555 123 4567"), 0);
        assert!(reminder::is_opted_in(&store));
    }

    #[test]
    fn test_remind_invalid_number() {
        let dir = tempfile::tempdir().unwrap();
        let outbox: PathBuf = dir.path().join("outbox.txt");
        let store: MemoryStore = MemoryStore::new();

        assert_eq!(remind(&store, Some(&outbox), "12345"), 1);
        assert!(!outbox.exists());
        assert!(!reminder::is_opted_in(&store));
    }

    #[test]
    fn test_reset() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonFileStore = JsonFileStore::new(dir.path().to_path_buf());
        let saver: SaverHistory = SaverHistory::new(&store);
        let mut history: History = History::new();
        history.upsert(DailyHistoryEntry::new(5, vec![1.0; 5], 6));
        saver.save_history(&history).unwrap();

        assert_eq!(reset(&store), 0);
        assert!(saver.get_history().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_show_any_day() {
        assert_eq!(show(-5, true, false), 0);
        assert_eq!(show(656, false, true), 0);
    }
}
