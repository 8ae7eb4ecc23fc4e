/*
daily.rs

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

//! Select the rounds of the daily puzzle.

use log::debug;
use serde::Serialize;

use super::deck::{self, Card, DeckError, Symbol};
use super::rng::Mulberry32;
use crate::config;

/// Two cards and the symbol they share.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Round {
    /// Card displayed at the top, symbols in display order.
    pub top: Card,

    /// Card displayed at the bottom, symbols in display order.
    pub bottom: Card,

    /// The only symbol present on both cards.
    pub answer: Symbol,
}

impl Round {
    /// Whether the symbol is displayed in the round (on any of the two cards).
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.top.contains(&symbol) || self.bottom.contains(&symbol)
    }
}

/// The puzzle of the day.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    /// The rounds, in playing order.
    pub rounds: Vec<Round>,

    /// Number displayed to the players. The first puzzle is number 1.
    pub puzzle_number: i64,
}

/// Return the random seed for the given day index.
pub fn seed_for_day(day: i64) -> u32 {
    day.wrapping_mul(config::SEED_MULTIPLIER)
        .wrapping_add(config::SEED_OFFSET) as u32
}

/// Build the puzzle of the given day from the cards of the configured deck.
///
/// # Errors
///
/// The function returns an error if two selected cards do not share exactly one symbol.
/// This cannot happen with a valid deck.
pub fn daily_puzzle(day: i64) -> Result<Puzzle, DeckError> {
    puzzle_from_cards(day, deck::deck())
}

/// Build the puzzle of the given day from the provided cards.
///
/// # Errors
///
/// The function returns [`DeckError::NotEnoughCards`] if the deck contains less than
/// `2 * ROUNDS_PER_PUZZLE` cards.
pub fn puzzle_from_cards(day: i64, cards: &[Card]) -> Result<Puzzle, DeckError> {
    if cards.len() < 2 * config::ROUNDS_PER_PUZZLE {
        return Err(DeckError::NotEnoughCards(cards.len()));
    }

    let seed: u32 = seed_for_day(day);
    let mut rng: Mulberry32 = Mulberry32::new(seed);
    let indices: Vec<usize> = rng.shuffle(&(0..cards.len()).collect::<Vec<usize>>());
    debug!("Day {day}: seed = {seed}  shuffled cards = {indices:?}");

    let mut rounds: Vec<Round> = Vec::with_capacity(config::ROUNDS_PER_PUZZLE);
    for pair in indices.chunks_exact(2).take(config::ROUNDS_PER_PUZZLE) {
        let top: &Card = &cards[pair[0]];
        let bottom: &Card = &cards[pair[1]];
        let answer: Symbol = deck::shared_symbol(top, bottom)?;

        // The display order uses the same random stream, so it also depends only on the day
        rounds.push(Round {
            top: rng.shuffle(top),
            bottom: rng.shuffle(bottom),
            answer,
        });
    }

    Ok(Puzzle {
        rounds,
        puzzle_number: day + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_reference_day_zero() {
        let puzzle: Puzzle = daily_puzzle(0).unwrap();
        assert_eq!(puzzle.puzzle_number, 1);
        assert_eq!(puzzle.rounds[0].top, vec![26, 20, 13, 1, 19, 7]);
        assert_eq!(puzzle.rounds[0].bottom, vec![29, 22, 1, 5, 14, 18]);
        assert_eq!(puzzle.rounds[0].answer, 1);
        assert_eq!(puzzle.rounds[4].answer, 14);
    }

    #[test]
    fn test_same_day_same_puzzle() {
        for day in [-3, 0, 1, 654, 10_000] {
            assert_eq!(daily_puzzle(day).unwrap(), daily_puzzle(day).unwrap());
        }
    }

    #[test]
    fn test_puzzle_number() {
        for day in [0, 41, 654] {
            assert_eq!(daily_puzzle(day).unwrap().puzzle_number, day + 1);
        }
    }

    #[test]
    fn test_rounds_have_unique_answer() {
        for day in 0..200 {
            let puzzle: Puzzle = daily_puzzle(day).unwrap();
            assert_eq!(puzzle.rounds.len(), config::ROUNDS_PER_PUZZLE);

            for round in &puzzle.rounds {
                let common: Vec<&Symbol> =
                    round.top.iter().filter(|s| round.bottom.contains(s)).collect();
                assert_eq!(common, vec![&round.answer]);
                assert!(round.contains(round.answer));
            }
        }
    }

    #[test]
    fn test_cards_are_pairwise_distinct() {
        for day in 0..200 {
            let puzzle: Puzzle = daily_puzzle(day).unwrap();
            let mut cards: HashSet<Card> = HashSet::new();
            for round in puzzle.rounds {
                for mut card in [round.top, round.bottom] {
                    card.sort_unstable();
                    assert!(cards.insert(card));
                }
            }
            assert_eq!(cards.len(), 10);
        }
    }

    #[test]
    fn test_different_days_differ() {
        let first: Puzzle = daily_puzzle(100).unwrap();
        let second: Puzzle = daily_puzzle(101).unwrap();
        assert_ne!(first.rounds, second.rounds);
    }

    #[test]
    fn test_broken_deck_is_reported() {
        let cards: Vec<Card> = (0..10).map(|i| vec![i * 10, i * 10 + 1]).collect();
        assert_eq!(puzzle_from_cards(0, &cards), Err(DeckError::NoSharedSymbol));
    }

    #[test]
    fn test_small_deck_is_reported() {
        // The plane of order 2 only has 7 cards
        let cards: Vec<Card> = deck::generate_cards(2);
        assert_eq!(puzzle_from_cards(0, &cards), Err(DeckError::NotEnoughCards(7)));
        assert_eq!(puzzle_from_cards(0, &[]), Err(DeckError::NotEnoughCards(0)));

        // The plane of order 3 has enough cards
        let cards: Vec<Card> = deck::generate_cards(3);
        let puzzle: Puzzle = puzzle_from_cards(0, &cards).unwrap();
        assert_eq!(puzzle.rounds.len(), config::ROUNDS_PER_PUZZLE);
    }

    #[test]
    fn test_json_format() {
        let value: serde_json::Value = serde_json::to_value(daily_puzzle(0).unwrap()).unwrap();
        assert_eq!(value["puzzle_number"], 1);
        assert_eq!(value["rounds"].as_array().unwrap().len(), config::ROUNDS_PER_PUZZLE);
        assert_eq!(value["rounds"][0]["answer"], 1);
        assert_eq!(value["rounds"][0]["top"][0], 26);
    }
}
