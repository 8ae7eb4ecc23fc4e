/*
deck.rs

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

//! Build the deck of cards from a projective plane of order `p`.
//!
//! The points of the plane are the symbols:
//!
//! * `p²` affine points `(x, y)`, labelled `x * p + y`.
//! * `p` slope points, labelled `p² + a` for the slope `a`.
//! * One point at infinity, labelled `p² + p`.
//!
//! The lines of the plane are the cards.
//! Two distinct lines of a projective plane always meet in exactly one point.

use log::debug;
use std::error::Error;
use std::fmt;
use std::sync::LazyLock;

use crate::config;

/// Symbol identifier, in the range `0..num_symbols(p)`.
pub type Symbol = usize;

/// A card is a list of `p + 1` distinct symbols.
pub type Card = Vec<Symbol>;

/// Deck for the configured geometry order, built on first use.
static DECK: LazyLock<Vec<Card>> = LazyLock::new(|| {
    let cards: Vec<Card> = generate_cards(config::GEOMETRY_ORDER);
    debug!(
        "Deck of order {}: {} cards",
        config::GEOMETRY_ORDER,
        cards.len()
    );
    cards
});

/// Type of errors. They indicate a bug in the deck construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckError {
    /// The two cards have no symbol in common.
    NoSharedSymbol,

    /// The two cards have more than one symbol in common (the number of common symbols).
    SeveralSharedSymbols(usize),

    /// The deck does not have enough cards for the rounds of a puzzle (the number of cards).
    NotEnoughCards(usize),
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DeckError::NoSharedSymbol => write!(f, "the cards do not share any symbol"),
            DeckError::SeveralSharedSymbols(n) => write!(f, "the cards share {n} symbols"),
            DeckError::NotEnoughCards(n) => write!(
                f,
                "the deck has {n} cards, but {} are required",
                2 * config::ROUNDS_PER_PUZZLE
            ),
        }
    }
}

impl Error for DeckError {}

/// Return the number of symbols (and cards) for a plane of order `p`.
pub fn num_symbols(p: usize) -> usize {
    p * p + p + 1
}

/// Build the `p² + p + 1` cards of the projective plane of order `p`.
///
/// `p` must be prime, otherwise the lines built from the slopes do not form a plane.
pub fn generate_cards(p: usize) -> Vec<Card> {
    let point = |x: usize, y: usize| x * p + y;
    let slope = |a: usize| p * p + a;
    let infinity: Symbol = p * p + p;
    let mut cards: Vec<Card> = Vec::with_capacity(num_symbols(p));

    // Lines y = a.x + b
    for a in 0..p {
        for b in 0..p {
            let mut card: Card = (0..p).map(|x| point(x, (a * x + b) % p)).collect();
            card.push(slope(a));
            cards.push(card);
        }
    }

    // Vertical lines x = b
    for b in 0..p {
        let mut card: Card = (0..p).map(|y| point(b, y)).collect();
        card.push(infinity);
        cards.push(card);
    }

    // Line at infinity
    let mut card: Card = (0..p).map(slope).collect();
    card.push(infinity);
    cards.push(card);

    cards
}

/// Return the deck for the configured geometry order.
pub fn deck() -> &'static [Card] {
    &DECK
}

/// Return the only symbol that the two cards have in common.
///
/// # Errors
///
/// The function returns an error if the cards share zero or several symbols. For cards from the
/// same deck, that means the deck is wrong.
pub fn shared_symbol(a: &[Symbol], b: &[Symbol]) -> Result<Symbol, DeckError> {
    let common: Vec<Symbol> = a.iter().filter(|s| b.contains(s)).copied().collect();

    match common.len() {
        0 => Err(DeckError::NoSharedSymbol),
        1 => Ok(common[0]),
        n => Err(DeckError::SeveralSharedSymbols(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_plane(p: usize) {
        let cards: Vec<Card> = generate_cards(p);
        assert_eq!(cards.len(), num_symbols(p));

        let mut pairs: usize = 0;
        for (i, a) in cards.iter().enumerate() {
            for b in &cards[i + 1..] {
                assert!(shared_symbol(a, b).is_ok(), "cards {a:?} and {b:?}");
                pairs += 1;
            }
        }
        assert_eq!(pairs, cards.len() * (cards.len() - 1) / 2);
    }

    #[test]
    fn test_every_pair_shares_one_symbol() {
        assert_plane(5);
    }

    #[test]
    fn test_other_prime_orders() {
        assert_plane(2);
        assert_plane(3);
        assert_plane(7);
    }

    #[test]
    fn test_reference_deck_shape() {
        let cards: &[Card] = deck();
        assert_eq!(cards.len(), 31);

        for card in cards {
            assert_eq!(card.len(), 6);
            let distinct: HashSet<&Symbol> = card.iter().collect();
            assert_eq!(distinct.len(), 6);
            assert!(card.iter().all(|s| *s < num_symbols(5)));
        }
    }

    #[test]
    fn test_cards_are_distinct() {
        let mut cards: Vec<Card> = generate_cards(5);
        for card in cards.iter_mut() {
            card.sort_unstable();
        }
        let distinct: HashSet<Card> = cards.into_iter().collect();
        assert_eq!(distinct.len(), 31);
    }

    #[test]
    fn test_every_symbol_is_on_p_plus_one_cards() {
        let cards: Vec<Card> = generate_cards(5);
        for symbol in 0..num_symbols(5) {
            let n: usize = cards.iter().filter(|c| c.contains(&symbol)).count();
            assert_eq!(n, 6, "symbol {symbol}");
        }
    }

    #[test]
    fn test_shared_symbol_errors() {
        assert_eq!(shared_symbol(&[1, 2, 3], &[4, 5, 6]), Err(DeckError::NoSharedSymbol));
        assert_eq!(
            shared_symbol(&[1, 2, 3], &[2, 3, 4]),
            Err(DeckError::SeveralSharedSymbols(2))
        );
        assert_eq!(shared_symbol(&[1, 2, 3], &[3, 4, 5]), Ok(3));
    }
}
