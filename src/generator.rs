/*
generator.rs

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

//! Build the cards and generate the daily puzzle.
//!
//! The universe of cards is the set of lines of a finite projective plane, built by
//! [`deck::generate_cards`].
//! Any two cards share exactly one symbol, which is the symbol the player must find.
//! The deck for the configured order is built once and then shared through [`deck::deck`].
//!
//! The daily puzzle is a pure function of the day index:
//!
//! * The day index gives the seed of a [`rng::Mulberry32`] random generator.
//! * The generator shuffles the card indices, and the first ten cards are paired into the
//!   five [`daily::Round`] objects of the [`daily::Puzzle`].
//! * The same generator then shuffles the symbols of each card, for display.
//!
//! Every player who computes the puzzle for a given day gets the same rounds, in the same
//! order, with the symbols in the same positions.

pub mod daily;
pub mod deck;
pub mod rng;
