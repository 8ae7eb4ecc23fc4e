/*
lib.rs

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

//! Thread: two cards, one shared shape, five rounds a day.
//!
//! * [`generator`] builds the deck and the puzzle of the day.
//! * [`game`] plays the five rounds and records the result.
//! * [`history`] keeps the results of the past days and computes the statistics.
//! * [`saver`] saves and restores the player data.

pub mod calendar;
pub mod config;
pub mod game;
pub mod generator;
pub mod history;
pub mod reminder;
pub mod saver;
pub mod share;
