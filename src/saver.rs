/*
saver.rs

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

//! Save and restore the player data.
//!
//! The data is kept in a key-value [`store::Store`] where each value is a JSON document.
//! Two records are stored: the history of the completed days ([`history`]) and whether the
//! player signed up for the daily reminder ([`crate::reminder`]).
//!
//! The store might not be available. Reading from a broken store is the same as reading a
//! missing record. Writing errors are returned to the caller, which reports them.

pub mod history;
pub mod store;
