/*
rng.rs

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

//! Seeded random generator.
//!
//! The daily puzzle must be the same for everybody, on every platform, and for as long as the
//! puzzle of a past day can be shared.
//! The shuffling algorithms provided by [`rand`] do not guarantee that their output stays the
//! same between versions, so the generator and the shuffle are implemented here.

use rand::{RngCore, SeedableRng};

/// Mulberry32 generator: a 32-bit state and a small mixing function.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Create a [`Mulberry32`] object.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Return the next value in the range [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Return a shuffled copy of the provided slice (Fisher-Yates).
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut shuffled: Vec<T> = items.to_vec();

        for i in (1..shuffled.len()).rev() {
            let j: usize = (self.next_f64() * (i + 1) as f64).floor() as usize;
            shuffled.swap(i, j);
        }
        shuffled
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6d2b_79f5);
        let a: u32 = self.state;
        let mut t: u32 = (a ^ (a >> 15)).wrapping_mul(1 | a);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let high: u64 = u64::from(self.next_u32());
        let low: u64 = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes: [u8; 4] = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
