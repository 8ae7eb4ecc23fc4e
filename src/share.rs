/*
share.rs

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

//! Build the result summary that players copy and share.
//!
//! Each round is shown as a colored square that depends on its time:
//!
//! ```text
//! 🧵🟩🟩🟨🟥🟩 9.3s
//! ```

use strum_macros::Display;

use crate::config;

/// Prefix of the shared text.
const THREAD_EMOJI: &str = "🧵";

/// Speed classification of a round time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Pace {
    /// Less than 1.5 seconds.
    Fast,

    /// From 1.5 to 3 seconds, both included.
    Medium,

    /// More than 3 seconds.
    Slow,
}

impl Pace {
    /// Classify the round time, in seconds.
    pub fn classify(time: f64) -> Self {
        if time < config::FAST_MAX_SECS {
            Pace::Fast
        } else if time <= config::MEDIUM_MAX_SECS {
            Pace::Medium
        } else {
            Pace::Slow
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Pace::Fast => "🟩",
            Pace::Medium => "🟨",
            Pace::Slow => "🟥",
        }
    }
}

/// Return the text to share for the given round times.
pub fn share_text(times: &[f64]) -> String {
    let blocks: String = times.iter().map(|t| Pace::classify(*t).emoji()).collect();
    let total: f64 = times.iter().sum();
    format!("{THREAD_EMOJI}{blocks} {total:.1}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(Pace::classify(0.0), Pace::Fast);
        assert_eq!(Pace::classify(1.49), Pace::Fast);
        assert_eq!(Pace::classify(1.5), Pace::Medium);
        assert_eq!(Pace::classify(3.0), Pace::Medium);
        assert_eq!(Pace::classify(3.01), Pace::Slow);
    }

    #[test]
    fn test_pace_names() {
        assert_eq!(Pace::Fast.to_string(), "fast");
        assert_eq!(Pace::Slow.to_string(), "slow");
    }

    #[test]
    fn test_share_text() {
        assert_eq!(
            share_text(&[1.2, 1.4, 2.0, 4.5, 0.9]),
            "🧵🟩🟩🟨🟥🟩 10.0s"
        );
    }
}
