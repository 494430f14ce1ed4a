// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 cashier-rs contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Change breakdown results and the shared formatting rule.
//!
//! A [`ChangeResult`] carries the total change, an insertion-ordered list of
//! (denomination name, count) pairs, and the formatted text rendering. The
//! ordering follows each strategy's own processing order, so two strategies
//! may present the same total differently.

use serde::Serialize;

/// A denomination breakdown for a change amount.
///
/// Zero-count entries are never present. The formatted text is derived once
/// at construction and renders each entry as `"<count> <name>"` with the
/// name pluralized, entries joined by commas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeResult {
    total: i64,
    denominations: Vec<(String, u64)>,
    formatted: String,
}

impl ChangeResult {
    /// The zero-change result: zero total, no denominations, empty text.
    pub fn empty() -> Self {
        Self {
            total: 0,
            denominations: Vec::new(),
            formatted: String::new(),
        }
    }

    /// Builds a result from a strategy's counts, preserving their order.
    ///
    /// Zero-count entries are filtered out; the formatted rendering is
    /// computed from what remains.
    pub fn from_counts(total: i64, counts: Vec<(String, u64)>) -> Self {
        let denominations: Vec<(String, u64)> =
            counts.into_iter().filter(|(_, count)| *count > 0).collect();
        let formatted = format_counts(&denominations);
        Self {
            total,
            denominations,
            formatted,
        }
    }

    /// Total change in minor currency units.
    pub fn total(&self) -> i64 {
        self.total
    }

    /// (name, count) pairs in the order the strategy produced them.
    ///
    /// Counts are `u64` so a single denomination can cover the full `i64`
    /// change range without truncation.
    pub fn denominations(&self) -> &[(String, u64)] {
        &self.denominations
    }

    /// Count for a denomination name, zero if absent.
    pub fn count_of(&self, name: &str) -> u64 {
        self.denominations
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn formatted(&self) -> &str {
        &self.formatted
    }

    pub fn is_empty(&self) -> bool {
        self.denominations.is_empty()
    }
}

/// Renders counts as `"<count> <name>"` entries joined by commas.
///
/// Names pluralize by appending `s` when the count is not 1, except the
/// irregular `penny` -> `pennies`. An empty slice renders as `""`.
pub fn format_counts(counts: &[(String, u64)]) -> String {
    counts
        .iter()
        .map(|(name, count)| format!("{} {}", count, pluralize(name, *count)))
        .collect::<Vec<_>>()
        .join(",")
}

fn pluralize(name: &str, count: u64) -> String {
    if count == 1 {
        return name.to_string();
    }
    if name == "penny" {
        return "pennies".to_string();
    }
    format!("{name}s")
}
