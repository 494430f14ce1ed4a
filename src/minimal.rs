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

//! Deterministic minimal-denomination strategy.

use crate::change::ChangeResult;
use crate::currency::Currency;
use crate::strategy::{ChangeStrategy, SpecialRule};
use crate::transaction::Transaction;

/// Largest-first greedy fill.
///
/// Iterates denominations in descending value order, taking
/// `remaining / value` of each. Stateless and deterministic; a single
/// instance is safe to share across concurrent calls.
///
/// Convergence to a zero remainder assumes the currency carries a
/// 1-minor-unit denomination. Without one the loop may end with change
/// left over; the result then reports the true total while its counts sum
/// to less. That gap is the caller's configuration problem, not rounded
/// away here.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimalCountStrategy;

impl MinimalCountStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl ChangeStrategy for MinimalCountStrategy {
    fn calculate(&self, transaction: &Transaction, currency: &Currency) -> ChangeResult {
        let change = transaction.change();
        let mut remaining = change;
        let mut counts = Vec::new();

        for denomination in currency.denominations_desc() {
            let count = remaining / denomination.value();
            if count > 0 {
                counts.push((denomination.name().to_string(), count as u64));
                remaining -= count * denomination.value();
            }
        }

        ChangeResult::from_counts(change, counts)
    }

    /// Applies when no rule is configured, or the change does not match it.
    fn applies_to(&self, transaction: &Transaction, rule: Option<&SpecialRule>) -> bool {
        match rule {
            None => true,
            Some(rule) => !rule.matches(transaction.change()),
        }
    }
}
