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

//! Change calculation orchestration.
//!
//! The [`ChangeCalculator`] validates inputs, derives the change, and
//! dispatches to whichever strategy the selector picks. It is the single
//! entry point for both the per-transaction and batch paths.

use crate::change::ChangeResult;
use crate::currency::Currency;
use crate::error::ChangeError;
use crate::strategy::{SpecialRule, StrategySelector};
use crate::transaction::Transaction;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;

/// Orchestrates validation, change derivation, and strategy dispatch.
///
/// Holds the currency table and optional special rule read-only for its
/// lifetime. All calculation is synchronous CPU work; the calculator is
/// safe to share behind an [`Arc`] across concurrent callers.
pub struct ChangeCalculator {
    currency: Arc<Currency>,
    rule: Option<SpecialRule>,
    selector: StrategySelector,
}

impl ChangeCalculator {
    /// Calculator with the default strategy pair (randomized, minimal).
    pub fn new(currency: Arc<Currency>, rule: Option<SpecialRule>) -> Self {
        Self::with_selector(currency, rule, StrategySelector::new())
    }

    /// Calculator with a caller-supplied selector (seeded runs, extensions).
    pub fn with_selector(
        currency: Arc<Currency>,
        rule: Option<SpecialRule>,
        selector: StrategySelector,
    ) -> Self {
        Self {
            currency,
            rule,
            selector,
        }
    }

    /// Computes the change breakdown for one transaction.
    ///
    /// Amounts are integer minor currency units. When `paid == owed` the
    /// zero-change result is returned directly without consulting the
    /// selector or any strategy, so no strategy-side cache is touched.
    ///
    /// # Errors
    ///
    /// - [`ChangeError::InvalidAmount`] - Either amount is negative.
    /// - [`ChangeError::InsufficientPayment`] - `paid` is less than `owed`.
    pub fn calculate_change(&self, owed: i64, paid: i64) -> Result<ChangeResult, ChangeError> {
        let transaction = Transaction::new(owed, paid)?;
        if transaction.change() == 0 {
            return Ok(ChangeResult::empty());
        }

        let strategy = self.selector.select(&transaction, self.rule.as_ref());
        Ok(strategy.calculate(&transaction, &self.currency))
    }

    /// Computes the change breakdown for decimal major-unit amounts.
    ///
    /// Amounts convert to minor units by multiplying by 100 and rounding to
    /// the nearest integer with ties away from zero, so `1.005` becomes 101
    /// minor units. An amount that does not fit in `i64` minor units is
    /// rejected as invalid.
    pub fn calculate_change_decimal(
        &self,
        owed: Decimal,
        paid: Decimal,
    ) -> Result<ChangeResult, ChangeError> {
        self.calculate_change(to_minor_units(owed)?, to_minor_units(paid)?)
    }

    /// Computes formatted change lines for an ordered batch of
    /// (owed, paid) decimal pairs.
    ///
    /// Output preserves input order and length; an empty input yields an
    /// empty output. The first failing pair aborts the whole batch; any
    /// per-item isolation is the calling layer's concern.
    pub fn calculate_change_batch(
        &self,
        pairs: &[(Decimal, Decimal)],
    ) -> Result<Vec<String>, ChangeError> {
        pairs
            .iter()
            .map(|(owed, paid)| {
                self.calculate_change_decimal(*owed, *paid)
                    .map(|result| result.formatted().to_string())
            })
            .collect()
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn special_rule(&self) -> Option<&SpecialRule> {
        self.rule.as_ref()
    }
}

/// Converts decimal major units to integer minor units.
///
/// Rounds to the nearest minor unit with ties away from zero.
fn to_minor_units(amount: Decimal) -> Result<i64, ChangeError> {
    (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(ChangeError::InvalidAmount)
}
