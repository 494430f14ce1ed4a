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

//! Pluggable calculation strategies and their selection policy.
//!
//! Each strategy is a [`ChangeStrategy`]: a pure mapping from a transaction
//! and a currency to a [`ChangeResult`], plus a self-reported applicability
//! predicate. The [`StrategySelector`] holds strategies in priority order
//! and dispatches to the first one whose predicate accepts the transaction.

use crate::change::ChangeResult;
use crate::currency::Currency;
use crate::error::ConfigError;
use crate::minimal::MinimalCountStrategy;
use crate::randomized::RandomizedStrategy;
use crate::transaction::Transaction;
use serde::Serialize;
use std::sync::Arc;

/// Configuration selecting when the randomized strategy becomes eligible.
///
/// The randomized strategy applies to change amounts evenly divisible by
/// `divisor`; everything else routes to the deterministic strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecialRule {
    divisor: i64,
    description: String,
}

impl SpecialRule {
    /// Creates a rule with a positive divisor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDivisor`] if the divisor is zero or negative.
    pub fn new(divisor: i64, description: impl Into<String>) -> Result<Self, ConfigError> {
        if divisor <= 0 {
            return Err(ConfigError::InvalidDivisor(divisor));
        }
        Ok(Self {
            divisor,
            description: description.into(),
        })
    }

    pub fn divisor(&self) -> i64 {
        self.divisor
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether this rule selects the given change amount.
    pub fn matches(&self, change: i64) -> bool {
        change % self.divisor == 0
    }
}

/// A pluggable algorithm mapping a change amount to a valid breakdown.
///
/// Implementations must be safe to share across concurrent calls; any
/// internal mutable state (such as the randomized strategy's cache) is the
/// implementation's responsibility to synchronize.
pub trait ChangeStrategy: Send + Sync {
    /// Computes the denomination breakdown for the transaction's change.
    fn calculate(&self, transaction: &Transaction, currency: &Currency) -> ChangeResult;

    /// Whether this strategy elects to handle the transaction.
    fn applies_to(&self, transaction: &Transaction, rule: Option<&SpecialRule>) -> bool;
}

/// Ordered strategy list with first-match dispatch.
///
/// The default order is randomized first, minimal second, so the special
/// rule is consulted before the deterministic path. Newly registered
/// strategies go to the front (highest priority). If no strategy applies,
/// a minimal-count strategy held as absolute fallback answers; with the
/// default pair this cannot happen, since their predicates are complementary.
pub struct StrategySelector {
    strategies: Vec<Arc<dyn ChangeStrategy>>,
    fallback: Arc<MinimalCountStrategy>,
}

impl StrategySelector {
    /// Selector with the default strategy pair.
    pub fn new() -> Self {
        Self::with_randomized(Arc::new(RandomizedStrategy::new()))
    }

    /// Selector with a caller-supplied randomized strategy.
    ///
    /// Used when the randomized strategy needs a pinned seed or a shared
    /// instance; the minimal strategy is still registered behind it.
    pub fn with_randomized(randomized: Arc<RandomizedStrategy>) -> Self {
        let minimal = Arc::new(MinimalCountStrategy::new());
        Self {
            strategies: vec![
                randomized as Arc<dyn ChangeStrategy>,
                Arc::clone(&minimal) as Arc<dyn ChangeStrategy>,
            ],
            fallback: minimal,
        }
    }

    /// Registers a strategy at the front of the evaluation order.
    pub fn register(&mut self, strategy: Arc<dyn ChangeStrategy>) {
        self.strategies.insert(0, strategy);
    }

    /// Returns the first strategy whose predicate accepts the transaction.
    pub fn select(
        &self,
        transaction: &Transaction,
        rule: Option<&SpecialRule>,
    ) -> Arc<dyn ChangeStrategy> {
        for strategy in &self.strategies {
            if strategy.applies_to(transaction, rule) {
                return Arc::clone(strategy);
            }
        }
        Arc::clone(&self.fallback) as Arc<dyn ChangeStrategy>
    }

    /// Number of registered strategies.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for StrategySelector {
    fn default() -> Self {
        Self::new()
    }
}
