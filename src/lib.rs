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

//! # Cashier
//!
//! This library computes the denomination breakdown ("change") owed for a
//! transaction, given an amount due and an amount paid in a configurable
//! currency.
//!
//! ## Core Components
//!
//! - [`ChangeCalculator`]: Entry point validating inputs and dispatching to a strategy
//! - [`MinimalCountStrategy`]: Deterministic largest-first greedy breakdown
//! - [`RandomizedStrategy`]: Cached randomized search for an alternative valid breakdown
//! - [`StrategySelector`]: First-match dispatch across registered strategies
//! - [`Currency`] / [`CurrencyRegistry`]: Validated denomination tables
//!
//! ## Example
//!
//! ```
//! use cashier_rs::{ChangeCalculator, Currency};
//! use std::sync::Arc;
//!
//! let calculator = ChangeCalculator::new(Arc::new(Currency::usd()), None);
//!
//! // $3.00 paid against $2.12 owed leaves 88 cents of change.
//! let result = calculator.calculate_change(212, 300).unwrap();
//! assert_eq!(result.total(), 88);
//! assert_eq!(result.formatted(), "3 quarters,1 dime,3 pennies");
//! ```
//!
//! ## Thread Safety
//!
//! All calculation is synchronous CPU work with no internal I/O. A
//! calculator shared behind an `Arc` serves concurrent callers; the
//! randomized strategy serializes access to its own cache and RNG, so no
//! external locking is needed.

pub mod cache;
mod calculator;
mod change;
mod currency;
pub mod error;
mod minimal;
mod randomized;
mod strategy;
mod transaction;

pub use cache::ChangeCache;
pub use calculator::ChangeCalculator;
pub use change::{ChangeResult, format_counts};
pub use currency::{Currency, CurrencyRegistry, Denomination};
pub use error::{ChangeError, ConfigError};
pub use minimal::MinimalCountStrategy;
pub use randomized::RandomizedStrategy;
pub use strategy::{ChangeStrategy, SpecialRule, StrategySelector};
pub use transaction::Transaction;
