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

//! Error types for change calculation and currency configuration.

use thiserror::Error;

/// Change calculation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChangeError {
    /// Amount owed or amount paid is negative
    #[error("invalid amount (must not be negative)")]
    InvalidAmount,

    /// Amount paid does not cover the amount owed
    #[error("insufficient payment")]
    InsufficientPayment,
}

/// Currency configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Currency has no denominations
    #[error("currency must define at least one denomination")]
    EmptyCurrency,

    /// Two denominations share the same name
    #[error("duplicate denomination: {0}")]
    DuplicateDenomination(String),

    /// Denomination value is zero or negative
    #[error("denomination {0} must have a positive value")]
    InvalidDenominationValue(String),

    /// Divisor is zero or negative
    #[error("invalid divisor {0} (must be positive)")]
    InvalidDivisor(i64),

    /// Requested currency code is not registered
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),
}
