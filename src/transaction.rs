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

//! Transaction value object.
//!
//! A [`Transaction`] pairs an amount owed with an amount paid and derives
//! the change once at construction. All amounts are integer minor currency
//! units. Validation happens before construction, so `change >= 0` holds
//! for every live value.

use crate::error::ChangeError;

/// An immutable (owed, paid, change) triple in minor currency units.
///
/// Created fresh per calculation request; never persisted or mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    owed: i64,
    paid: i64,
    change: i64,
}

impl Transaction {
    /// Creates a transaction, validating the amounts.
    ///
    /// # Errors
    ///
    /// - [`ChangeError::InvalidAmount`] - Either amount is negative.
    /// - [`ChangeError::InsufficientPayment`] - `paid` is less than `owed`.
    pub fn new(owed: i64, paid: i64) -> Result<Self, ChangeError> {
        if owed < 0 || paid < 0 {
            return Err(ChangeError::InvalidAmount);
        }
        if paid < owed {
            return Err(ChangeError::InsufficientPayment);
        }

        Ok(Self {
            owed,
            paid,
            change: paid - owed,
        })
    }

    pub fn owed(&self) -> i64 {
        self.owed
    }

    pub fn paid(&self) -> i64 {
        self.paid
    }

    /// `paid - owed`, always non-negative.
    pub fn change(&self) -> i64 {
        self.change
    }
}
