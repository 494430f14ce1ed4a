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

//! Currency and denomination configuration.
//!
//! A [`Currency`] is a validated, immutable denomination table constructed
//! once at configuration time and shared read-only by all calculations.
//! The [`CurrencyRegistry`] provides concurrent lookup of currencies by code
//! for the CLI and API layers.

use crate::error::ConfigError;
use dashmap::DashMap;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// A single coin or bill value recognized by a currency.
///
/// Values are expressed in integer minor currency units (e.g. cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Denomination {
    name: String,
    value: i64,
    symbol: Option<String>,
}

impl Denomination {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            symbol: None,
        }
    }

    pub fn with_symbol(name: impl Into<String>, value: i64, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            symbol: Some(symbol.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value in minor currency units.
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.value)
    }
}

/// An immutable currency with its ordered denomination table.
///
/// Construction validates the table: it must be non-empty, denomination
/// names must be unique, and every value must be positive. Source order of
/// denominations is preserved; strategies that need a particular order sort
/// a fresh view via [`Currency::denominations_desc`].
///
/// A table without a 1-minor-unit denomination is accepted. The greedy
/// strategy may then terminate with nonzero remaining change; callers that
/// need the full-coverage guarantee must include a unit denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Currency {
    code: String,
    name: String,
    symbol: String,
    denominations: Vec<Denomination>,
}

impl Currency {
    /// Creates a validated currency.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyCurrency`] - The denomination list is empty.
    /// - [`ConfigError::DuplicateDenomination`] - Two denominations share a name.
    /// - [`ConfigError::InvalidDenominationValue`] - A value is zero or negative.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        denominations: Vec<Denomination>,
    ) -> Result<Self, ConfigError> {
        if denominations.is_empty() {
            return Err(ConfigError::EmptyCurrency);
        }

        let mut seen = HashSet::new();
        for denomination in &denominations {
            if denomination.value <= 0 {
                return Err(ConfigError::InvalidDenominationValue(
                    denomination.name.clone(),
                ));
            }
            if !seen.insert(denomination.name.as_str()) {
                return Err(ConfigError::DuplicateDenomination(
                    denomination.name.clone(),
                ));
            }
        }

        Ok(Self {
            code: code.into(),
            name: name.into(),
            symbol: symbol.into(),
            denominations,
        })
    }

    /// The reference US table: dollar, quarter, dime, nickel, penny.
    pub fn usd() -> Self {
        Self::new(
            "USD",
            "US Dollar",
            "$",
            vec![
                Denomination::with_symbol("dollar", 100, "$"),
                Denomination::new("quarter", 25),
                Denomination::new("dime", 10),
                Denomination::new("nickel", 5),
                Denomination::new("penny", 1),
            ],
        )
        .expect("USD table is statically valid")
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Denominations in their configured source order.
    pub fn denominations(&self) -> &[Denomination] {
        &self.denominations
    }

    /// Denominations sorted by value, largest first.
    ///
    /// Computed fresh per call; sorting is a strategy-local concern and
    /// the stored table keeps its source order.
    pub fn denominations_desc(&self) -> Vec<&Denomination> {
        let mut sorted: Vec<&Denomination> = self.denominations.iter().collect();
        sorted.sort_by(|a, b| b.value.cmp(&a.value));
        sorted
    }

    /// Whether the table includes a 1-minor-unit denomination.
    pub fn has_unit_denomination(&self) -> bool {
        self.denominations.iter().any(|d| d.value == 1)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Concurrent registry of currencies indexed by code.
///
/// Shared read-mostly between the CLI and API layers; registration happens
/// at startup and lookups are lock-free reads afterwards.
#[derive(Debug)]
pub struct CurrencyRegistry {
    currencies: DashMap<String, Arc<Currency>>,
}

impl CurrencyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            currencies: DashMap::new(),
        }
    }

    /// Creates a registry with the default currencies (USD) preregistered.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(Currency::usd());
        registry
    }

    /// Registers a currency under its code, replacing any previous entry.
    pub fn register(&self, currency: Currency) {
        self.currencies
            .insert(currency.code().to_string(), Arc::new(currency));
    }

    /// Retrieves a currency by code.
    pub fn get(&self, code: &str) -> Option<Arc<Currency>> {
        self.currencies.get(code).map(|entry| Arc::clone(&entry))
    }

    /// Retrieves a currency by code, failing for unknown codes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedCurrency`] if the code is not registered.
    pub fn lookup(&self, code: &str) -> Result<Arc<Currency>, ConfigError> {
        self.get(code)
            .ok_or_else(|| ConfigError::UnsupportedCurrency(code.to_string()))
    }

    /// Registered currency codes.
    pub fn codes(&self) -> Vec<String> {
        self.currencies
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }
}

impl Default for CurrencyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
