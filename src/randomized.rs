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

//! Randomized mathematically-valid strategy.
//!
//! Where the minimal strategy always hands back the same breakdown, this one
//! searches for *some* valid combination by biased rejection sampling. It is
//! not minimal, only correct: every accepted candidate's counts sum exactly
//! to the required change. Successful searches are cached so an input is
//! answered identically forever once seen.

use crate::cache::ChangeCache;
use crate::change::ChangeResult;
use crate::currency::{Currency, Denomination};
use crate::minimal::MinimalCountStrategy;
use crate::strategy::{ChangeStrategy, SpecialRule};
use crate::transaction::Transaction;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Rejection-sampling strategy with a bounded attempt budget.
///
/// Each calculation probes the cache first; on a miss it runs up to
/// [`ATTEMPT_BUDGET`](Self::ATTEMPT_BUDGET) sampling attempts, cycling
/// through three heuristics in a fixed order (attempt `i` uses heuristic
/// `i % 3`):
///
/// 1. large-biased: descending value order, count drawn from 60-90% of the
///    locally available maximum;
/// 2. uniform: descending value order, count drawn uniformly up to the
///    local maximum;
/// 3. small-biased: ascending value order, with probability 0.7 the count
///    comes from the upper half of the local range.
///
/// The first candidate whose counts sum exactly to the change is cached and
/// returned. If the budget runs out, the call falls back to the minimal
/// strategy; that fallback result is deliberately not cached, so a later
/// call with the same key runs the search again until a sampled success
/// lands in the cache.
///
/// The RNG is instance-owned and seedable. Two instances seeded identically
/// and driven with the same call sequence produce identical results; there
/// is no process-wide randomness override.
pub struct RandomizedStrategy {
    rng: Mutex<StdRng>,
    cache: ChangeCache,
    fallback: MinimalCountStrategy,
}

impl RandomizedStrategy {
    /// Total sampling attempts per cache miss, across all heuristics.
    pub const ATTEMPT_BUDGET: usize = 500;

    /// Strategy with an entropy-seeded RNG and default cache capacity.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Strategy with a pinned seed for deterministic replay.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Strategy with a caller-supplied RNG.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            cache: ChangeCache::new(),
            fallback: MinimalCountStrategy::new(),
        }
    }

    /// Number of cached results. Maintenance surface, not part of the
    /// calculation contract.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Cache capacity.
    pub fn cache_capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Drops all cached results.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Heuristic (a): lean on the larger denominations.
    ///
    /// Descending order; each count is drawn from 60-90% of the local
    /// maximum `remaining / value`.
    fn sample_large_biased(
        rng: &mut StdRng,
        denominations: &[&Denomination],
        change: i64,
    ) -> Vec<(String, u64)> {
        let mut remaining = change;
        let mut counts = Vec::new();

        for denomination in denominations {
            let max = remaining / denomination.value();
            if max == 0 {
                continue;
            }
            // Scaled through i128; max can approach i64::MAX for a unit
            // denomination.
            let low = (i128::from(max) * 60 / 100) as i64;
            let high = (i128::from(max) * 90 / 100) as i64;
            let count = rng.gen_range(low..=high);
            if count > 0 {
                counts.push((denomination.name().to_string(), count as u64));
                remaining -= count * denomination.value();
            }
        }

        counts
    }

    /// Heuristic (b): uniform count per denomination.
    fn sample_uniform(
        rng: &mut StdRng,
        denominations: &[&Denomination],
        change: i64,
    ) -> Vec<(String, u64)> {
        let mut remaining = change;
        let mut counts = Vec::new();

        for denomination in denominations {
            let max = remaining / denomination.value();
            if max == 0 {
                continue;
            }
            let count = rng.gen_range(0..=max);
            if count > 0 {
                counts.push((denomination.name().to_string(), count as u64));
                remaining -= count * denomination.value();
            }
        }

        counts
    }

    /// Heuristic (c): lean on the smaller denominations.
    ///
    /// Ascending order; with probability 0.7 the count is drawn from the
    /// upper half of the local range, otherwise uniformly.
    fn sample_small_biased(
        rng: &mut StdRng,
        denominations: &[&Denomination],
        change: i64,
    ) -> Vec<(String, u64)> {
        let mut remaining = change;
        let mut counts = Vec::new();

        for denomination in denominations.iter().rev() {
            let max = remaining / denomination.value();
            if max == 0 {
                continue;
            }
            let count = if rng.gen_bool(0.7) {
                // max - max / 2 == ceil(max / 2), without overflowing at
                // max == i64::MAX.
                rng.gen_range(max - max / 2..=max)
            } else {
                rng.gen_range(0..=max)
            };
            if count > 0 {
                counts.push((denomination.name().to_string(), count as u64));
                remaining -= count * denomination.value();
            }
        }

        counts
    }

    /// A candidate is valid only if its counts sum exactly to the change.
    fn is_valid(candidate: &[(String, u64)], currency: &Currency, change: i64) -> bool {
        let sum: i64 = candidate
            .iter()
            .filter_map(|(name, count)| {
                currency
                    .denominations()
                    .iter()
                    .find(|d| d.name() == name.as_str())
                    .map(|d| d.value() * (*count as i64))
            })
            .sum();
        sum == change
    }
}

impl Default for RandomizedStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeStrategy for RandomizedStrategy {
    fn calculate(&self, transaction: &Transaction, currency: &Currency) -> ChangeResult {
        let change = transaction.change();

        // Cache probe first: identical input always yields the identical
        // result once cached, regardless of the randomness source.
        if let Some(counts) = self.cache.get(change, currency.code()) {
            return ChangeResult::from_counts(change, counts);
        }

        let denominations = currency.denominations_desc();
        let mut rng = self.rng.lock();

        for attempt in 0..Self::ATTEMPT_BUDGET {
            let candidate = match attempt % 3 {
                0 => Self::sample_large_biased(&mut rng, &denominations, change),
                1 => Self::sample_uniform(&mut rng, &denominations, change),
                _ => Self::sample_small_biased(&mut rng, &denominations, change),
            };

            if Self::is_valid(&candidate, currency, change) {
                drop(rng);
                self.cache.insert(change, currency.code(), candidate.clone());
                return ChangeResult::from_counts(change, candidate);
            }
        }
        drop(rng);

        // Budget exhausted: answer with the minimal breakdown for this call
        // only. Not cached under the randomized key.
        self.fallback.calculate(transaction, currency)
    }

    /// Applies only when a rule is configured and the change matches it.
    fn applies_to(&self, transaction: &Transaction, rule: Option<&SpecialRule>) -> bool {
        rule.is_some_and(|rule| rule.matches(transaction.change()))
    }
}
