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

//! Property-based tests for the change engine.
//!
//! These tests verify invariants that should hold for any valid
//! (owed, paid) pair, under both strategies.

use cashier_rs::{
    ChangeCalculator, ChangeError, ChangeResult, Currency, RandomizedStrategy, SpecialRule,
    StrategySelector,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

// =============================================================================
// Arbitrary Strategies
// =============================================================================

/// Generate a valid (owed, paid) pair with paid >= owed >= 0, in cents.
fn arb_owed_paid() -> impl Strategy<Value = (i64, i64)> {
    (0i64..=1_000_000, 0i64..=1_000_000)
        .prop_map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
}

/// Sum of count * value over a result's denominations, against the USD table.
fn usd_sum(result: &ChangeResult) -> i64 {
    let currency = Currency::usd();
    result
        .denominations()
        .iter()
        .map(|(name, count)| {
            currency
                .denominations()
                .iter()
                .find(|d| d.name() == name.as_str())
                .unwrap()
                .value()
                * (*count as i64)
        })
        .sum()
}

fn usd_calculator() -> ChangeCalculator {
    ChangeCalculator::new(Arc::new(Currency::usd()), None)
}

fn ruled_calculator(divisor: i64, seed: u64) -> ChangeCalculator {
    let rule = SpecialRule::new(divisor, format!("divisible by {divisor}")).unwrap();
    let selector = StrategySelector::with_randomized(Arc::new(RandomizedStrategy::seeded(seed)));
    ChangeCalculator::with_selector(Arc::new(Currency::usd()), Some(rule), selector)
}

// =============================================================================
// Correctness Invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Total change equals paid - owed, and counts sum to the total.
    #[test]
    fn totals_and_sums_agree((owed, paid) in arb_owed_paid()) {
        let calculator = usd_calculator();
        let result = calculator.calculate_change(owed, paid).unwrap();

        prop_assert_eq!(result.total(), paid - owed);
        prop_assert_eq!(usd_sum(&result), result.total());
    }

    /// The sum invariant also holds far beyond the u32 count range.
    #[test]
    fn large_totals_and_sums_agree(paid in 1_000_000i64..=2_000_000_000_000) {
        let calculator = usd_calculator();
        let result = calculator.calculate_change(0, paid).unwrap();

        prop_assert_eq!(result.total(), paid);
        prop_assert_eq!(usd_sum(&result), paid);
    }

    /// No zero-count denomination ever appears in a result.
    #[test]
    fn zero_counts_never_appear((owed, paid) in arb_owed_paid()) {
        let calculator = usd_calculator();
        let result = calculator.calculate_change(owed, paid).unwrap();

        prop_assert!(result.denominations().iter().all(|(_, count)| *count > 0));
    }

    /// Exact payment yields the empty result for any amount and any rule.
    #[test]
    fn zero_change_is_idempotent(amount in 0i64..=1_000_000, divisor in 1i64..=9) {
        let plain = usd_calculator();
        let ruled = ruled_calculator(divisor, 42);

        prop_assert_eq!(plain.calculate_change(amount, amount).unwrap(), ChangeResult::empty());
        prop_assert_eq!(ruled.calculate_change(amount, amount).unwrap(), ChangeResult::empty());
    }

    /// Minimal strategy output is stable across repeated calls.
    #[test]
    fn minimal_is_deterministic((owed, paid) in arb_owed_paid()) {
        let calculator = usd_calculator();
        let first = calculator.calculate_change(owed, paid).unwrap();
        let second = calculator.calculate_change(owed, paid).unwrap();
        prop_assert_eq!(first, second);
    }
}

// =============================================================================
// Randomized Strategy Invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// The randomized path returns valid (not necessarily minimal) results.
    #[test]
    fn randomized_results_are_valid(
        change in (1i64..=10_000).prop_map(|n| n * 3),
        seed in any::<u64>(),
    ) {
        let calculator = ruled_calculator(3, seed);
        let result = calculator.calculate_change(0, change).unwrap();

        prop_assert_eq!(result.total(), change);
        prop_assert_eq!(usd_sum(&result), change);
    }

    /// Both strategies agree on the total for the same input.
    #[test]
    fn strategies_agree_on_totals(
        change in (1i64..=10_000).prop_map(|n| n * 3),
        seed in any::<u64>(),
    ) {
        let ruled = ruled_calculator(3, seed);
        let plain = usd_calculator();

        let randomized = ruled.calculate_change(0, change).unwrap();
        let minimal = plain.calculate_change(0, change).unwrap();
        prop_assert_eq!(randomized.total(), minimal.total());
    }

    /// Routing: divisible change goes randomized, the rest stays minimal.
    /// Minimal-routed results are byte-identical to the plain calculator's.
    #[test]
    fn rule_only_diverts_divisible_change(
        (owed, paid) in arb_owed_paid(),
        divisor in 2i64..=9,
    ) {
        let ruled = ruled_calculator(divisor, 42);
        let plain = usd_calculator();

        let change = paid - owed;
        if change > 0 && change % divisor != 0 {
            prop_assert_eq!(
                ruled.calculate_change(owed, paid).unwrap(),
                plain.calculate_change(owed, paid).unwrap()
            );
        }
    }
}

// =============================================================================
// Validation Invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Any negative amount is rejected as InvalidAmount.
    #[test]
    fn negative_amounts_rejected(owed in i64::MIN..0, paid in 0i64..=1_000_000) {
        let calculator = usd_calculator();
        prop_assert_eq!(
            calculator.calculate_change(owed, paid),
            Err(ChangeError::InvalidAmount)
        );
        prop_assert_eq!(
            calculator.calculate_change(paid, owed),
            Err(ChangeError::InvalidAmount)
        );
    }

    /// Underpayment is rejected as InsufficientPayment.
    #[test]
    fn underpayment_rejected((paid, owed) in arb_owed_paid()) {
        prop_assume!(paid < owed);
        let calculator = usd_calculator();
        prop_assert_eq!(
            calculator.calculate_change(owed, paid),
            Err(ChangeError::InsufficientPayment)
        );
    }
}

// =============================================================================
// Decimal Conversion Invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Whole-cent decimals convert losslessly, so the batch path and the
    /// minor-unit path agree.
    #[test]
    fn batch_matches_minor_unit_path((owed, paid) in arb_owed_paid()) {
        let calculator = usd_calculator();
        let pairs = [(Decimal::new(owed, 2), Decimal::new(paid, 2))];

        let lines = calculator.calculate_change_batch(&pairs).unwrap();
        let direct = calculator.calculate_change(owed, paid).unwrap();
        prop_assert_eq!(lines, vec![direct.formatted().to_string()]);
    }

    /// Batch output preserves input order and length.
    #[test]
    fn batch_preserves_shape(pairs in prop::collection::vec(arb_owed_paid(), 0..20)) {
        let calculator = usd_calculator();
        let decimal_pairs: Vec<(Decimal, Decimal)> = pairs
            .iter()
            .map(|(owed, paid)| (Decimal::new(*owed, 2), Decimal::new(*paid, 2)))
            .collect();

        let lines = calculator.calculate_change_batch(&decimal_pairs).unwrap();
        prop_assert_eq!(lines.len(), pairs.len());

        for ((owed, paid), line) in pairs.iter().zip(&lines) {
            let direct = calculator.calculate_change(*owed, *paid).unwrap();
            prop_assert_eq!(direct.formatted(), line.as_str());
        }
    }
}
