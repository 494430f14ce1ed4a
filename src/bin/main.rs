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

use cashier_rs::{
    ChangeCalculator, ChangeError, CurrencyRegistry, RandomizedStrategy, SpecialRule,
    StrategySelector,
};
use clap::Parser;
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use thiserror::Error;

/// Cashier - Compute change breakdowns for transaction CSV files
///
/// Reads (owed, paid) pairs from a CSV file and prints one formatted change
/// line per pair to stdout, in input order.
#[derive(Parser, Debug)]
#[command(name = "cashier-rs")]
#[command(about = "A change calculator that processes transaction CSVs", long_about = None)]
struct Args {
    /// Path to CSV file with transactions
    ///
    /// Expected format: owed,paid
    /// Example: cargo run -- transactions.csv > change.txt
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Currency code to calculate change in
    #[arg(long, default_value = "USD")]
    currency: String,

    /// Divisor for the special randomized rule
    ///
    /// When set, change amounts evenly divisible by this value are broken
    /// down by the randomized strategy instead of the minimal one.
    #[arg(long)]
    divisor: Option<i64>,

    /// Seed for the randomized strategy, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Resolve the currency through the registry; unknown codes are
    // configuration errors, not engine errors.
    let registry = CurrencyRegistry::with_defaults();
    let currency = match registry.lookup(&args.currency) {
        Ok(currency) => currency,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let rule = match args.divisor {
        Some(divisor) => match SpecialRule::new(divisor, format!("divisible by {divisor}")) {
            Ok(rule) => Some(rule),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => None,
    };

    let calculator = build_calculator(currency, rule, args.seed);

    // Open input file
    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    // Process the batch; any parse or engine error aborts the whole run.
    let lines = match process_batch(BufReader::new(file), &calculator) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("Error processing transactions: {}", e);
            process::exit(1);
        }
    };

    for line in lines {
        println!("{}", line);
    }
}

/// Builds the calculator, pinning the randomized strategy when seeded.
fn build_calculator(
    currency: Arc<cashier_rs::Currency>,
    rule: Option<SpecialRule>,
    seed: Option<u64>,
) -> ChangeCalculator {
    let selector = match seed {
        Some(seed) => StrategySelector::with_randomized(Arc::new(RandomizedStrategy::seeded(seed))),
        None => StrategySelector::new(),
    };
    ChangeCalculator::with_selector(currency, rule, selector)
}

/// An error aborting the batch: either the CSV could not be parsed or a
/// pair failed validation.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("{0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Change(#[from] ChangeError),
}

/// Raw CSV record matching the input format.
///
/// Fields: `owed, paid` as decimal major-currency amounts.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    owed: Decimal,
    paid: Decimal,
}

/// Processes (owed, paid) pairs from a CSV reader into formatted lines.
///
/// The batch is all-or-nothing: a malformed row or an invalid pair aborts
/// processing and nothing is emitted. Output preserves input order; an
/// exact payment produces an empty line.
///
/// # CSV Format
///
/// Expected columns: `owed, paid`, whitespace-trimmed, with a header row.
///
/// ```csv
/// owed,paid
/// 2.12,3.00
/// 1.97,2.00
/// ```
pub fn process_batch<R: Read>(
    reader: R,
    calculator: &ChangeCalculator,
) -> Result<Vec<String>, BatchError> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All) // Handle whitespace in fields like " 2.12 "
        .has_headers(true) // Skip first row as header
        .from_reader(reader);

    let mut pairs = Vec::new();
    for result in rdr.deserialize::<CsvRecord>() {
        let record = result?;
        pairs.push((record.owed, record.paid));
    }

    Ok(calculator.calculate_change_batch(&pairs)?)
}
