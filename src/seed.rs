// Copyright (c) 2025 Centime Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Demo ledger seeding: a realistic mix of income and spending, one
//! transaction every 3 days going backwards from today.

use anyhow::Result;
use chrono::{Duration, NaiveDate, NaiveTime};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::ledger;
use crate::store::SqliteLedger;
use crate::utils::parse_decimal;

pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Income",
    "Bills & Utilities",
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Healthcare",
    "Other",
];

// (amount, category, description)
const MOCK_TRANSACTIONS: &[(&str, &str, &str)] = &[
    ("5000.00", "Income", "Monthly salary"),
    ("4800.00", "Income", "Monthly salary"),
    ("350.00", "Income", "Freelance project"),
    ("4800.00", "Income", "Monthly salary"),
    ("-1200.00", "Bills & Utilities", "Monthly rent"),
    ("-1200.00", "Bills & Utilities", "Monthly rent"),
    ("-1200.00", "Bills & Utilities", "Monthly rent"),
    ("-140.00", "Bills & Utilities", "Electricity bill"),
    ("-165.00", "Bills & Utilities", "Gas bill"),
    ("-80.00", "Bills & Utilities", "Internet & phone"),
    ("-125.75", "Food & Dining", "Weekly groceries"),
    ("-95.25", "Food & Dining", "Weekly groceries"),
    ("-110.30", "Food & Dining", "Grocery shopping"),
    ("-135.75", "Food & Dining", "Weekly groceries"),
    ("-85.50", "Food & Dining", "Restaurant dinner"),
    ("-28.75", "Food & Dining", "Coffee shop"),
    ("-125.40", "Food & Dining", "Grocery shopping"),
    ("-95.60", "Food & Dining", "Weekly groceries"),
    ("-45.75", "Transportation", "Gas station"),
    ("-60.00", "Transportation", "Uber rides"),
    ("-42.50", "Transportation", "Gas station"),
    ("-199.99", "Shopping", "Winter jacket"),
    ("-89.99", "Shopping", "Online shopping"),
    ("-180.00", "Shopping", "Clothing store"),
    ("-320.50", "Shopping", "Electronics"),
    ("-35.50", "Entertainment", "Movie tickets"),
    ("-52.80", "Entertainment", "Concert tickets"),
    ("-75.25", "Entertainment", "Dinner with friends"),
    ("-220.00", "Healthcare", "Dental checkup"),
    ("-150.25", "Other", "Miscellaneous"),
];

fn default_monthly_limits() -> BTreeMap<String, Decimal> {
    [
        ("Food & Dining", 600),
        ("Transportation", 300),
        ("Bills & Utilities", 800),
        ("Entertainment", 200),
        ("Shopping", 400),
        ("Healthcare", 250),
        ("Other", 200),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), Decimal::from(v)))
    .collect()
}

/// Populate a fresh user with the demo ledger, the default category set,
/// and an enabled monthly budget, then rebuild all running balances.
/// Returns the user's final balance.
pub fn seed_user(conn: &Connection, user_id: i64, today: NaiveDate) -> Result<Decimal> {
    for name in DEFAULT_CATEGORIES {
        conn.execute(
            "INSERT OR IGNORE INTO categories(user_id, name) VALUES (?1, ?2)",
            params![user_id, name],
        )?;
    }

    let limits = default_monthly_limits();
    let total: Decimal = limits.values().copied().sum();
    conn.execute(
        "INSERT INTO budgets(user_id, period, enabled, total_budget, auto_renew, categories)
         VALUES (?1, 'monthly', 1, ?2, 1, ?3)
         ON CONFLICT(user_id, period) DO UPDATE SET
           enabled=excluded.enabled, total_budget=excluded.total_budget,
           auto_renew=excluded.auto_renew, categories=excluded.categories",
        params![
            user_id,
            total.to_string(),
            serde_json::to_string(&limits)?
        ],
    )?;

    let store = SqliteLedger::new(conn);
    let count = MOCK_TRANSACTIONS.len() as i64;
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
    for (i, &(amount, category, description)) in MOCK_TRANSACTIONS.iter().enumerate() {
        // Oldest entry first: spread one transaction per 3 days back from today.
        let date = (today - Duration::days(3 * (count - 1 - i as i64))).and_time(noon);
        store.insert(user_id, date, parse_decimal(amount)?, category, Some(description))?;
    }

    ledger::recalculate_from(&store, user_id, None, None)
}
