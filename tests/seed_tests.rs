// Copyright (c) 2025 Centime Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centime::commands::budgets::load_budget;
use centime::commands::doctor;
use centime::models::BudgetPeriod;
use centime::{db, seed};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute("INSERT INTO users DEFAULT VALUES", []).unwrap();
    conn
}

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn seeded_ledger_is_consistent_and_complete() {
    let conn = setup();
    let today = NaiveDate::from_ymd_opt(2025, 8, 30).unwrap();
    let balance = seed::seed_user(&conn, 1, today).unwrap();

    // 14950 income minus 6259.83 spending across the demo set.
    assert_eq!(balance, d("8690.17"));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions WHERE user_id=1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 30);

    // Every stored balance must match a fresh prefix sum.
    assert!(doctor::audit(&conn).unwrap().is_empty());
}

#[test]
fn seed_spreads_transactions_every_three_days() {
    let conn = setup();
    let today = NaiveDate::from_ymd_opt(2025, 8, 30).unwrap();
    seed::seed_user(&conn, 1, today).unwrap();

    let (oldest, newest): (String, String) = conn
        .query_row(
            "SELECT MIN(date), MAX(date) FROM transactions WHERE user_id=1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    // 30 transactions, 3 days apart: 87 days of history.
    assert_eq!(oldest, "2025-06-04 12:00:00");
    assert_eq!(newest, "2025-08-30 12:00:00");
}

#[test]
fn seed_installs_categories_and_monthly_budget() {
    let conn = setup();
    let today = NaiveDate::from_ymd_opt(2025, 8, 30).unwrap();
    seed::seed_user(&conn, 1, today).unwrap();

    let cats: i64 = conn
        .query_row("SELECT COUNT(*) FROM categories WHERE user_id=1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(cats, seed::DEFAULT_CATEGORIES.len() as i64);

    let b = load_budget(&conn, 1, BudgetPeriod::Monthly).unwrap();
    assert!(b.enabled);
    assert!(b.auto_renew);
    assert_eq!(b.total_budget, d("2750"));
    assert_eq!(b.categories["Food & Dining"], d("600"));
}

#[test]
fn doctor_flags_balance_drift() {
    let conn = setup();
    let today = NaiveDate::from_ymd_opt(2025, 8, 30).unwrap();
    seed::seed_user(&conn, 1, today).unwrap();

    conn.execute(
        "UPDATE transactions SET running_balance='123.45' WHERE id=5",
        [],
    )
    .unwrap();
    let issues = doctor::audit(&conn).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].0, "balance_drift");
    assert!(issues[0].1.contains("tx 5"));
}

#[test]
fn doctor_flags_zero_amounts() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(user_id, date, amount, category, running_balance)
         VALUES (1, '2025-01-01 00:00:00', '0', 'Other', '0')",
        [],
    )
    .unwrap();
    let issues = doctor::audit(&conn).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].0, "zero_amount");
}
