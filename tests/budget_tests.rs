// Copyright (c) 2025 Centime Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centime::commands::budgets::{self, load_budget};
use centime::models::BudgetPeriod;
use centime::{cli, db};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute("INSERT INTO users DEFAULT VALUES", []).unwrap();
    conn
}

fn run_budget(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["centime", "budget"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("budget", budget_m)) => budgets::handle(conn, budget_m),
        _ => panic!("no budget subcommand"),
    }
}

#[test]
fn set_stores_limits_and_enables_budget() {
    let conn = setup();
    run_budget(
        &conn,
        &[
            "set",
            "--user",
            "1",
            "--period",
            "monthly",
            "--total",
            "2000",
            "--auto-renew",
            "--category",
            "Food & Dining=600",
            "--category",
            "Transportation=300",
        ],
    )
    .unwrap();

    let b = load_budget(&conn, 1, BudgetPeriod::Monthly).unwrap();
    assert!(b.enabled);
    assert!(b.auto_renew);
    assert_eq!(b.total_budget, Decimal::from(2000));
    assert_eq!(b.categories.len(), 2);
    assert_eq!(b.categories["Food & Dining"], Decimal::from(600));
    assert_eq!(b.categories["Transportation"], Decimal::from(300));

    // The other period stays untouched.
    let yearly = load_budget(&conn, 1, BudgetPeriod::Yearly).unwrap();
    assert!(!yearly.enabled);
    assert!(yearly.categories.is_empty());
}

#[test]
fn set_replaces_existing_budget() {
    let conn = setup();
    run_budget(
        &conn,
        &["set", "--user", "1", "--period", "yearly", "--total", "24000", "--category", "Other=100"],
    )
    .unwrap();
    run_budget(
        &conn,
        &["set", "--user", "1", "--period", "yearly", "--total", "30000"],
    )
    .unwrap();

    let b = load_budget(&conn, 1, BudgetPeriod::Yearly).unwrap();
    assert_eq!(b.total_budget, Decimal::from(30000));
    assert!(b.categories.is_empty());
    assert!(!b.auto_renew);
}

#[test]
fn rm_resets_to_empty_shape() {
    let conn = setup();
    run_budget(
        &conn,
        &[
            "set", "--user", "1", "--period", "monthly", "--total", "1500", "--auto-renew",
            "--category", "Other=200",
        ],
    )
    .unwrap();
    run_budget(&conn, &["rm", "--user", "1", "--period", "monthly"]).unwrap();

    let b = load_budget(&conn, 1, BudgetPeriod::Monthly).unwrap();
    assert!(!b.enabled);
    assert!(!b.auto_renew);
    assert_eq!(b.total_budget, Decimal::ZERO);
    assert!(b.categories.is_empty());
}

#[test]
fn malformed_category_limit_is_rejected() {
    let conn = setup();
    let err = run_budget(
        &conn,
        &["set", "--user", "1", "--period", "monthly", "--total", "100", "--category", "Food"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("NAME=AMOUNT"));
}

#[test]
fn invalid_period_is_rejected() {
    let conn = setup();
    let err = run_budget(
        &conn,
        &["set", "--user", "1", "--period", "weekly", "--total", "100"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("monthly|yearly"));
}
