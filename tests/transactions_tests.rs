// Copyright (c) 2025 Centime Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centime::{cli, commands::transactions, db};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute("INSERT INTO users DEFAULT VALUES", []).unwrap();
    conn
}

fn run_tx(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["centime", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => transactions::handle(conn, tx_m),
        _ => panic!("no tx subcommand"),
    }
}

#[test]
fn add_then_list_shows_newest_first_with_balances() {
    let conn = setup();
    run_tx(
        &conn,
        &[
            "add", "--user", "1", "--amount", "100", "--category", "Income", "--date",
            "2025-01-01",
        ],
    )
    .unwrap();
    run_tx(
        &conn,
        &[
            "add", "--user", "1", "--amount", "-30", "--category", "Food & Dining", "--date",
            "2025-01-03",
        ],
    )
    .unwrap();

    let matches = cli::build_cli().get_matches_from(["centime", "tx", "list", "--user", "1"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&conn, list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date, "2025-01-03 00:00:00");
            assert_eq!(rows[0].running_balance, "70");
            assert_eq!(rows[1].running_balance, "100");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    for day in 1..=3 {
        run_tx(
            &conn,
            &[
                "add",
                "--user",
                "1",
                "--amount",
                "-10",
                "--category",
                "Other",
                "--date",
                &format!("2025-01-0{}", day),
            ],
        )
        .unwrap();
    }

    let matches =
        cli::build_cli().get_matches_from(["centime", "tx", "list", "--user", "1", "--limit", "2"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&conn, list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date, "2025-01-03 00:00:00");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn edit_moves_date_and_rebalances() {
    let conn = setup();
    run_tx(
        &conn,
        &["add", "--user", "1", "--amount", "10", "--category", "Other", "--date", "2025-01-01"],
    )
    .unwrap();
    run_tx(
        &conn,
        &["add", "--user", "1", "--amount", "20", "--category", "Other", "--date", "2025-01-03"],
    )
    .unwrap();
    run_tx(
        &conn,
        &["add", "--user", "1", "--amount", "40", "--category", "Other", "--date", "2025-01-05"],
    )
    .unwrap();

    // Move the last transaction between the first two.
    run_tx(
        &conn,
        &["edit", "--user", "1", "--id", "3", "--date", "2025-01-02"],
    )
    .unwrap();

    let stored: Vec<String> = conn
        .prepare("SELECT running_balance FROM transactions WHERE user_id=1 ORDER BY date, id")
        .unwrap()
        .query_map([], |r| r.get(0))
        .unwrap()
        .collect::<rusqlite::Result<_>>()
        .unwrap();
    assert_eq!(stored, vec!["10", "50", "70"]);
}

#[test]
fn edit_unknown_transaction_fails_before_recompute() {
    let conn = setup();
    let err = run_tx(
        &conn,
        &["edit", "--user", "1", "--id", "7", "--amount", "5"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("transaction 7 not found"));
}

#[test]
fn rm_recomputes_remaining_suffix() {
    let conn = setup();
    run_tx(
        &conn,
        &["add", "--user", "1", "--amount", "200", "--category", "Income", "--date", "2025-01-01"],
    )
    .unwrap();
    run_tx(
        &conn,
        &["add", "--user", "1", "--amount", "50", "--category", "Other", "--date", "2025-01-02"],
    )
    .unwrap();
    run_tx(
        &conn,
        &["add", "--user", "1", "--amount", "-30", "--category", "Other", "--date", "2025-01-03"],
    )
    .unwrap();

    run_tx(&conn, &["rm", "--user", "1", "--id", "2"]).unwrap();

    let stored: Vec<String> = conn
        .prepare("SELECT running_balance FROM transactions WHERE user_id=1 ORDER BY date, id")
        .unwrap()
        .query_map([], |r| r.get(0))
        .unwrap()
        .collect::<rusqlite::Result<_>>()
        .unwrap();
    assert_eq!(stored, vec!["200", "170"]);
}

#[test]
fn zero_amount_add_is_rejected() {
    let conn = setup();
    let err = run_tx(
        &conn,
        &["add", "--user", "1", "--amount", "0", "--category", "Other"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("non-zero"));
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn unknown_user_is_rejected() {
    let conn = setup();
    let err = run_tx(
        &conn,
        &["add", "--user", "9", "--amount", "5", "--category", "Other"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("user 9 not found"));
}

#[test]
fn resync_rebuilds_a_tampered_ledger() {
    let conn = setup();
    run_tx(
        &conn,
        &["add", "--user", "1", "--amount", "100", "--category", "Income", "--date", "2025-01-01"],
    )
    .unwrap();
    run_tx(
        &conn,
        &["add", "--user", "1", "--amount", "-30", "--category", "Other", "--date", "2025-01-02"],
    )
    .unwrap();
    conn.execute("UPDATE transactions SET running_balance='0'", [])
        .unwrap();

    run_tx(&conn, &["resync", "--user", "1"]).unwrap();

    let stored: Vec<String> = conn
        .prepare("SELECT running_balance FROM transactions WHERE user_id=1 ORDER BY date, id")
        .unwrap()
        .query_map([], |r| r.get(0))
        .unwrap()
        .collect::<rusqlite::Result<_>>()
        .unwrap();
    assert_eq!(stored, vec!["100", "70"]);
}
