// Copyright (c) 2025 Centime Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centime::{cli, commands::exporter, db};
use rusqlite::Connection;
use serde_json::json;
use tempfile::tempdir;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute("INSERT INTO users DEFAULT VALUES", []).unwrap();
    conn.execute(
        "INSERT INTO transactions(user_id, date, amount, category, description, running_balance)
         VALUES (1, '2025-01-02 00:00:00', '-12.34', 'Food & Dining', 'Weekly run', '-12.34')",
        [],
    )
    .unwrap();
    conn
}

fn run_export(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["centime", "export", "transactions"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("export", export_m)) => exporter::handle(conn, export_m),
        _ => panic!("no export subcommand"),
    }
}

#[test]
fn export_transactions_writes_pretty_json() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&conn, &["--format", "json", "--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "user_id": 1,
                "date": "2025-01-02 00:00:00",
                "amount": "-12.34",
                "category": "Food & Dining",
                "description": "Weekly run",
                "running_balance": "-12.34"
            }
        ])
    );
}

#[test]
fn export_filters_by_user() {
    let conn = setup();
    conn.execute("INSERT INTO users DEFAULT VALUES", []).unwrap();
    conn.execute(
        "INSERT INTO transactions(user_id, date, amount, category, running_balance)
         VALUES (2, '2025-01-05 00:00:00', '7', 'Other', '7')",
        [],
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&conn, &["--format", "csv", "--out", &out_str, "--user", "2"]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2); // header + one row
    assert!(lines[1].starts_with("2,2025-01-05"));
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    assert!(run_export(&conn, &["--format", "xml", "--out", &out_str]).is_err());
    assert!(!out_path.exists());
}
