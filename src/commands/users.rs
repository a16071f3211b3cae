// Copyright (c) 2025 Centime Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::seed;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("create", sub)) => create(conn, sub)?,
        Some(("list", _)) => list(conn)?,
        _ => {}
    }
    Ok(())
}

fn create(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    conn.execute("INSERT INTO users DEFAULT VALUES", [])?;
    let user_id = conn.last_insert_rowid();
    if sub.get_flag("seed") {
        let today = chrono::Local::now().date_naive();
        let balance = seed::seed_user(conn, user_id, today)?;
        println!("Created user {} with demo ledger (balance {})", user_id, balance);
    } else {
        println!("Created user {}", user_id);
    }
    Ok(())
}

fn list(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT u.id, u.created_at, COUNT(t.id)
         FROM users u LEFT JOIN transactions t ON t.user_id=u.id
         GROUP BY u.id ORDER BY u.id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, i64>(2)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (id, created, count) = row?;
        data.push(vec![id.to_string(), created, count.to_string()]);
    }
    println!("{}", pretty_table(&["Id", "Created", "Transactions"], data));
    Ok(())
}
