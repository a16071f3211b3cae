// Copyright (c) 2025 Centime Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{ensure_user, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let user_id = *sub.get_one::<i64>("user").unwrap();
            ensure_user(conn, user_id)?;
            let name = sub.get_one::<String>("name").unwrap();
            conn.execute(
                "INSERT OR IGNORE INTO categories(user_id, name) VALUES (?1, ?2)",
                params![user_id, name],
            )?;
            println!("Added category '{}' for user {}", name, user_id);
        }
        Some(("list", sub)) => {
            let user_id = *sub.get_one::<i64>("user").unwrap();
            ensure_user(conn, user_id)?;
            let mut stmt =
                conn.prepare("SELECT name FROM categories WHERE user_id=?1 ORDER BY name")?;
            let rows = stmt.query_map(params![user_id], |r| r.get::<_, String>(0))?;
            let mut data = Vec::new();
            for row in rows {
                data.push(vec![row?]);
            }
            println!("{}", pretty_table(&["Category"], data));
        }
        Some(("rm", sub)) => {
            let user_id = *sub.get_one::<i64>("user").unwrap();
            ensure_user(conn, user_id)?;
            let name = sub.get_one::<String>("name").unwrap();
            conn.execute(
                "DELETE FROM categories WHERE user_id=?1 AND name=?2",
                params![user_id, name],
            )?;
            println!("Removed category '{}' for user {}", name, user_id);
        }
        _ => {}
    }
    Ok(())
}
