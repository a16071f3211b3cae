// Copyright (c) 2025 Centime Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let user_filter = sub.get_one::<i64>("user").copied();

    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let mut sql = String::from(
        "SELECT user_id, date, amount, category, description, running_balance
         FROM transactions WHERE 1=1",
    );
    if user_filter.is_some() {
        sql.push_str(" AND user_id=?1");
    }
    sql.push_str(" ORDER BY user_id, date, id");

    let mut stmt = conn.prepare(&sql)?;
    let map_row = |r: &rusqlite::Row| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, Option<String>>(4)?,
            r.get::<_, String>(5)?,
        ))
    };
    let mut rows = Vec::new();
    if let Some(uid) = user_filter {
        for row in stmt.query_map([uid], map_row)? {
            rows.push(row?);
        }
    } else {
        for row in stmt.query_map([], map_row)? {
            rows.push(row?);
        }
    }

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "user_id",
                "date",
                "amount",
                "category",
                "description",
                "running_balance",
            ])?;
            for (uid, d, amt, cat, desc, bal) in rows {
                wtr.write_record([
                    uid.to_string(),
                    d,
                    amt,
                    cat,
                    desc.unwrap_or_default(),
                    bal,
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for (uid, d, amt, cat, desc, bal) in rows {
                items.push(json!({
                    "user_id": uid, "date": d, "amount": amt, "category": cat,
                    "description": desc, "running_balance": bal
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => unreachable!(),
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
