// Copyright (c) 2025 Centime Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, LedgerError};
use crate::store::SqliteLedger;
use crate::utils::{
    ensure_user, fmt_datetime, maybe_print_json, parse_datetime, parse_decimal, pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("resync", sub)) => resync(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = *sub.get_one::<i64>("user").unwrap();
    ensure_user(conn, user_id)?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    ledger::validate_amount(amount)?;
    let category = sub.get_one::<String>("category").unwrap();
    let description = sub.get_one::<String>("description").map(|s| s.as_str());
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_datetime(s)?,
        None => chrono::Local::now().naive_local(),
    };

    let store = SqliteLedger::new(conn);
    let id = store.insert(user_id, date, amount, category, description)?;
    let balance = ledger::after_insert(&store, user_id, date)?;
    println!(
        "Recorded {} '{}' on {} (tx {}, balance {})",
        amount,
        category,
        fmt_datetime(date),
        id,
        balance
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.description.clone(),
                    r.running_balance.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Amount", "Category", "Description", "Balance"],
                rows,
            )
        );
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = *sub.get_one::<i64>("user").unwrap();
    ensure_user(conn, user_id)?;
    let id = *sub.get_one::<i64>("id").unwrap();

    let store = SqliteLedger::new(conn);
    let existing = store
        .get(user_id, id)?
        .ok_or(LedgerError::TransactionNotFound(id))?;

    let amount = match sub.get_one::<String>("amount") {
        Some(s) => parse_decimal(s)?,
        None => existing.amount,
    };
    ledger::validate_amount(amount)?;
    let category = sub
        .get_one::<String>("category")
        .cloned()
        .unwrap_or(existing.category);
    let description = sub
        .get_one::<String>("description")
        .cloned()
        .or(existing.description);
    let new_date = match sub.get_one::<String>("date") {
        Some(s) => parse_datetime(s)?,
        None => existing.date,
    };

    store.update_fields(id, new_date, amount, &category, description.as_deref())?;
    let balance = ledger::after_update(&store, user_id, existing.date, new_date)?;
    println!("Updated tx {} (balance {})", id, balance);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = *sub.get_one::<i64>("user").unwrap();
    ensure_user(conn, user_id)?;
    let id = *sub.get_one::<i64>("id").unwrap();

    let store = SqliteLedger::new(conn);
    let existing = store
        .get(user_id, id)?
        .ok_or(LedgerError::TransactionNotFound(id))?;

    store.delete(id)?;
    let balance = ledger::after_delete(&store, user_id, existing.date, id)?;
    println!("Deleted tx {} (balance {})", id, balance);
    Ok(())
}

fn resync(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = *sub.get_one::<i64>("user").unwrap();
    ensure_user(conn, user_id)?;
    let store = SqliteLedger::new(conn);
    let balance = ledger::recalculate_from(&store, user_id, None, None)?;
    println!("Rebuilt running balances for user {} (balance {})", user_id, balance);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub running_balance: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let user_id = *sub.get_one::<i64>("user").unwrap();
    ensure_user(conn, user_id)?;
    let limit = sub.get_one::<usize>("limit").copied();
    let store = SqliteLedger::new(conn);
    let data = store
        .list_desc(user_id, limit)?
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: fmt_datetime(t.date),
            amount: t.amount.to_string(),
            category: t.category,
            description: t.description.unwrap_or_default(),
            running_balance: t.running_balance.to_string(),
        })
        .collect();
    Ok(data)
}
