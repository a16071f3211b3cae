// Copyright (c) 2025 Centime Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Budget, BudgetPeriod};
use crate::utils::{ensure_user, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = *sub.get_one::<i64>("user").unwrap();
    ensure_user(conn, user_id)?;
    let period = BudgetPeriod::parse(sub.get_one::<String>("period").unwrap())?;
    let total = parse_decimal(sub.get_one::<String>("total").unwrap())?;
    let auto_renew = sub.get_flag("auto-renew");

    let mut limits: BTreeMap<String, Decimal> = BTreeMap::new();
    if let Some(pairs) = sub.get_many::<String>("category") {
        for pair in pairs {
            let (name, amount) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("Invalid category limit '{}', expected NAME=AMOUNT", pair))?;
            limits.insert(name.to_string(), parse_decimal(amount)?);
        }
    }

    conn.execute(
        "INSERT INTO budgets(user_id, period, enabled, total_budget, auto_renew, categories)
         VALUES (?1, ?2, 1, ?3, ?4, ?5)
         ON CONFLICT(user_id, period) DO UPDATE SET
           enabled=excluded.enabled, total_budget=excluded.total_budget,
           auto_renew=excluded.auto_renew, categories=excluded.categories",
        params![
            user_id,
            period.as_str(),
            total.to_string(),
            auto_renew,
            serde_json::to_string(&limits)?
        ],
    )?;
    println!("Budget set for user {} ({}) = {}", user_id, period.as_str(), total);
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = *sub.get_one::<i64>("user").unwrap();
    ensure_user(conn, user_id)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let monthly = load_budget(conn, user_id, BudgetPeriod::Monthly)?;
    let yearly = load_budget(conn, user_id, BudgetPeriod::Yearly)?;

    if !maybe_print_json(json_flag, jsonl_flag, &[&monthly, &yearly])? {
        let mut data = Vec::new();
        for b in [&monthly, &yearly] {
            data.push(vec![
                b.period.as_str().to_string(),
                if b.enabled { "yes" } else { "no" }.to_string(),
                b.total_budget.to_string(),
                if b.auto_renew { "yes" } else { "no" }.to_string(),
                String::new(),
            ]);
            for (name, limit) in &b.categories {
                data.push(vec![
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                    format!("{} = {}", name, limit),
                ]);
            }
        }
        println!(
            "{}",
            pretty_table(&["Period", "Enabled", "Total", "Auto-renew", "Limits"], data)
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = *sub.get_one::<i64>("user").unwrap();
    ensure_user(conn, user_id)?;
    let period = BudgetPeriod::parse(sub.get_one::<String>("period").unwrap())?;

    // Removing a budget resets it to the disabled/empty shape rather than
    // dropping the row.
    conn.execute(
        "INSERT INTO budgets(user_id, period, enabled, total_budget, auto_renew, categories)
         VALUES (?1, ?2, 0, '0', 0, '{}')
         ON CONFLICT(user_id, period) DO UPDATE SET
           enabled=0, total_budget='0', auto_renew=0, categories='{}'",
        params![user_id, period.as_str()],
    )?;
    println!("{} budget reset for user {}", period.as_str(), user_id);
    Ok(())
}

pub fn load_budget(conn: &Connection, user_id: i64, period: BudgetPeriod) -> Result<Budget> {
    let row: Option<(i64, String, i64, String)> = conn
        .query_row(
            "SELECT enabled, total_budget, auto_renew, categories
             FROM budgets WHERE user_id=?1 AND period=?2",
            params![user_id, period.as_str()],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;
    let Some((enabled, total, auto_renew, categories)) = row else {
        return Ok(Budget::empty(period));
    };
    Ok(Budget {
        period,
        enabled: enabled != 0,
        total_budget: total
            .parse::<Decimal>()
            .with_context(|| format!("Invalid stored budget total '{}'", total))?,
        auto_renew: auto_renew != 0,
        categories: serde_json::from_str(&categories)
            .with_context(|| format!("Invalid stored budget limits '{}'", categories))?,
    })
}
