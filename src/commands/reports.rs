// Copyright (c) 2025 Centime Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{LedgerStore, SqliteLedger};
use crate::utils::{ensure_user, maybe_print_json, month_end, parse_month, pretty_table, round_money};
use anyhow::Result;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::{params, Connection};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("monthly", sub)) => monthly(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total_balance: Decimal,
    pub monthly_income: Decimal,
    pub monthly_spent: Decimal,
    pub yearly_income: Decimal,
    pub yearly_spent: Decimal,
}

/// Dashboard totals. The current balance is read off the latest
/// transaction's running balance, never recomputed here; the income and
/// spend figures are sign-split sums over the month/year containing `now`.
pub fn summarize(conn: &Connection, user_id: i64, now: NaiveDateTime) -> Result<Summary> {
    let store = SqliteLedger::new(conn);
    let total_balance = store
        .list_desc(user_id, Some(1))?
        .first()
        .map(|t| t.running_balance)
        .unwrap_or(Decimal::ZERO);

    let month_start = first_of_month(now.date()).and_time(NaiveTime::MIN);
    let year_start = NaiveDate::from_ymd_opt(now.date().year(), 1, 1)
        .unwrap_or(now.date())
        .and_time(NaiveTime::MIN);

    let mut monthly_income = Decimal::ZERO;
    let mut monthly_spent = Decimal::ZERO;
    let mut yearly_income = Decimal::ZERO;
    let mut yearly_spent = Decimal::ZERO;

    for tx in store.find_from_date(user_id, year_start, None)? {
        if tx.amount > Decimal::ZERO {
            yearly_income += tx.amount;
            if tx.date >= month_start {
                monthly_income += tx.amount;
            }
        } else {
            yearly_spent += tx.amount.abs();
            if tx.date >= month_start {
                monthly_spent += tx.amount.abs();
            }
        }
    }

    Ok(Summary {
        total_balance: round_money(total_balance),
        monthly_income: round_money(monthly_income),
        monthly_spent: round_money(monthly_spent),
        yearly_income: round_money(yearly_income),
        yearly_spent: round_money(yearly_spent),
    })
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = *sub.get_one::<i64>("user").unwrap();
    ensure_user(conn, user_id)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let s = summarize(conn, user_id, chrono::Local::now().naive_local())?;
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let data = vec![
            vec!["Total balance".into(), s.total_balance.to_string()],
            vec!["Monthly income".into(), s.monthly_income.to_string()],
            vec!["Monthly spent".into(), s.monthly_spent.to_string()],
            vec!["Yearly income".into(), s.yearly_income.to_string()],
            vec!["Yearly spent".into(), s.yearly_spent.to_string()],
        ];
        println!("{}", pretty_table(&["Metric", "Amount"], data));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct CategorySlice {
    pub category: String,
    pub amount: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Serialize)]
pub struct DaySpend {
    pub day: u32,
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct MonthlyAnalysis {
    pub categories: Vec<CategorySlice>,
    pub daily: Vec<DaySpend>,
}

/// Expense-only aggregates for one month: per-category totals with their
/// share of the month's spending (1 decimal place), and per-day spending
/// with missing days zero-filled.
pub fn monthly_analysis(conn: &Connection, user_id: i64, month: &str) -> Result<MonthlyAnalysis> {
    let last = month_end(month)?;
    let days_in_month = last.day();

    let mut stmt = conn.prepare(
        "SELECT date, amount, category FROM transactions
         WHERE user_id=?1 AND substr(date,1,7)=?2 AND CAST(amount AS REAL) < 0
         ORDER BY date, id",
    )?;
    let rows = stmt.query_map(params![user_id, month], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
        ))
    })?;

    let mut by_category: Vec<(String, Decimal)> = Vec::new();
    let mut by_day = vec![Decimal::ZERO; days_in_month as usize];
    for row in rows {
        let (date_s, amount_s, category) = row?;
        let date = crate::utils::parse_datetime(&date_s)?;
        let spent = amount_s.parse::<Decimal>()?.abs();
        match by_category.iter_mut().find(|(name, _)| *name == category) {
            Some((_, sum)) => *sum += spent,
            None => by_category.push((category, spent)),
        }
        by_day[date.day() as usize - 1] += spent;
    }

    let total: Decimal = by_category.iter().map(|(_, v)| *v).sum();
    by_category.sort_by(|a, b| b.1.cmp(&a.1));
    let categories = by_category
        .into_iter()
        .map(|(category, amount)| CategorySlice {
            category,
            percentage: if total.is_zero() {
                Decimal::ZERO
            } else {
                (amount / total * Decimal::from(100))
                    .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
            },
            amount: round_money(amount),
        })
        .collect();

    let daily = by_day
        .into_iter()
        .enumerate()
        .map(|(i, amount)| DaySpend {
            day: i as u32 + 1,
            amount: round_money(amount),
        })
        .collect();

    Ok(MonthlyAnalysis { categories, daily })
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = *sub.get_one::<i64>("user").unwrap();
    ensure_user(conn, user_id)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => chrono::Local::now().format("%Y-%m").to_string(),
    };

    let analysis = monthly_analysis(conn, user_id, &month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &analysis)? {
        let cat_rows: Vec<Vec<String>> = analysis
            .categories
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    c.amount.to_string(),
                    format!("{}%", c.percentage),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], cat_rows));

        let day_rows: Vec<Vec<String>> = analysis
            .daily
            .iter()
            .filter(|d| !d.amount.is_zero())
            .map(|d| vec![format!("{}-{:02}", month, d.day), d.amount.to_string()])
            .collect();
        println!("{}", pretty_table(&["Day", "Spent"], day_rows));
    }
    Ok(())
}

fn first_of_month(d: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(d.year(), d.month(), 1).unwrap_or(d)
}
