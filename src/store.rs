// Copyright (c) 2025 Centime Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence seam for the ledger engine.
//!
//! The engine only ever sees the [`LedgerStore`] trait: an anchor lookup,
//! two ordered range reads, and one bulk balance write. Everything else
//! (single-record CRUD used by the command layer) lives on the SQLite
//! implementation directly.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::models::Transaction;
use crate::utils::{fmt_datetime, parse_datetime};

pub trait LedgerStore {
    /// Latest transaction strictly before `before`, in (date, id)
    /// descending order. This is the recomputation anchor.
    fn find_latest_before(
        &self,
        user_id: i64,
        before: NaiveDateTime,
        exclude_id: Option<i64>,
    ) -> Result<Option<Transaction>>;

    /// All transactions with date >= `from`, ascending by (date, id).
    fn find_from_date(
        &self,
        user_id: i64,
        from: NaiveDateTime,
        exclude_id: Option<i64>,
    ) -> Result<Vec<Transaction>>;

    /// The whole ledger ascending by (date, id). Fallback path.
    fn find_all(&self, user_id: i64, exclude_id: Option<i64>) -> Result<Vec<Transaction>>;

    /// Apply balance writes as one unit: either the whole suffix commits
    /// or none of it does.
    fn bulk_set_balances(&self, updates: &[(i64, Decimal)]) -> Result<()>;
}

pub struct SqliteLedger<'a> {
    conn: &'a Connection,
}

const TX_COLUMNS: &str = "id, user_id, date, amount, category, description, running_balance";

impl<'a> SqliteLedger<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        SqliteLedger { conn }
    }

    pub fn insert(
        &self,
        user_id: i64,
        date: NaiveDateTime,
        amount: Decimal,
        category: &str,
        description: Option<&str>,
    ) -> Result<i64> {
        // running_balance starts as a placeholder; the engine owns it.
        self.conn.execute(
            "INSERT INTO transactions(user_id, date, amount, category, description, running_balance)
             VALUES (?1, ?2, ?3, ?4, ?5, '0')",
            params![
                user_id,
                fmt_datetime(date),
                amount.to_string(),
                category,
                description
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get(&self, user_id: i64, id: i64) -> Result<Option<Transaction>> {
        let sql = format!(
            "SELECT {} FROM transactions WHERE user_id=?1 AND id=?2",
            TX_COLUMNS
        );
        let raw = self
            .conn
            .query_row(&sql, params![user_id, id], raw_tx)
            .optional()?;
        raw.map(parse_tx).transpose()
    }

    pub fn update_fields(
        &self,
        id: i64,
        date: NaiveDateTime,
        amount: Decimal,
        category: &str,
        description: Option<&str>,
    ) -> Result<()> {
        // The stale running_balance is left in place; the caller's
        // recompute covers the transaction's new position.
        self.conn.execute(
            "UPDATE transactions SET date=?1, amount=?2, category=?3, description=?4 WHERE id=?5",
            params![
                fmt_datetime(date),
                amount.to_string(),
                category,
                description,
                id
            ],
        )?;
        Ok(())
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        Ok(())
    }

    /// Newest-first listing for display.
    pub fn list_desc(&self, user_id: i64, limit: Option<usize>) -> Result<Vec<Transaction>> {
        let mut sql = format!(
            "SELECT {} FROM transactions WHERE user_id=?1 ORDER BY date DESC, id DESC",
            TX_COLUMNS
        );
        if let Some(n) = limit {
            sql.push_str(&format!(" LIMIT {}", n));
        }
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![user_id], raw_tx)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(parse_tx(row?)?);
        }
        Ok(out)
    }
}

impl LedgerStore for SqliteLedger<'_> {
    fn find_latest_before(
        &self,
        user_id: i64,
        before: NaiveDateTime,
        exclude_id: Option<i64>,
    ) -> Result<Option<Transaction>> {
        let sql = format!(
            "SELECT {} FROM transactions
             WHERE user_id=?1 AND date < ?2 AND (?3 IS NULL OR id <> ?3)
             ORDER BY date DESC, id DESC LIMIT 1",
            TX_COLUMNS
        );
        let raw = self
            .conn
            .query_row(&sql, params![user_id, fmt_datetime(before), exclude_id], raw_tx)
            .optional()?;
        raw.map(parse_tx).transpose()
    }

    fn find_from_date(
        &self,
        user_id: i64,
        from: NaiveDateTime,
        exclude_id: Option<i64>,
    ) -> Result<Vec<Transaction>> {
        let sql = format!(
            "SELECT {} FROM transactions
             WHERE user_id=?1 AND date >= ?2 AND (?3 IS NULL OR id <> ?3)
             ORDER BY date ASC, id ASC",
            TX_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![user_id, fmt_datetime(from), exclude_id], raw_tx)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(parse_tx(row?)?);
        }
        Ok(out)
    }

    fn find_all(&self, user_id: i64, exclude_id: Option<i64>) -> Result<Vec<Transaction>> {
        let sql = format!(
            "SELECT {} FROM transactions
             WHERE user_id=?1 AND (?2 IS NULL OR id <> ?2)
             ORDER BY date ASC, id ASC",
            TX_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![user_id, exclude_id], raw_tx)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(parse_tx(row?)?);
        }
        Ok(out)
    }

    fn bulk_set_balances(&self, updates: &[(i64, Decimal)]) -> Result<()> {
        if updates.is_empty() {
            return Ok(());
        }
        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        let applied = (|| -> Result<()> {
            let mut stmt = self
                .conn
                .prepare("UPDATE transactions SET running_balance=?1 WHERE id=?2")?;
            for (id, balance) in updates {
                stmt.execute(params![balance.to_string(), id])?;
            }
            Ok(())
        })();
        match applied {
            Ok(()) => {
                self.conn.execute_batch("COMMIT")?;
                Ok(())
            }
            Err(e) => {
                let _ = self.conn.execute_batch("ROLLBACK");
                Err(e)
            }
        }
    }
}

struct RawTx {
    id: i64,
    user_id: i64,
    date: String,
    amount: String,
    category: String,
    description: Option<String>,
    running_balance: String,
}

fn raw_tx(r: &Row) -> rusqlite::Result<RawTx> {
    Ok(RawTx {
        id: r.get(0)?,
        user_id: r.get(1)?,
        date: r.get(2)?,
        amount: r.get(3)?,
        category: r.get(4)?,
        description: r.get(5)?,
        running_balance: r.get(6)?,
    })
}

fn parse_tx(raw: RawTx) -> Result<Transaction> {
    Ok(Transaction {
        id: raw.id,
        user_id: raw.user_id,
        date: parse_datetime(&raw.date)
            .with_context(|| format!("Invalid stored date '{}' for tx {}", raw.date, raw.id))?,
        amount: raw
            .amount
            .parse::<Decimal>()
            .with_context(|| format!("Invalid stored amount '{}' for tx {}", raw.amount, raw.id))?,
        category: raw.category,
        description: raw.description,
        running_balance: raw.running_balance.parse::<Decimal>().with_context(|| {
            format!(
                "Invalid stored balance '{}' for tx {}",
                raw.running_balance, raw.id
            )
        })?,
    })
}
