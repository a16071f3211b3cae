// Copyright (c) 2025 Centime Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{LedgerStore, SqliteLedger};
use crate::utils::{pretty_table, round_money};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let issues = audit(conn)?;
    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], issues.into_iter().map(|(a, b)| vec![a, b]).collect()));
        println!("Run 'centime tx resync --user <id>' to rebuild a drifted ledger.");
    }
    Ok(())
}

/// Walk every user's ledger in (date, id) order, prefix-sum the amounts
/// with the engine's rounding, and compare against the stored balances.
pub fn audit(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut issues = Vec::new();

    let mut stmt = conn.prepare("SELECT id FROM users ORDER BY id")?;
    let user_ids: Vec<i64> = stmt
        .query_map([], |r| r.get(0))?
        .collect::<rusqlite::Result<_>>()?;

    let store = SqliteLedger::new(conn);
    for user_id in user_ids {
        let mut expected = Decimal::ZERO;
        for tx in store.find_all(user_id, None)? {
            if tx.amount.is_zero() {
                issues.push((
                    "zero_amount".into(),
                    format!("user {} tx {}", user_id, tx.id),
                ));
            }
            expected = round_money(expected + tx.amount);
            if tx.running_balance != expected {
                issues.push((
                    "balance_drift".into(),
                    format!(
                        "user {} tx {}: stored {}, expected {}",
                        user_id, tx.id, tx.running_balance, expected
                    ),
                ));
                // Keep auditing against the recomputed chain, not the
                // drifted stored values.
            }
        }
    }
    Ok(issues)
}
