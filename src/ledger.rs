// Copyright (c) 2025 Centime Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Running-balance maintenance.
//!
//! Every transaction carries the cumulative balance of the user's ledger
//! up to and including itself, in (date, id) ascending order. A mutation
//! invalidates that balance for itself and every later transaction, so
//! each mutation is followed by a suffix recompute starting at the
//! earliest affected date: read the anchor balance (latest transaction
//! strictly before the start date, 0 if none), walk the suffix in order,
//! and bulk-write the new balances.
//!
//! The engine is stateless between calls; the persisted ledger is the
//! only state. Recomputation is idempotent: rerunning with the same
//! start date rewrites the same suffix deterministically, so retry on a
//! failed bulk write is safe. Correctness assumes mutations for a single
//! user are serialized; concurrent read-modify-write cycles on one
//! user's ledger can interleave. Different users never share state.

use anyhow::Result;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::store::LedgerStore;
use crate::utils::round_money;

#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    /// Zero-amount transactions are rejected at the boundary; the engine
    /// itself would happily sum them.
    #[error("transaction amount must be non-zero")]
    ZeroAmount,

    #[error("transaction {0} not found")]
    TransactionNotFound(i64),

    #[error("user {0} not found")]
    UserNotFound(i64),
}

/// Boundary check for the write path. The engine assumes valid inputs.
pub fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount.is_zero() {
        return Err(LedgerError::ZeroAmount);
    }
    Ok(())
}

/// Recompute running balances from `from_date` (inclusive) onward and
/// return the user's final balance.
///
/// With `from_date = None` the whole ledger is rebuilt from an anchor of
/// zero. `exclude_id` drops a just-deleted transaction from both the
/// anchor lookup and the resweep.
///
/// Balances are rounded to 2 decimal places at every step, not once at
/// the end; stored values are exactly the per-step-rounded sums.
pub fn recalculate_from(
    store: &dyn LedgerStore,
    user_id: i64,
    from_date: Option<NaiveDateTime>,
    exclude_id: Option<i64>,
) -> Result<Decimal> {
    let (anchor, affected) = match from_date {
        Some(from) => {
            let anchor = store
                .find_latest_before(user_id, from, exclude_id)?
                .map(|t| t.running_balance)
                .unwrap_or(Decimal::ZERO);
            (anchor, store.find_from_date(user_id, from, exclude_id)?)
        }
        None => (Decimal::ZERO, store.find_all(user_id, exclude_id)?),
    };

    let mut balance = anchor;
    let mut updates = Vec::with_capacity(affected.len());
    for tx in &affected {
        balance = round_money(balance + tx.amount);
        updates.push((tx.id, balance));
    }
    store.bulk_set_balances(&updates)?;
    Ok(balance)
}

/// A new transaction may land anywhere in history, not just at the end;
/// everything from its date onward needs new balances.
pub fn after_insert(
    store: &dyn LedgerStore,
    user_id: i64,
    new_date: NaiveDateTime,
) -> Result<Decimal> {
    recalculate_from(store, user_id, Some(new_date), None)
}

/// Moving a transaction's date affects everything between its old and
/// new positions and everything after both, so the recompute starts at
/// the earlier of the two dates.
pub fn after_update(
    store: &dyn LedgerStore,
    user_id: i64,
    old_date: NaiveDateTime,
    new_date: NaiveDateTime,
) -> Result<Decimal> {
    recalculate_from(store, user_id, Some(old_date.min(new_date)), None)
}

/// The deleted transaction no longer exists in the ledger; it must be
/// excluded from the anchor lookup as well as the resweep.
pub fn after_delete(
    store: &dyn LedgerStore,
    user_id: i64,
    deleted_date: NaiveDateTime,
    deleted_id: i64,
) -> Result<Decimal> {
    recalculate_from(store, user_id, Some(deleted_date), Some(deleted_id))
}
