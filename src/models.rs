// Copyright (c) 2025 Centime Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDateTime,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    /// Cumulative balance up to and including this transaction in
    /// (date, id) order. Owned by the ledger engine; callers only ever
    /// write a placeholder pending recomputation.
    pub running_balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "monthly" => Ok(BudgetPeriod::Monthly),
            "yearly" => Ok(BudgetPeriod::Yearly),
            other => Err(anyhow!("Invalid budget period '{}', expected monthly|yearly", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub period: BudgetPeriod,
    pub enabled: bool,
    pub total_budget: Decimal,
    pub auto_renew: bool,
    pub categories: BTreeMap<String, Decimal>,
}

impl Budget {
    /// The disabled/empty shape a budget resets to when removed.
    pub fn empty(period: BudgetPeriod) -> Self {
        Budget {
            period,
            enabled: false,
            total_budget: Decimal::ZERO,
            auto_renew: false,
            categories: BTreeMap::new(),
        }
    }
}
