// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    Pending,
    Paid,
    Expired,
}

impl ExpenseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseStatus::Pending => "pending",
            ExpenseStatus::Paid => "paid",
            ExpenseStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ExpenseStatus::Pending),
            "paid" => Ok(ExpenseStatus::Paid),
            "expired" => Ok(ExpenseStatus::Expired),
            other => Err(format!(
                "Invalid status '{}', expected pending|paid|expired",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub category_id: Option<String>,
    pub date: NaiveDate,
    pub status: ExpenseStatus,
}

/// A user's single running balance. Deposits raise it, paid expenses lower it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
}

/// Snapshot of paid spending against the budget balance at `calculated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetHealth {
    pub user_id: String,
    pub total_expenses: Decimal,
    pub budget_amount: Decimal,
    /// Scaled 0..100 (and beyond when over budget), not a 0..1 ratio.
    pub percentage_used: Decimal,
    pub is_over_budget: bool,
    pub should_alert: bool,
    pub calculated_at: DateTime<Utc>,
}

impl BudgetHealth {
    /// Result reported when the user has no budget record at all.
    pub fn empty(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            total_expenses: Decimal::ZERO,
            budget_amount: Decimal::ZERO,
            percentage_used: Decimal::ZERO,
            is_over_budget: false,
            should_alert: false,
            calculated_at: Utc::now(),
        }
    }

    /// Negative once spending exceeds the balance.
    pub fn remaining_amount(&self) -> Decimal {
        self.budget_amount - self.total_expenses
    }
}
