// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Budget health: paid spending measured against the running budget balance.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::error::DatabaseError;
use crate::models::{BudgetHealth, ExpenseStatus};
use crate::provider::{BudgetProvider, ExpenseProvider};

/// Spend-to-balance ratio (0..1, inclusive) at which a user is alerted.
pub const BUDGET_ALERT_THRESHOLD: Decimal = Decimal::from_parts(90, 0, 0, false, 2);

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

pub struct BudgetHealthCalculator<B, E> {
    budgets: B,
    expenses: E,
}

impl<B: BudgetProvider, E: ExpenseProvider> BudgetHealthCalculator<B, E> {
    pub fn new(budgets: B, expenses: E) -> Self {
        Self { budgets, expenses }
    }

    /// Computes the user's budget health over their full expense history.
    ///
    /// A user with no budget record gets [`BudgetHealth::empty`]; a budget
    /// whose balance is zero or negative is an error. Only the first budget
    /// record is read, the store is trusted to hold one per user.
    pub fn calculate_budget_health(&self, user_id: &str) -> Result<BudgetHealth, DatabaseError> {
        debug!(user_id, "fetching budget");
        let budgets = self.budgets.get_all(user_id).map_err(|e| {
            warn!(user_id, error = %e, "budget fetch failed");
            DatabaseError::from(e)
        })?;

        let Some(budget) = budgets.first() else {
            info!(user_id, "no budget on record, reporting empty health");
            return Ok(BudgetHealth::empty(user_id));
        };
        if budgets.len() > 1 {
            debug!(
                user_id,
                count = budgets.len(),
                "multiple budget records, using the first"
            );
        }

        if budget.amount <= Decimal::ZERO {
            warn!(user_id, budget_amount = %budget.amount, "non-positive budget amount");
            return Err(DatabaseError::new("Budget amount must be greater than zero"));
        }

        debug!(user_id, "fetching expenses");
        let expenses = self.expenses.get_all(user_id).map_err(|e| {
            warn!(user_id, error = %e, "expense fetch failed");
            DatabaseError::from(e)
        })?;

        let total_expenses = expenses
            .iter()
            .filter(|e| e.status == ExpenseStatus::Paid)
            .try_fold(Decimal::ZERO, |acc, e| acc.checked_add(e.amount))
            .ok_or_else(|| {
                warn!(user_id, "paid expense total overflowed");
                DatabaseError::new("Paid expense total is out of range")
            })?;

        let ratio = total_expenses.checked_div(budget.amount).ok_or_else(|| {
            warn!(user_id, total_expenses = %total_expenses, "spend ratio overflowed");
            DatabaseError::new("Budget ratio could not be computed")
        })?;
        let percentage_used = ratio.checked_mul(HUNDRED).ok_or_else(|| {
            warn!(user_id, ratio = %ratio, "percentage used overflowed");
            DatabaseError::new("Budget ratio could not be computed")
        })?;

        let health = BudgetHealth {
            user_id: user_id.to_string(),
            total_expenses,
            budget_amount: budget.amount,
            percentage_used,
            is_over_budget: total_expenses > budget.amount,
            should_alert: ratio >= BUDGET_ALERT_THRESHOLD,
            calculated_at: Utc::now(),
        };
        info!(
            user_id,
            budget_amount = %health.budget_amount,
            total_expenses = %health.total_expenses,
            percentage_used = %health.percentage_used.round_dp(2),
            over_budget = health.is_over_budget,
            alert = health.should_alert,
            "budget health calculated"
        );
        Ok(health)
    }

    pub fn check_alert_triggers(&self, user_id: &str) -> Result<bool, DatabaseError> {
        self.calculate_budget_health(user_id).map(|h| h.should_alert)
    }
}
