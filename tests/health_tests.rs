// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetwatch::models::{Budget, Expense, ExpenseStatus};
use budgetwatch::{BudgetHealthCalculator, BudgetProvider, ExpenseProvider, ProviderError};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::cell::Cell;

struct Budgets {
    amounts: Vec<i64>,
    fail: Option<&'static str>,
}

impl BudgetProvider for Budgets {
    fn get_all(&self, user_id: &str) -> Result<Vec<Budget>, ProviderError> {
        if let Some(msg) = self.fail {
            return Err(ProviderError::Invalid(msg.into()));
        }
        Ok(self
            .amounts
            .iter()
            .map(|a| Budget {
                id: user_id.into(),
                user_id: user_id.into(),
                amount: Decimal::from(*a),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .collect())
    }
}

struct Ledger {
    items: Vec<(i64, ExpenseStatus)>,
    fail: Option<&'static str>,
    calls: Cell<usize>,
}

impl Ledger {
    fn new(items: &[(i64, ExpenseStatus)]) -> Self {
        Self {
            items: items.to_vec(),
            fail: None,
            calls: Cell::new(0),
        }
    }
}

impl ExpenseProvider for Ledger {
    fn get_all(&self, user_id: &str) -> Result<Vec<Expense>, ProviderError> {
        self.calls.set(self.calls.get() + 1);
        if let Some(msg) = self.fail {
            return Err(ProviderError::Invalid(msg.into()));
        }
        Ok(self
            .items
            .iter()
            .enumerate()
            .map(|(i, (amount, status))| Expense {
                id: format!("e{}", i),
                user_id: user_id.into(),
                amount: Decimal::from(*amount),
                category_id: None,
                date: NaiveDate::from_ymd_opt(2025, 1, 1 + i as u32).unwrap(),
                status: *status,
            })
            .collect())
    }
}

fn budget(amount: i64) -> Budgets {
    Budgets {
        amounts: vec![amount],
        fail: None,
    }
}

fn paid(amounts: &[i64]) -> Ledger {
    Ledger::new(
        &amounts
            .iter()
            .map(|a| (*a, ExpenseStatus::Paid))
            .collect::<Vec<_>>(),
    )
}

#[test]
fn no_budget_yields_empty_health() {
    let ledger = paid(&[100]);
    let calc = BudgetHealthCalculator::new(Budgets { amounts: vec![], fail: None }, &ledger);
    let h = calc.calculate_budget_health("u1").unwrap();
    assert_eq!(h.user_id, "u1");
    assert!(h.total_expenses.is_zero());
    assert!(h.budget_amount.is_zero());
    assert!(h.percentage_used.is_zero());
    assert!(!h.is_over_budget);
    assert!(!h.should_alert);
    // the ledger is never consulted without a budget
    assert_eq!(ledger.calls.get(), 0);
}

#[test]
fn zero_or_negative_budget_is_an_error() {
    for amount in [0, -50] {
        let ledger = paid(&[10]);
        let calc = BudgetHealthCalculator::new(budget(amount), &ledger);
        let err = calc.calculate_budget_health("u1").unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
        assert_eq!(ledger.calls.get(), 0);
    }
}

#[test]
fn only_paid_expenses_count() {
    let ledger = Ledger::new(&[
        (100, ExpenseStatus::Paid),
        (500, ExpenseStatus::Pending),
        (250, ExpenseStatus::Expired),
    ]);
    let h = BudgetHealthCalculator::new(budget(1000), ledger)
        .calculate_budget_health("u1")
        .unwrap();
    assert_eq!(h.total_expenses, Decimal::from(100));
    assert_eq!(h.percentage_used, Decimal::from(10));
    assert!(!h.should_alert);
}

#[test]
fn alert_fires_at_exactly_ninety_percent() {
    let h = BudgetHealthCalculator::new(budget(1000), paid(&[400, 500]))
        .calculate_budget_health("u1")
        .unwrap();
    assert_eq!(h.total_expenses, Decimal::from(900));
    assert_eq!(h.percentage_used, Decimal::from(90));
    assert!(h.should_alert);
    assert!(!h.is_over_budget);
}

#[test]
fn no_alert_just_under_threshold() {
    let calc = BudgetHealthCalculator::new(budget(1000), paid(&[890]));
    let h = calc.calculate_budget_health("u1").unwrap();
    assert!(!h.should_alert);
    assert_eq!(h.percentage_used, Decimal::from(89));
    assert!(!calc.check_alert_triggers("u1").unwrap());
}

#[test]
fn spending_equal_to_budget_is_not_over() {
    let h = BudgetHealthCalculator::new(budget(1000), paid(&[1000]))
        .calculate_budget_health("u1")
        .unwrap();
    assert!(!h.is_over_budget);
    assert!(h.should_alert);
    assert!(h.remaining_amount().is_zero());
}

#[test]
fn over_budget_reports_negative_remaining() {
    let calc = BudgetHealthCalculator::new(budget(1000), paid(&[700, 500]));
    let h = calc.calculate_budget_health("u1").unwrap();
    assert!(h.is_over_budget);
    assert!(h.should_alert);
    assert_eq!(h.remaining_amount(), Decimal::from(-200));
    assert_eq!(h.percentage_used, Decimal::new(1200, 1));
    assert!(calc.check_alert_triggers("u1").unwrap());
}

#[test]
fn repeated_calculation_differs_only_in_timestamp() {
    let calc = BudgetHealthCalculator::new(budget(1000), paid(&[123, 45]));
    let a = calc.calculate_budget_health("u1").unwrap();
    let mut b = calc.calculate_budget_health("u1").unwrap();
    assert!(b.calculated_at >= a.calculated_at);
    b.calculated_at = a.calculated_at;
    assert_eq!(a, b);
}

#[test]
fn expense_provider_failure_propagates_its_message() {
    let ledger = Ledger {
        items: vec![],
        fail: Some("expenses unavailable: deadline exceeded"),
        calls: Cell::new(0),
    };
    let calc = BudgetHealthCalculator::new(budget(1000), &ledger);
    let err = calc.calculate_budget_health("u1").unwrap_err();
    assert_eq!(err.message, "expenses unavailable: deadline exceeded");
    let err = calc.check_alert_triggers("u1").unwrap_err();
    assert!(err.to_string().contains("deadline exceeded"));
}

#[test]
fn budget_provider_failure_propagates() {
    let ledger = paid(&[1]);
    let calc = BudgetHealthCalculator::new(
        Budgets {
            amounts: vec![],
            fail: Some("permission denied"),
        },
        &ledger,
    );
    let err = calc.calculate_budget_health("u1").unwrap_err();
    assert_eq!(err.message, "permission denied");
    assert_eq!(ledger.calls.get(), 0);
}

#[test]
fn empty_history_with_valid_budget() {
    let h = BudgetHealthCalculator::new(budget(500), paid(&[]))
        .calculate_budget_health("u1")
        .unwrap();
    assert!(h.total_expenses.is_zero());
    assert!(h.percentage_used.is_zero());
    assert!(!h.should_alert);
    assert_eq!(h.remaining_amount(), Decimal::from(500));
}

#[test]
fn only_first_budget_record_is_used() {
    let budgets = Budgets {
        amounts: vec![1000, 10],
        fail: None,
    };
    let h = BudgetHealthCalculator::new(budgets, paid(&[100]))
        .calculate_budget_health("u1")
        .unwrap();
    assert_eq!(h.budget_amount, Decimal::from(1000));
}

#[test]
fn cents_are_summed_exactly() {
    let expenses: Vec<Expense> = ["0.10", "0.20", "0.60"]
        .iter()
        .map(|a| Expense {
            id: a.to_string(),
            user_id: "u1".into(),
            amount: a.parse().unwrap(),
            category_id: None,
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            status: ExpenseStatus::Paid,
        })
        .collect();
    struct Fixed(Vec<Expense>);
    impl ExpenseProvider for Fixed {
        fn get_all(&self, _: &str) -> Result<Vec<Expense>, ProviderError> {
            Ok(self.0.clone())
        }
    }
    let h = BudgetHealthCalculator::new(budget(1), Fixed(expenses))
        .calculate_budget_health("u1")
        .unwrap();
    assert_eq!(h.total_expenses, Decimal::new(90, 2));
    assert!(h.should_alert);
}

struct Balance(Decimal);

impl BudgetProvider for Balance {
    fn get_all(&self, user_id: &str) -> Result<Vec<Budget>, ProviderError> {
        Ok(vec![Budget {
            id: user_id.into(),
            user_id: user_id.into(),
            amount: self.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }])
    }
}

struct PaidAmounts(Vec<Decimal>);

impl ExpenseProvider for PaidAmounts {
    fn get_all(&self, user_id: &str) -> Result<Vec<Expense>, ProviderError> {
        Ok(self
            .0
            .iter()
            .map(|a| Expense {
                id: a.to_string(),
                user_id: user_id.into(),
                amount: *a,
                category_id: None,
                date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                status: ExpenseStatus::Paid,
            })
            .collect())
    }
}

#[test]
fn percentage_out_of_range_is_an_error_not_a_panic() {
    let huge: Decimal = "100000000000000000000000000".parse().unwrap();
    let calc = BudgetHealthCalculator::new(Balance(Decimal::new(1, 2)), PaidAmounts(vec![huge]));
    let err = calc.calculate_budget_health("u1").unwrap_err();
    assert!(err.message.contains("could not be computed"));
    assert!(calc.check_alert_triggers("u1").is_err());
}

#[test]
fn paid_total_out_of_range_is_an_error_not_a_panic() {
    let half: Decimal = "50000000000000000000000000000".parse().unwrap();
    let calc = BudgetHealthCalculator::new(Balance(Decimal::from(1000)), PaidAmounts(vec![half, half]));
    let err = calc.calculate_budget_health("u1").unwrap_err();
    assert!(err.message.contains("out of range"));
}

#[test]
fn large_totals_within_range_still_compute() {
    let big: Decimal = "1000000000000000000000000".parse().unwrap();
    let h = BudgetHealthCalculator::new(Balance(big), PaidAmounts(vec![big, big]))
        .calculate_budget_health("u1")
        .unwrap();
    assert_eq!(h.percentage_used, Decimal::from(200));
    assert!(h.is_over_budget);
}
