// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ProviderError;
use crate::models::{Budget, Category, Expense, ExpenseStatus};
use crate::provider::{BudgetProvider, ExpenseProvider};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Budgetwatch", "budgetwatch"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("budgetwatch.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    open_at(&db_path()?)
}

pub fn open_at(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let mut conn = Connection::open_in_memory()?;
    init_schema(&mut conn)?;
    Ok(conn)
}

fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS categories(
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        name TEXT NOT NULL,
        UNIQUE(user_id, name)
    );

    -- one running balance per user, keyed by the user id
    CREATE TABLE IF NOT EXISTS budgets(
        user_id TEXT PRIMARY KEY,
        amount TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS expenses(
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        amount TEXT NOT NULL,
        category_id TEXT,
        date TEXT NOT NULL,
        status TEXT NOT NULL CHECK(status IN ('pending','paid','expired')),
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_user ON expenses(user_id, date);
    "#,
    )?;
    Ok(())
}

fn parse_amount(s: &str, what: &str) -> Result<Decimal, ProviderError> {
    s.parse::<Decimal>()
        .map_err(|_| ProviderError::Decode(format!("Invalid {} amount '{}'", what, s)))
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, ProviderError> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| ProviderError::Decode(format!("Invalid timestamp '{}'", s)))
}

fn budget_from_row(r: &Row<'_>) -> Result<Budget, ProviderError> {
    let user_id: String = r.get(0)?;
    let amount: String = r.get(1)?;
    let created: String = r.get(2)?;
    let updated: String = r.get(3)?;
    Ok(Budget {
        id: user_id.clone(),
        user_id,
        amount: parse_amount(&amount, "budget")?,
        created_at: parse_timestamp(&created)?,
        updated_at: parse_timestamp(&updated)?,
    })
}

fn expense_from_row(r: &Row<'_>) -> Result<Expense, ProviderError> {
    let amount: String = r.get(2)?;
    let date: String = r.get(4)?;
    let status: String = r.get(5)?;
    Ok(Expense {
        id: r.get(0)?,
        user_id: r.get(1)?,
        amount: parse_amount(&amount, "expense")?,
        category_id: r.get(3)?,
        date: NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| ProviderError::Decode(format!("Invalid expense date '{}'", date)))?,
        status: status.parse().map_err(ProviderError::Decode)?,
    })
}

/// SQLite-backed store for one connection. Serves both provider contracts
/// and the write paths that move records through their lifecycle.
#[derive(Clone, Copy)]
pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn budget(&self, user_id: &str) -> Result<Option<Budget>, ProviderError> {
        Ok(BudgetProvider::get_all(self, user_id)?.into_iter().next())
    }

    pub fn expense(&self, user_id: &str, id: &str) -> Result<Option<Expense>, ProviderError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, amount, category_id, date, status FROM expenses WHERE user_id=?1 AND id=?2",
        )?;
        let mut rows = stmt.query(params![user_id, id])?;
        let found = match rows.next()? {
            Some(r) => Some(expense_from_row(r)?),
            None => None,
        };
        Ok(found)
    }

    /// Adds funds to the user's balance, creating the budget on first deposit.
    pub fn deposit(&self, user_id: &str, amount: Decimal) -> Result<Budget, ProviderError> {
        if amount <= Decimal::ZERO {
            return Err(ProviderError::Invalid(
                "Deposit amount must be greater than zero".into(),
            ));
        }
        // immediate: the balance read and the upsert must not interleave with another writer
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let now = Utc::now().to_rfc3339();
        let new_amount = match self.budget(user_id)? {
            Some(b) => b.amount.checked_add(amount).ok_or_else(|| {
                ProviderError::Invalid(format!("Deposit would overflow the balance for '{}'", user_id))
            })?,
            None => amount,
        };
        tx.execute(
            "INSERT INTO budgets(user_id, amount, created_at, updated_at) VALUES (?1,?2,?3,?3)
             ON CONFLICT(user_id) DO UPDATE SET amount=excluded.amount, updated_at=excluded.updated_at",
            params![user_id, new_amount.to_string(), now],
        )?;
        tx.commit()?;
        info!(user_id, deposit = %amount, balance = %new_amount, "budget funded");
        self.budget(user_id)?
            .ok_or_else(|| ProviderError::Invalid(format!("Budget for '{}' vanished", user_id)))
    }

    pub fn add_expense(
        &self,
        user_id: &str,
        amount: Decimal,
        category_id: Option<&str>,
        date: NaiveDate,
    ) -> Result<Expense, ProviderError> {
        if amount <= Decimal::ZERO {
            return Err(ProviderError::Invalid(
                "Expense amount must be greater than zero".into(),
            ));
        }
        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            amount,
            category_id: category_id.map(str::to_string),
            date,
            status: ExpenseStatus::Pending,
        };
        self.conn.execute(
            "INSERT INTO expenses(id, user_id, amount, category_id, date, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                expense.id,
                expense.user_id,
                expense.amount.to_string(),
                expense.category_id,
                expense.date.to_string(),
                expense.status.as_str()
            ],
        )?;
        debug!(user_id, expense_id = %expense.id, amount = %amount, "expense recorded");
        Ok(expense)
    }

    /// Settles a pending expense and takes its amount off the budget balance.
    pub fn pay_expense(&self, user_id: &str, id: &str) -> Result<Expense, ProviderError> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut expense = self
            .expense(user_id, id)?
            .ok_or_else(|| ProviderError::Invalid(format!("Expense '{}' not found", id)))?;
        if expense.status != ExpenseStatus::Pending {
            return Err(ProviderError::Invalid(format!(
                "Expense '{}' is {}, only pending expenses can be paid",
                id, expense.status
            )));
        }
        let budget = self.budget(user_id)?.ok_or_else(|| {
            ProviderError::Invalid(format!("No budget for '{}', deposit funds first", user_id))
        })?;
        let balance = budget.amount.checked_sub(expense.amount).ok_or_else(|| {
            ProviderError::Invalid(format!("Paying '{}' would overflow the balance", id))
        })?;
        tx.execute(
            "UPDATE budgets SET amount=?1, updated_at=?2 WHERE user_id=?3",
            params![balance.to_string(), Utc::now().to_rfc3339(), user_id],
        )?;
        tx.execute(
            "UPDATE expenses SET status='paid' WHERE user_id=?1 AND id=?2",
            params![user_id, id],
        )?;
        tx.commit()?;
        expense.status = ExpenseStatus::Paid;
        info!(user_id, expense_id = id, balance = %balance, "expense paid");
        Ok(expense)
    }

    /// Marks every pending expense dated before `as_of` as expired.
    pub fn expire_overdue(&self, user_id: &str, as_of: NaiveDate) -> Result<usize, ProviderError> {
        let n = self.conn.execute(
            "UPDATE expenses SET status='expired' WHERE user_id=?1 AND status='pending' AND date<?2",
            params![user_id, as_of.to_string()],
        )?;
        if n > 0 {
            info!(user_id, expired = n, as_of = %as_of, "overdue expenses expired");
        }
        Ok(n)
    }

    pub fn add_category(&self, user_id: &str, name: &str) -> Result<Category, ProviderError> {
        let category = Category {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
        };
        self.conn.execute(
            "INSERT INTO categories(id, user_id, name) VALUES (?1, ?2, ?3)",
            params![category.id, category.user_id, category.name],
        )?;
        Ok(category)
    }

    pub fn categories(&self, user_id: &str) -> Result<Vec<Category>, ProviderError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, user_id, name FROM categories WHERE user_id=?1 ORDER BY name")?;
        let rows = stmt.query_map(params![user_id], |r| {
            Ok(Category {
                id: r.get(0)?,
                user_id: r.get(1)?,
                name: r.get(2)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn category_id(&self, user_id: &str, name: &str) -> Result<Option<String>, ProviderError> {
        Ok(self
            .conn
            .query_row(
                "SELECT id FROM categories WHERE user_id=?1 AND name=?2",
                params![user_id, name],
                |r| r.get(0),
            )
            .optional()?)
    }

    pub fn remove_category(&self, user_id: &str, name: &str) -> Result<bool, ProviderError> {
        let n = self.conn.execute(
            "DELETE FROM categories WHERE user_id=?1 AND name=?2",
            params![user_id, name],
        )?;
        Ok(n > 0)
    }
}

impl BudgetProvider for SqliteStore<'_> {
    fn get_all(&self, user_id: &str) -> Result<Vec<Budget>, ProviderError> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, amount, created_at, updated_at FROM budgets WHERE user_id=?1",
        )?;
        let mut rows = stmt.query(params![user_id])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(budget_from_row(r)?);
        }
        Ok(out)
    }
}

impl ExpenseProvider for SqliteStore<'_> {
    fn get_all(&self, user_id: &str) -> Result<Vec<Expense>, ProviderError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, amount, category_id, date, status FROM expenses
             WHERE user_id=?1 ORDER BY date, created_at",
        )?;
        let mut rows = stmt.query(params![user_id])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(expense_from_row(r)?);
        }
        Ok(out)
    }
}
