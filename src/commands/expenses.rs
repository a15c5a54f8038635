// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::SqliteStore;
use crate::models::{Expense, ExpenseStatus};
use crate::provider::ExpenseProvider;
use crate::utils::{fmt_money, get_currency, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result, anyhow};
use chrono::Local;
use rusqlite::Connection;
use std::collections::HashMap;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, user, sub)?,
        Some(("list", sub)) => list(conn, user, sub)?,
        Some(("pay", sub)) => pay(conn, user, sub)?,
        Some(("expire", sub)) => expire(conn, user, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    let amount = parse_decimal(sub.get_one::<String>("amount").context("--amount is required")?)?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => Local::now().date_naive(),
    };
    let category_id = match sub.get_one::<String>("category").map(|s| s.trim()) {
        Some(name) => Some(
            store
                .category_id(user, name)?
                .ok_or_else(|| anyhow!("Category '{}' not found", name))?,
        ),
        None => None,
    };
    let expense = store.add_expense(user, amount, category_id.as_deref(), date)?;
    println!(
        "Recorded pending expense {} of {} due {}",
        expense.id,
        fmt_money(&expense.amount, &get_currency(conn)?),
        expense.date
    );
    Ok(())
}

/// Expenses for `user`, newest due date first, optionally filtered by `--status`.
pub fn query_rows(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<Vec<Expense>> {
    let status = match sub.get_one::<String>("status") {
        Some(s) => Some(s.parse::<ExpenseStatus>().map_err(|e| anyhow!(e))?),
        None => None,
    };
    let mut rows: Vec<Expense> = ExpenseProvider::get_all(&SqliteStore::new(conn), user)?
        .into_iter()
        .filter(|e| status.is_none_or(|s| e.status == s))
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(rows)
}

fn list(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(conn, user, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let names: HashMap<String, String> = SqliteStore::new(conn)
        .categories(user)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    let ccy = get_currency(conn)?;
    let rows = data
        .iter()
        .map(|e| {
            vec![
                e.id.clone(),
                e.date.to_string(),
                fmt_money(&e.amount, &ccy),
                e.category_id
                    .as_ref()
                    .and_then(|id| names.get(id))
                    .cloned()
                    .unwrap_or_default(),
                e.status.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Due", "Amount", "Category", "Status"], rows)
    );
    Ok(())
}

fn pay(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").context("--id is required")?.trim();
    let expense = SqliteStore::new(conn)
        .pay_expense(user, id)
        .with_context(|| format!("Could not pay expense '{}'", id))?;
    println!(
        "Paid {} ({})",
        expense.id,
        fmt_money(&expense.amount, &get_currency(conn)?)
    );
    Ok(())
}

fn expire(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let as_of = match sub.get_one::<String>("as-of") {
        Some(d) => parse_date(d)?,
        None => Local::now().date_naive(),
    };
    let n = SqliteStore::new(conn).expire_overdue(user, as_of)?;
    println!("Expired {} overdue expense(s) as of {}", n, as_of);
    Ok(())
}
