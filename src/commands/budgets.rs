// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::SqliteStore;
use crate::utils::{fmt_money, get_currency, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("deposit", sub)) => deposit(conn, user, sub)?,
        Some(("show", sub)) => show(conn, user, sub)?,
        _ => {}
    }
    Ok(())
}

fn deposit(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").context("--amount is required")?)?;
    let budget = SqliteStore::new(conn)
        .deposit(user, amount)
        .with_context(|| format!("Deposit for '{}' failed", user))?;
    let ccy = get_currency(conn)?;
    println!(
        "Deposited {} for {}, balance now {}",
        fmt_money(&amount, &ccy),
        user,
        fmt_money(&budget.amount, &ccy)
    );
    Ok(())
}

fn show(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let budget = SqliteStore::new(conn).budget(user)?;
    let Some(budget) = budget else {
        println!("No budget set for {}", user);
        return Ok(());
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &budget)? {
        let ccy = get_currency(conn)?;
        println!(
            "{}",
            pretty_table(
                &["User", "Balance", "Created", "Updated"],
                vec![vec![
                    budget.user_id.clone(),
                    fmt_money(&budget.amount, &ccy),
                    budget.created_at.format("%Y-%m-%d %H:%M").to_string(),
                    budget.updated_at.format("%Y-%m-%d %H:%M").to_string(),
                ]],
            )
        );
    }
    Ok(())
}
