// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::SqliteStore;
use crate::provider::ExpenseProvider;
use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use serde_json::json;
use std::collections::HashMap;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => export_expenses(conn, user, sub),
        _ => Ok(()),
    }
}

fn export_expenses(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".into());
    let out = sub.get_one::<String>("out").context("--out is required")?;

    let store = SqliteStore::new(conn);
    let names: HashMap<String, String> = store
        .categories(user)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    let expenses = ExpenseProvider::get_all(&store, user)?;
    let category_of = |id: &Option<String>| -> String {
        id.as_ref()
            .and_then(|id| names.get(id))
            .cloned()
            .unwrap_or_default()
    };

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Cannot write {}", out))?;
            wtr.write_record(["id", "date", "amount", "category", "status"])?;
            for e in &expenses {
                wtr.write_record([
                    e.id.clone(),
                    e.date.to_string(),
                    e.amount.to_string(),
                    category_of(&e.category_id),
                    e.status.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = expenses
                .iter()
                .map(|e| {
                    json!({
                        "id": e.id, "date": e.date.to_string(), "amount": e.amount.to_string(),
                        "category": category_of(&e.category_id), "status": e.status.as_str()
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Cannot write {}", out))?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    println!("Exported {} expense(s) to {}", expenses.len(), out);
    Ok(())
}
