// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::SqliteStore;
use crate::utils::pretty_table;
use anyhow::{Context, Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").context("--name is required")?.trim();
            if name.is_empty() {
                bail!("Category name cannot be empty");
            }
            store
                .add_category(user, name)
                .with_context(|| format!("Could not add category '{}'", name))?;
            println!("Added category '{}'", name);
        }
        Some(("list", _)) => {
            let data = store
                .categories(user)?
                .into_iter()
                .map(|c| vec![c.name])
                .collect();
            println!("{}", pretty_table(&["Category"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").context("--name is required")?.trim();
            if store.remove_category(user, name)? {
                println!("Removed category '{}'", name);
            } else {
                bail!("Category '{}' not found", name);
            }
        }
        _ => {}
    }
    Ok(())
}
