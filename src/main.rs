// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use budgetwatch::{cli, commands, config::AppConfig, db, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let cfg = AppConfig::from_env()?;
    logging::init(cfg.log_format);

    let user = matches
        .get_one::<String>("user")
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| cfg.user_id.clone());

    let conn = match &cfg.db_path {
        Some(path) => db::open_at(path)?,
        None => db::open_or_init()?,
    };
    let remote = cfg.remote.as_ref();

    match matches.subcommand() {
        Some(("init", _)) => match &cfg.db_path {
            Some(path) => println!("Database initialized at {}", path.display()),
            None => println!("Database initialized at {}", db::db_path()?.display()),
        },
        Some(("budget", sub)) => commands::budgets::handle(&conn, &user, sub)?,
        Some(("category", sub)) => commands::categories::handle(&conn, &user, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&conn, &user, sub)?,
        Some(("health", sub)) => commands::health::handle(&conn, remote, &user, sub)?,
        Some(("alert", sub)) => commands::health::handle_alert(&conn, remote, &user, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, &user, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
