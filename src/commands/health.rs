// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::RemoteConfig;
use crate::db::SqliteStore;
use crate::health::BudgetHealthCalculator;
use crate::models::BudgetHealth;
use crate::remote::DocumentStoreClient;
use crate::utils::{fmt_money, get_currency, maybe_print_json, pretty_table};
use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    #[serde(flatten)]
    pub health: BudgetHealth,
    pub remaining_amount: Decimal,
}

pub fn compute(
    conn: &Connection,
    remote: Option<&RemoteConfig>,
    user: &str,
    source: &str,
) -> Result<BudgetHealth> {
    let health = match source {
        "local" => {
            let store = SqliteStore::new(conn);
            BudgetHealthCalculator::new(store, store).calculate_budget_health(user)?
        }
        "remote" => {
            let client = remote_client(remote)?;
            BudgetHealthCalculator::new(&client, &client).calculate_budget_health(user)?
        }
        other => bail!("Unknown source '{}' (use local|remote)", other),
    };
    Ok(health)
}

fn remote_client(remote: Option<&RemoteConfig>) -> Result<DocumentStoreClient> {
    let cfg = remote.context("Remote source needs BUDGETWATCH_REMOTE_URL")?;
    Ok(DocumentStoreClient::new(cfg)?)
}

pub fn handle(
    conn: &Connection,
    remote: Option<&RemoteConfig>,
    user: &str,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let source = sub.get_one::<String>("source").map(String::as_str).unwrap_or("local");
    let health = compute(conn, remote, user, source)
        .with_context(|| format!("Budget health for '{}' unavailable", user))?;
    let report = HealthReport {
        remaining_amount: health.remaining_amount(),
        health,
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let h = &report.health;
    let yes_no = |b: bool| (if b { "yes" } else { "no" }).to_string();
    println!(
        "{}",
        pretty_table(
            &["Budget", "Paid", "Remaining", "Used %", "Over budget", "Alert"],
            vec![vec![
                fmt_money(&h.budget_amount, &ccy),
                fmt_money(&h.total_expenses, &ccy),
                fmt_money(&report.remaining_amount, &ccy),
                format!("{:.2}", h.percentage_used.round_dp(2)),
                yes_no(h.is_over_budget),
                yes_no(h.should_alert),
            ]],
        )
    );
    Ok(())
}

pub fn handle_alert(
    conn: &Connection,
    remote: Option<&RemoteConfig>,
    user: &str,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let source = sub.get_one::<String>("source").map(String::as_str).unwrap_or("local");
    let alert = match source {
        "local" => {
            let store = SqliteStore::new(conn);
            BudgetHealthCalculator::new(store, store).check_alert_triggers(user)?
        }
        "remote" => {
            let client = remote_client(remote)?;
            BudgetHealthCalculator::new(&client, &client).check_alert_triggers(user)?
        }
        other => bail!("Unknown source '{}' (use local|remote)", other),
    };
    println!("{}", if alert { "ALERT" } else { "OK" });
    Ok(())
}
