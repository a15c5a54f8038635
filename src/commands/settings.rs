// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_currency, set_currency};
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("currency", sub)) = m.subcommand() {
        match sub.get_one::<String>("set") {
            Some(ccy) => {
                let ccy = ccy.trim().to_uppercase();
                if ccy.len() != 3 || !ccy.chars().all(|c| c.is_ascii_alphabetic()) {
                    bail!("Currency must be a 3-letter code, got '{}'", ccy);
                }
                set_currency(conn, &ccy)?;
                println!("Display currency set to {}", ccy);
            }
            None => println!("{}", get_currency(conn)?),
        }
    }
    Ok(())
}
