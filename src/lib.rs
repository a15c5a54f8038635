// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod health;
pub mod logging;
pub mod models;
pub mod provider;
pub mod remote;
pub mod utils;
pub mod commands;

pub use error::{DatabaseError, ProviderError};
pub use health::{BUDGET_ALERT_THRESHOLD, BudgetHealthCalculator};
pub use provider::{BudgetProvider, ExpenseProvider};
