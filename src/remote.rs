// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only client for the cloud document store that holds the app's
//! budget and expense documents under `users/{userId}/...`.

use reqwest::Url;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::RemoteConfig;
use crate::error::ProviderError;
use crate::models::{Budget, Expense};
use crate::provider::{BudgetProvider, ExpenseProvider};

const UA: &str = concat!("budgetwatch/", env!("CARGO_PKG_VERSION"));

pub struct DocumentStoreClient {
    http: Client,
    base: Url,
    token: Option<String>,
}

impl DocumentStoreClient {
    pub fn new(cfg: &RemoteConfig) -> Result<Self, ProviderError> {
        let base = Url::parse(&cfg.base_url)
            .map_err(|e| ProviderError::Invalid(format!("Invalid remote URL '{}': {}", cfg.base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ProviderError::Invalid(format!(
                "Remote URL '{}' cannot be used as a base",
                cfg.base_url
            )));
        }
        let http = Client::builder()
            .timeout(cfg.timeout)
            .user_agent(UA)
            .build()?;
        Ok(Self {
            http,
            base,
            token: cfg.token.clone(),
        })
    }

    /// `{base}/users/{user_id}/{collection}` with the user id percent-encoded.
    pub fn collection_url(&self, user_id: &str, collection: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segs) = url.path_segments_mut() {
            segs.pop_if_empty().extend(["users", user_id, collection]);
        }
        url
    }

    fn fetch<T: DeserializeOwned>(&self, user_id: &str, collection: &str) -> Result<Vec<T>, ProviderError> {
        let url = self.collection_url(user_id, collection);
        debug!(url = %url, "fetching documents");
        let mut req = self.http.get(url.clone());
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send()?;
        let status = resp.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "document store rejected request");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = resp.text()?;
        serde_json::from_str(&body)
            .map_err(|e| ProviderError::Decode(format!("{} documents: {}", collection, e)))
    }
}

impl BudgetProvider for DocumentStoreClient {
    fn get_all(&self, user_id: &str) -> Result<Vec<Budget>, ProviderError> {
        self.fetch(user_id, "budgets")
    }
}

impl ExpenseProvider for DocumentStoreClient {
    fn get_all(&self, user_id: &str) -> Result<Vec<Expense>, ProviderError> {
        self.fetch(user_id, "expenses")
    }
}
