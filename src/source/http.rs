//! HTTP user source.
//!
//! GETs a JSON array of users. The default endpoint is
//! `https://jsonplaceholder.typicode.com/users`; any endpoint returning
//! objects with at least `id` and `name` works.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use super::{parse_users, UserSource};
use crate::types::{SimulationError, UserRecord};

pub struct HttpUserSource {
    http: Client,
    url: String,
}

impl HttpUserSource {
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .user_agent("TOSSUP/0.1.0 (coin-toss-simulator)")
            .build()
            .context("Failed to build HTTP client for user source")?;

        Ok(Self { http, url: url.to_string() })
    }

    fn unavailable(&self, reason: String) -> SimulationError {
        SimulationError::SourceUnavailable {
            source_name: self.url.clone(),
            reason,
        }
    }
}

#[async_trait]
impl UserSource for HttpUserSource {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>> {
        debug!(url = %self.url, "Fetching users");

        let resp = self.http.get(&self.url).send().await.map_err(|e| {
            warn!(url = %self.url, error = %e, "User fetch failed");
            self.unavailable(e.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(url = %self.url, %status, "User source returned error status");
            return Err(self.unavailable(format!("HTTP error! status: {}", status.as_u16())).into());
        }

        let body = resp
            .text()
            .await
            .map_err(|e| self.unavailable(format!("failed to read body: {e}")))?;
        let users = parse_users(&self.url, &body)?;

        info!(url = %self.url, count = users.len(), "Users fetched");
        Ok(users)
    }

    fn name(&self) -> String {
        self.url.clone()
    }
}
