//! File-backed user source.

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use super::{parse_users, UserSource};
use crate::types::{SimulationError, UserRecord};

pub struct FileUserSource {
    path: String,
}

impl FileUserSource {
    pub fn new(path: &str) -> Self {
        Self { path: path.to_string() }
    }
}

#[async_trait]
impl UserSource for FileUserSource {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>> {
        let body = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            warn!(path = %self.path, error = %e, "User file unreadable");
            SimulationError::SourceUnavailable {
                source_name: self.path.clone(),
                reason: e.to_string(),
            }
        })?;

        let users = parse_users(&self.path, &body)?;
        info!(path = %self.path, count = users.len(), "Users loaded");
        Ok(users)
    }

    fn name(&self) -> String {
        self.path.clone()
    }
}
