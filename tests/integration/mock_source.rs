//! Mock user source for integration testing.
//!
//! Provides a deterministic `UserSource` implementation that returns a
//! fixed roster and can be forced to fail. Everything stays in memory.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use tossup::source::UserSource;
use tossup::types::{SimulationError, UserRecord};

/// A mock user source for deterministic testing.
pub struct MockSource {
    users: Vec<UserRecord>,
    fetches: Arc<Mutex<usize>>,
    /// If set, fetches fail with `SourceUnavailable` and this reason.
    force_error: Arc<Mutex<Option<String>>>,
}

impl MockSource {
    /// A roster of `n` users named "User 1".."User n".
    pub fn with_users(n: u64) -> Self {
        Self::from_names(&(1..=n).map(|i| format!("User {i}")).collect::<Vec<_>>())
    }

    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let users = names
            .iter()
            .enumerate()
            .map(|(i, name)| UserRecord {
                id: i as u64 + 1,
                name: name.as_ref().to_string(),
            })
            .collect();
        Self {
            users,
            fetches: Arc::new(Mutex::new(0)),
            force_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Force all subsequent fetches to fail.
    pub fn set_error(&self, msg: &str) {
        *self.force_error.lock().unwrap() = Some(msg.to_string());
    }

    /// Clear any forced error.
    pub fn clear_error(&self) {
        *self.force_error.lock().unwrap() = None;
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetches.lock().unwrap()
    }
}

#[async_trait]
impl UserSource for MockSource {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>> {
        *self.fetches.lock().unwrap() += 1;
        if let Some(reason) = self.force_error.lock().unwrap().clone() {
            return Err(SimulationError::SourceUnavailable {
                source_name: self.name(),
                reason,
            }
            .into());
        }
        Ok(self.users.clone())
    }

    fn name(&self) -> String {
        "mock".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_roster() {
        let source = MockSource::with_users(3);
        let users = source.fetch_users().await.unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(users[2].name, "User 3");
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_forced_error_and_clear() {
        let source = MockSource::with_users(2);
        source.set_error("HTTP error! status: 404");
        assert!(source.fetch_users().await.is_err());

        source.clear_error();
        assert!(source.fetch_users().await.is_ok());
        assert_eq!(source.fetch_count(), 2);
    }
}
