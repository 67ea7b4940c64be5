//! User sources.
//!
//! Defines the `UserSource` trait and provides implementations for:
//! - HTTP — a JSON user list endpoint (jsonplaceholder by default)
//! - File — the same JSON shape read from disk, for offline runs

pub mod file;
pub mod http;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{SourceConfig, SourceKind};
use crate::types::{SimulationError, UserRecord};

pub use file::FileUserSource;
pub use http::HttpUserSource;

/// Abstraction over wherever the roster comes from.
///
/// Failures surface as [`SimulationError::SourceUnavailable`] or
/// [`SimulationError::InvalidUserData`] wrapped in `anyhow::Error`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Fetch the full user list, in source order.
    async fn fetch_users(&self) -> Result<Vec<UserRecord>>;

    /// Source name for logging and error messages.
    fn name(&self) -> String;
}

/// Build the source selected in the configuration.
pub fn from_config(cfg: &SourceConfig) -> Result<Arc<dyn UserSource>> {
    match cfg.kind {
        SourceKind::Http => Ok(Arc::new(HttpUserSource::new(&cfg.url, cfg.timeout_secs)?)),
        SourceKind::File => {
            let path = cfg.path.as_deref().ok_or_else(|| {
                SimulationError::Config("source.path is required for file sources".into())
            })?;
            Ok(Arc::new(FileUserSource::new(path)))
        }
    }
}

/// Decode a JSON user list, attributing failures to `source_name`.
pub(crate) fn parse_users(source_name: &str, body: &str) -> Result<Vec<UserRecord>, SimulationError> {
    serde_json::from_str(body).map_err(|e| SimulationError::InvalidUserData {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USERS_URL;

    #[test]
    fn test_parse_users_keeps_order() {
        let users = parse_users("t", r#"[{"id":2,"name":"B"},{"id":1,"name":"A"}]"#).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, 2);
        assert_eq!(users[1].name, "A");
    }

    #[test]
    fn test_parse_users_rejects_non_list() {
        let err = parse_users("t", r#"{"id":1}"#).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidUserData { .. }));
    }

    #[test]
    fn test_from_config_http() {
        let cfg = SourceConfig::default();
        let source = from_config(&cfg).unwrap();
        assert_eq!(source.name(), DEFAULT_USERS_URL);
    }

    #[test]
    fn test_from_config_file_without_path() {
        let cfg = SourceConfig {
            kind: SourceKind::File,
            path: None,
            ..SourceConfig::default()
        };
        assert!(from_config(&cfg).is_err());
    }
}
