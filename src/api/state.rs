//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::str::FromStr;
use std::sync::Arc;

use chrono::Duration;
use serde::Deserialize;

use crate::auth::{CredentialVerifier, SessionStore};
use crate::calculation::{ScheduleResolver, StaticSchedule, StoredSchedule};
use crate::config::ConfigLoader;
use crate::error::PayrollError;
use crate::store::AssignmentStore;

/// Where the earnings endpoints read worked zones from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleSource {
    /// The weekly pattern in `schedules.yaml`.
    #[default]
    Static,
    /// Assignments submitted through the API.
    Submitted,
}

impl FromStr for ScheduleSource {
    type Err = PayrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(ScheduleSource::Static),
            "submitted" | "stored" => Ok(ScheduleSource::Submitted),
            other => Err(PayrollError::InvalidConfig {
                message: format!("unknown schedule source '{}'", other),
            }),
        }
    }
}

/// Shared application state.
///
/// Contains resources that are shared across all request handlers:
/// the loaded configuration, the assignment store, credentials, live
/// sessions, and the schedule resolver used for earnings.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<dyn AssignmentStore>,
    credentials: Arc<dyn CredentialVerifier>,
    sessions: Arc<SessionStore>,
    resolver: Arc<dyn ScheduleResolver>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        config: ConfigLoader,
        store: Arc<dyn AssignmentStore>,
        credentials: Arc<dyn CredentialVerifier>,
        source: ScheduleSource,
    ) -> Self {
        let resolver: Arc<dyn ScheduleResolver> = match source {
            ScheduleSource::Static => Arc::new(StaticSchedule::from_config(config.config())),
            ScheduleSource::Submitted => Arc::new(StoredSchedule::new(Arc::clone(&store))),
        };
        Self {
            config: Arc::new(config),
            store,
            credentials,
            sessions: Arc::new(SessionStore::new()),
            resolver,
        }
    }

    /// Replaces the session store with an empty one whose tokens live for
    /// `ttl`. Call before the state is shared with the router.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.sessions = Arc::new(SessionStore::with_ttl(ttl));
        self
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// The assignment store.
    pub fn store(&self) -> &dyn AssignmentStore {
        self.store.as_ref()
    }

    /// The password checker.
    pub fn credentials(&self) -> &dyn CredentialVerifier {
        self.credentials.as_ref()
    }

    /// Live login sessions.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// The resolver that decides which zones were worked on a day.
    pub fn resolver(&self) -> &dyn ScheduleResolver {
        self.resolver.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_schedule_source_parsing() {
        assert_eq!("static".parse::<ScheduleSource>().unwrap(), ScheduleSource::Static);
        assert_eq!(
            " Submitted ".parse::<ScheduleSource>().unwrap(),
            ScheduleSource::Submitted
        );
        assert!(matches!(
            "sql".parse::<ScheduleSource>(),
            Err(PayrollError::InvalidConfig { .. })
        ));
    }
}
