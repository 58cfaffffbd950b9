use crate::core::errors::LedgerError;
use crate::core::models::{AppLog, audit_details};
use crate::infrastructure::logging::LoggingService;
use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Append-only action log kept in process memory.
#[derive(Clone, Default)]
pub struct InMemoryLogging {
    entries: Arc<RwLock<Vec<AppLog>>>,
}

impl InMemoryLogging {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LoggingService for InMemoryLogging {
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), LedgerError> {
        let entry = AppLog {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            user_id: user_id.map(String::from),
            details: audit_details(details)?,
            timestamp: Utc::now(),
        };
        debug!("{} by {}", entry.action, entry.user_id.as_deref().unwrap_or("system"));
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, LedgerError> {
        Ok(self.entries.read().await.clone())
    }
}
