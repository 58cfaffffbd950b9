pub mod cache_keys;
pub mod in_memory;

use crate::core::errors::LedgerError;
use crate::core::models::SettlementPlan;
use async_trait::async_trait;

#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_settlement_plan(&self, group_id: &str) -> Result<Option<SettlementPlan>, LedgerError>;
    async fn save_settlement_plan(
        &self,
        group_id: &str,
        plan: &SettlementPlan,
        ttl: std::time::Duration,
    ) -> Result<(), LedgerError>;
    async fn invalidate_settlement_plan(&self, group_id: &str) -> Result<(), LedgerError>;
}
