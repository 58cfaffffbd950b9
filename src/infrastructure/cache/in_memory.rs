use crate::core::errors::LedgerError;
use crate::core::models::SettlementPlan;
use crate::infrastructure::cache::{Cache, cache_keys::settlement_plan_key};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryCache {
    cache: Arc<RwLock<HashMap<String, (SettlementPlan, DateTime<Utc>)>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        InMemoryCache {
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_settlement_plan(&self, group_id: &str) -> Result<Option<SettlementPlan>, LedgerError> {
        let cache = self.cache.read().await;
        let key = settlement_plan_key(group_id);
        Ok(cache
            .get(&key)
            .filter(|(_, expiry)| *expiry > Utc::now())
            .map(|(plan, _)| plan.clone()))
    }

    async fn save_settlement_plan(
        &self,
        group_id: &str,
        plan: &SettlementPlan,
        ttl: std::time::Duration,
    ) -> Result<(), LedgerError> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| LedgerError::CacheError(format!("Failed to convert TTL: {}", e)))?;
        let mut cache = self.cache.write().await;
        cache.insert(settlement_plan_key(group_id), (plan.clone(), Utc::now() + ttl));
        Ok(())
    }

    async fn invalidate_settlement_plan(&self, group_id: &str) -> Result<(), LedgerError> {
        let mut cache = self.cache.write().await;
        cache.remove(&settlement_plan_key(group_id));
        cache.retain(|_, (_, expiry)| *expiry > Utc::now());
        Ok(())
    }
}
