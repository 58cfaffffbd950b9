use crate::core::errors::LedgerError;
use crate::core::models::{DebtEntry, Group, GroupAudit};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    groups: Arc<RwLock<HashMap<String, Group>>>,
    // Per group, in recording order
    debts: Arc<RwLock<HashMap<String, Vec<DebtEntry>>>>,
    group_audits: Arc<RwLock<HashMap<String, Vec<GroupAudit>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            groups: Arc::new(RwLock::new(HashMap::new())),
            debts: Arc::new(RwLock::new(HashMap::new())),
            group_audits: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_group(&self, group: Group) -> Result<(), LedgerError> {
        let mut groups = self.groups.write().await;
        groups.insert(group.id.clone(), group);
        Ok(())
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError> {
        let groups = self.groups.read().await;
        Ok(groups.get(group_id).cloned())
    }

    async fn save_debt(&self, debt: DebtEntry) -> Result<(), LedgerError> {
        let mut debts = self.debts.write().await;
        let entries = debts.entry(debt.group_id.clone()).or_default();
        match entries.iter_mut().find(|d| d.id == debt.id) {
            Some(existing) => *existing = debt,
            None => entries.push(debt),
        }
        Ok(())
    }

    async fn get_debt(&self, group_id: &str, debt_id: &str) -> Result<Option<DebtEntry>, LedgerError> {
        let debts = self.debts.read().await;
        Ok(debts
            .get(group_id)
            .and_then(|entries| entries.iter().find(|d| d.id == debt_id))
            .cloned())
    }

    async fn get_group_debts(&self, group_id: &str) -> Result<Vec<DebtEntry>, LedgerError> {
        let debts = self.debts.read().await;
        Ok(debts.get(group_id).cloned().unwrap_or_default())
    }

    async fn save_group_audit(&self, audit: GroupAudit) -> Result<(), LedgerError> {
        let mut audits = self.group_audits.write().await;
        audits.entry(audit.group_id.clone()).or_default().push(audit);
        Ok(())
    }

    async fn get_group_audits(&self, group_id: &str) -> Result<Vec<GroupAudit>, LedgerError> {
        let audits = self.group_audits.read().await;
        Ok(audits.get(group_id).cloned().unwrap_or_default())
    }
}
