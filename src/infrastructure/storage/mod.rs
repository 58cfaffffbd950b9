use crate::core::errors::LedgerError;
use crate::core::models::{DebtEntry, Group, GroupAudit};
use async_trait::async_trait;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_group(&self, group: Group) -> Result<(), LedgerError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError>;
    /// Inserts a new entry or replaces the one with the same id, keeping its position.
    async fn save_debt(&self, debt: DebtEntry) -> Result<(), LedgerError>;
    async fn get_debt(&self, group_id: &str, debt_id: &str) -> Result<Option<DebtEntry>, LedgerError>;
    /// Entries of a group in the order they were recorded.
    async fn get_group_debts(&self, group_id: &str) -> Result<Vec<DebtEntry>, LedgerError>;
    async fn save_group_audit(&self, audit: GroupAudit) -> Result<(), LedgerError>;
    async fn get_group_audits(&self, group_id: &str) -> Result<Vec<GroupAudit>, LedgerError>;
}

pub mod in_memory;
