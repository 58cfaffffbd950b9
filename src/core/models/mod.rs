pub mod audit;
pub mod debt;
pub mod group;
pub mod summary;
pub mod transaction;

pub use audit::{AppLog, GroupAudit, audit_details};
pub use debt::{DebtEntry, DebtKind, DebtRecord, NewDebt};
pub use group::{Group, GroupMember, Role};
pub use summary::{CurrencyBalances, CurrencySummary, ParticipantBalance};
pub use transaction::{SettlementPlan, Transaction};
