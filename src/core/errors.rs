use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

impl FieldError {
    pub fn new(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Error, Debug, Serialize)]
pub enum LedgerError {
    /// Group with given ID not found
    #[error("Group {0} not found")]
    GroupNotFound(String),

    /// Debt entry with given ID not found in the group
    #[error("Debt {0} not found")]
    DebtNotFound(String),

    /// Participant is already a member of the group
    #[error("Member {0} is already in the group")]
    AlreadyGroupMember(String),

    /// Participant is not a member of the group
    #[error("Member {0} is not in the group")]
    NotGroupMember(String),

    /// A debt cannot be recorded from a member to themselves
    #[error("Debtor and creditor must be different members")]
    SelfDebt,

    /// A settlement cannot be paid from a member to themselves
    #[error("Cannot create settlement to self")]
    SelfSettlement,

    /// The transaction is not part of the group's current settlement plan
    #[error("Transaction {0} is not part of the settlement plan")]
    InvalidSettlementTransaction(String),

    /// Settlement amount exceeds what the plan calls for
    #[error("Invalid settlement amount")]
    InvalidSettlementAmount,

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}

impl LedgerError {
    pub fn invalid_input(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        LedgerError::InvalidInput(field.to_string(), FieldError::new(field, title, description))
    }
}
