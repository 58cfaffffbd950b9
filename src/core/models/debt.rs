use crate::constants::DEFAULT_CURRENCY;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single pairwise IOU as seen by the simplifier.
///
/// Every field but `is_settled` is optional: incomplete records are skipped
/// rather than rejected.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DebtRecord {
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub debtor_id: Option<String>,
    pub creditor_id: Option<String>,
    #[serde(default)]
    pub is_settled: bool,
    /// Set on payments made against a settlement plan.
    #[serde(default)]
    pub is_payment: bool,
}

impl DebtRecord {
    pub fn new(debtor_id: &str, creditor_id: &str, amount: f64, currency: &str) -> Self {
        DebtRecord {
            amount: Some(amount),
            currency: Some(currency.to_string()),
            debtor_id: Some(debtor_id.to_string()),
            creditor_id: Some(creditor_id.to_string()),
            is_settled: false,
            is_payment: false,
        }
    }

    pub fn settled(mut self) -> Self {
        self.is_settled = true;
        self
    }

    pub fn currency_or_default(&self) -> &str {
        currency_or_default(self.currency.as_deref())
    }

    /// `(debtor, creditor, amount)` when the record is complete.
    ///
    /// A zero or NaN amount and an empty id count as missing.
    pub fn parties(&self) -> Option<(&str, &str, f64)> {
        let amount = self.amount.filter(|a| *a != 0.0 && !a.is_nan())?;
        let debtor = self.debtor_id.as_deref().filter(|id| !id.is_empty())?;
        let creditor = self.creditor_id.as_deref().filter(|id| !id.is_empty())?;
        Some((debtor, creditor, amount))
    }
}

pub fn currency_or_default(currency: Option<&str>) -> &str {
    match currency {
        Some(code) if !code.is_empty() => code,
        _ => DEFAULT_CURRENCY,
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DebtKind {
    Debt,
    Loan,
    Settlement,
}

impl std::fmt::Display for DebtKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DebtKind::Debt => "debt",
            DebtKind::Loan => "loan",
            DebtKind::Settlement => "settlement",
        };
        write!(f, "{}", s)
    }
}

/// A debt or loan entry stored for a group.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct DebtEntry {
    pub id: String,
    pub group_id: String,
    pub kind: DebtKind,
    pub title: String,
    pub amount: f64,
    pub currency: String,
    pub debtor_id: String,
    pub creditor_id: String,
    pub is_paid: bool,
    #[schema(value_type = Option<String>, example = "2024-06-01T12:34:56Z")]
    pub paid_at: Option<DateTime<Utc>>,
    pub created_by: String,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub updated_at: DateTime<Utc>,
}

impl DebtEntry {
    pub fn mark_paid(&mut self, paid: bool, at: DateTime<Utc>) {
        self.is_paid = paid;
        self.paid_at = if paid { Some(at) } else { None };
        self.updated_at = at;
    }
}

impl From<&DebtEntry> for DebtRecord {
    fn from(entry: &DebtEntry) -> Self {
        DebtRecord {
            amount: Some(entry.amount),
            currency: Some(entry.currency.clone()),
            debtor_id: Some(entry.debtor_id.clone()),
            creditor_id: Some(entry.creditor_id.clone()),
            is_settled: entry.is_paid,
            is_payment: entry.kind == DebtKind::Settlement,
        }
    }
}

/// Input for recording a new debt in a group.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct NewDebt {
    pub title: String,
    pub amount: f64,
    pub currency: Option<String>,
    pub debtor_id: String,
    pub creditor_id: String,
    #[serde(default = "default_kind")]
    pub kind: DebtKind,
}

fn default_kind() -> DebtKind {
    DebtKind::Debt
}
