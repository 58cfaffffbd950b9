use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One settling payment: `from` pays `to`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Transaction {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub currency: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SettlementPlan {
    pub group_id: String,
    pub transactions: Vec<Transaction>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub generated_at: DateTime<Utc>,
}

impl SettlementPlan {
    pub fn for_currency<'a>(&'a self, currency: &'a str) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.transactions.iter().filter(move |t| t.currency == currency)
    }
}
