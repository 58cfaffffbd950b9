use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ParticipantBalance {
    pub participant_id: String,
    /// Positive when the participant is owed money, negative when they owe.
    pub balance: f64,
}

/// Net positions of every participant in a single currency.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CurrencyBalances {
    pub currency: String,
    pub balances: Vec<ParticipantBalance>,
}

impl CurrencyBalances {
    pub fn balance_of(&self, participant_id: &str) -> Option<f64> {
        self.balances
            .iter()
            .find(|b| b.participant_id == participant_id)
            .map(|b| b.balance)
    }

    pub fn total(&self) -> f64 {
        self.balances.iter().map(|b| b.balance).sum()
    }
}

/// Amounts one member is owed and owes in a currency, net of payments.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CurrencySummary {
    pub currency: String,
    pub owed_to_member: f64,
    pub member_owes: f64,
}
