use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::errors::LedgerError;
use crate::core::models::DebtKind;

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub name: String,
    pub member_ids: Vec<String>,
    pub created_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AddMemberRequest {
    pub member_id: String,
    pub added_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RecordDebtRequest {
    pub title: String,
    pub amount: f64,
    pub currency: Option<String>,
    pub debtor_id: String,
    pub creditor_id: String,
    pub kind: Option<DebtKind>,
    pub created_by_id: String,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListDebtsQuery {
    pub queried_by_id: String,
    #[serde(default)]
    pub include_paid: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct TogglePaidRequest {
    pub toggled_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct GetSettlementPlanRequest {
    pub queried_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SettleTransactionRequest {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub currency: String,
    pub settled_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct GetMemberSummaryRequest {
    pub member_id: String,
    pub queried_by_id: String,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for LedgerError to implement IntoResponse
#[derive(Debug)]
pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            LedgerError::GroupNotFound(_) | LedgerError::DebtNotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::AlreadyGroupMember(_) => StatusCode::CONFLICT,
            LedgerError::NotGroupMember(_) => StatusCode::FORBIDDEN,
            LedgerError::SelfDebt
            | LedgerError::SelfSettlement
            | LedgerError::InvalidSettlementTransaction(_)
            | LedgerError::InvalidSettlementAmount
            | LedgerError::InvalidInput(_, _) => StatusCode::BAD_REQUEST,
            LedgerError::StorageError(_)
            | LedgerError::LoggingError(_)
            | LedgerError::CacheError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error = match self.0 {
            LedgerError::InvalidInput(field, detail) => {
                format!("Invalid input for {}: {}", field, detail.description)
            }
            other => other.to_string(),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}
