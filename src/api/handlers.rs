use crate::{
    api::models::*,
    core::{
        models::{
            AppLog, CurrencyBalances, CurrencySummary, DebtEntry, DebtKind, Group, GroupAudit, NewDebt,
            SettlementPlan, Transaction,
        },
        services::LedgerService,
    },
    infrastructure::{
        cache::in_memory::InMemoryCache, logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage,
    },
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use std::sync::Arc;

pub type SharedService = Arc<LedgerService<InMemoryLogging, InMemoryStorage, InMemoryCache>>;

// Define API routes
pub fn api_routes(service: SharedService) -> Router {
    Router::new()
        .route("/groups", post(create_group))
        .route("/groups/{group_id}", get(get_group))
        .route("/groups/{group_id}/members", post(add_member))
        .route("/groups/{group_id}/debts", post(record_debt).get(list_debts))
        .route("/groups/{group_id}/debts/{debt_id}/paid", post(toggle_debt_paid))
        .route("/groups/{group_id}/plan", post(get_settlement_plan))
        .route("/groups/{group_id}/balances", post(get_net_balances))
        .route("/groups/{group_id}/settle", post(settle_transaction))
        .route("/groups/{group_id}/summary", post(get_member_summary))
        .route("/groups/{group_id}/audits", get(get_group_audits))
        .route("/logs", get(get_app_logs))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 200, description = "Group created successfully", body = Group),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_group(
    State(service): State<SharedService>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    let group = service
        .create_group(req.name, req.member_ids, &req.created_by_id)
        .await?;
    Ok(Json(group))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}",
    params(
        ("group_id" = String, Path, description = "ID of the group to retrieve")
    ),
    responses(
        (status = 200, description = "Group retrieved successfully", body = Group),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_group(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
) -> Result<Json<Group>, ApiError> {
    let group = service
        .get_group(&group_id)
        .await?
        .ok_or(crate::LedgerError::GroupNotFound(group_id))?;
    Ok(Json(group))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/members",
    request_body = AddMemberRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Member added", body = Group),
        (status = 403, description = "Caller is not a group member", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 409, description = "Already a member", body = ErrorResponse)
    )
)]
pub async fn add_member(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
    Json(req): Json<AddMemberRequest>,
) -> Result<Json<Group>, ApiError> {
    let group = service
        .add_member(&group_id, &req.member_id, &req.added_by_id)
        .await?;
    Ok(Json(group))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/debts",
    request_body = RecordDebtRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Debt recorded", body = DebtEntry),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 403, description = "Party is not a group member", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn record_debt(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
    Json(req): Json<RecordDebtRequest>,
) -> Result<Json<DebtEntry>, ApiError> {
    let debt = NewDebt {
        title: req.title,
        amount: req.amount,
        currency: req.currency,
        debtor_id: req.debtor_id,
        creditor_id: req.creditor_id,
        kind: req.kind.unwrap_or(DebtKind::Debt),
    };
    let entry = service.record_debt(&group_id, debt, &req.created_by_id).await?;
    Ok(Json(entry))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/debts",
    params(
        ("group_id" = String, Path, description = "ID of the group"),
        ListDebtsQuery
    ),
    responses(
        (status = 200, description = "Debts of the group", body = Vec<DebtEntry>),
        (status = 403, description = "Caller is not a group member", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn list_debts(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
    Query(query): Query<ListDebtsQuery>,
) -> Result<Json<Vec<DebtEntry>>, ApiError> {
    let debts = service
        .list_debts(&group_id, &query.queried_by_id, query.include_paid)
        .await?;
    Ok(Json(debts))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/debts/{debt_id}/paid",
    request_body = TogglePaidRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group"),
        ("debt_id" = String, Path, description = "ID of the debt to toggle")
    ),
    responses(
        (status = 200, description = "Paid flag toggled", body = DebtEntry),
        (status = 404, description = "Group or debt not found", body = ErrorResponse)
    )
)]
pub async fn toggle_debt_paid(
    State(service): State<SharedService>,
    Path((group_id, debt_id)): Path<(String, String)>,
    Json(req): Json<TogglePaidRequest>,
) -> Result<Json<DebtEntry>, ApiError> {
    let debt = service
        .toggle_debt_paid(&group_id, &debt_id, &req.toggled_by_id)
        .await?;
    Ok(Json(debt))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/plan",
    request_body = GetSettlementPlanRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Simplified settlement plan", body = SettlementPlan),
        (status = 403, description = "Caller is not a group member", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_settlement_plan(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
    Json(req): Json<GetSettlementPlanRequest>,
) -> Result<Json<SettlementPlan>, ApiError> {
    let plan = service.get_settlement_plan(&group_id, &req.queried_by_id).await?;
    Ok(Json(plan))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/balances",
    request_body = GetSettlementPlanRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Net balance per member and currency", body = Vec<CurrencyBalances>),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_net_balances(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
    Json(req): Json<GetSettlementPlanRequest>,
) -> Result<Json<Vec<CurrencyBalances>>, ApiError> {
    let balances = service.get_net_balances(&group_id, &req.queried_by_id).await?;
    Ok(Json(balances))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/settle",
    request_body = SettleTransactionRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Payment recorded", body = DebtEntry),
        (status = 400, description = "Payment is not part of the plan", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn settle_transaction(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
    Json(req): Json<SettleTransactionRequest>,
) -> Result<Json<DebtEntry>, ApiError> {
    let transaction = Transaction {
        from: req.from,
        to: req.to,
        amount: req.amount,
        currency: req.currency,
    };
    let payment = service
        .settle_transaction(&group_id, &transaction, &req.settled_by_id)
        .await?;
    Ok(Json(payment))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/summary",
    request_body = GetMemberSummaryRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Amounts owed and owing per currency", body = Vec<CurrencySummary>),
        (status = 403, description = "Not a group member", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_member_summary(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
    Json(req): Json<GetMemberSummaryRequest>,
) -> Result<Json<Vec<CurrencySummary>>, ApiError> {
    let summary = service
        .get_member_summary(&group_id, &req.member_id, &req.queried_by_id)
        .await?;
    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/audits",
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Audit trail of the group", body = Vec<GroupAudit>),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_group_audits(
    State(service): State<SharedService>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<GroupAudit>>, ApiError> {
    let audits = service.get_group_audits(&group_id).await?;
    Ok(Json(audits))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Application logs", body = Vec<AppLog>)
    )
)]
pub async fn get_app_logs(State(service): State<SharedService>) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs().await?;
    Ok(Json(logs))
}
