use utoipa::OpenApi;

use crate::{
    api::models::{
        AddMemberRequest, CreateGroupRequest, ErrorResponse, GetMemberSummaryRequest, GetSettlementPlanRequest,
        RecordDebtRequest, SettleTransactionRequest, TogglePaidRequest,
    },
    core::models::{
        AppLog, CurrencyBalances, CurrencySummary, DebtEntry, DebtKind, Group, GroupAudit, GroupMember,
        ParticipantBalance, Role, SettlementPlan, Transaction,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_group,
        super::handlers::get_group,
        super::handlers::add_member,
        super::handlers::record_debt,
        super::handlers::list_debts,
        super::handlers::toggle_debt_paid,
        super::handlers::get_settlement_plan,
        super::handlers::get_net_balances,
        super::handlers::settle_transaction,
        super::handlers::get_member_summary,
        super::handlers::get_group_audits,
        super::handlers::get_app_logs
    ),
    components(schemas(
        CreateGroupRequest,
        AddMemberRequest,
        RecordDebtRequest,
        TogglePaidRequest,
        GetSettlementPlanRequest,
        SettleTransactionRequest,
        GetMemberSummaryRequest,
        ErrorResponse,
        Group,
        GroupMember,
        Role,
        DebtEntry,
        DebtKind,
        SettlementPlan,
        Transaction,
        CurrencyBalances,
        ParticipantBalance,
        CurrencySummary,
        AppLog,
        GroupAudit
    )),
    info(
        title = "Group Ledger API",
        description = "API for recording group debts and simplifying them into settlement payments",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
