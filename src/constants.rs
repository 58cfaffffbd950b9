/// Balances and sweep remainders below this magnitude count as settled.
pub const SETTLEMENT_TOLERANCE: f64 = 0.01;

/// Currency assumed for records that do not carry one.
pub const DEFAULT_CURRENCY: &str = "PEN";

pub const MAX_AMOUNT: f64 = 1_000_000.0;
pub const MAX_NAME_LENGTH: usize = 100;

// Audit actions
pub const GROUP_CREATED: &str = "GROUP_CREATED";
pub const MEMBER_ADDED: &str = "MEMBER_ADDED";
pub const DEBT_RECORDED: &str = "DEBT_RECORDED";
pub const DEBT_PAID_TOGGLED: &str = "DEBT_PAID_TOGGLED";
pub const PLAN_QUERIED: &str = "PLAN_QUERIED";
pub const TRANSACTION_SETTLED: &str = "TRANSACTION_SETTLED";
pub const CURRENCY_CLOSED: &str = "CURRENCY_CLOSED";
pub const SUMMARY_QUERIED: &str = "SUMMARY_QUERIED";
