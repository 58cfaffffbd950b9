use crate::config::{CONFIG, Config};
use crate::constants::{
    CURRENCY_CLOSED, DEBT_PAID_TOGGLED, DEBT_RECORDED, GROUP_CREATED, MAX_AMOUNT, MAX_NAME_LENGTH, MEMBER_ADDED,
    PLAN_QUERIED, SETTLEMENT_TOLERANCE, SUMMARY_QUERIED, TRANSACTION_SETTLED,
};
use crate::core::errors::LedgerError;
use crate::core::models::{
    AppLog, CurrencyBalances, CurrencySummary, DebtEntry, DebtKind, DebtRecord, Group, GroupAudit, GroupMember,
    NewDebt, Role, SettlementPlan, Transaction, audit_details,
};
use crate::core::simplify::{member_summary, net_balances, simplify_debts};
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use futures::future::try_join_all;
use log::{debug, info, warn};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

pub struct LedgerService<L: LoggingService, S: Storage, C: Cache> {
    storage: S,
    logging: L,
    cache: C,
    config: Config,
    settle_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<L: LoggingService, S: Storage, C: Cache> LedgerService<L, S, C> {
    pub fn new(storage: S, logging: L, cache: C) -> Self {
        Self::with_config(storage, logging, cache, (*CONFIG).clone())
    }

    pub fn with_config(storage: S, logging: L, cache: C, config: Config) -> Self {
        info!("Initializing LedgerService (default currency {})", config.default_currency);
        LedgerService {
            storage,
            logging,
            cache,
            config,
            settle_locks: Mutex::new(HashMap::new()),
        }
    }

    async fn require_group(&self, group_id: &str) -> Result<Group, LedgerError> {
        self.storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))
    }

    async fn validate_group_membership(&self, group_id: &str, member_id: &str) -> Result<Group, LedgerError> {
        let group = self.require_group(group_id).await?;
        if !group.has_member(member_id) {
            warn!("{} is not a member of group {}", member_id, group_id);
            return Err(LedgerError::NotGroupMember(member_id.to_string()));
        }
        Ok(group)
    }

    async fn log_and_audit(
        &self,
        group_id: Option<&str>,
        action: &str,
        log_details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), LedgerError> {
        self.logging.log_action(action, log_details.clone(), user_id).await?;
        if let Some(gid) = group_id {
            let details = audit_details(log_details)?;
            self.storage
                .save_group_audit(GroupAudit {
                    id: Uuid::new_v4().to_string(),
                    group_id: gid.to_string(),
                    action: action.to_string(),
                    user_id: user_id.map(String::from),
                    details,
                    timestamp: Utc::now(),
                })
                .await?;
        }
        Ok(())
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), LedgerError> {
        if value.trim().is_empty() {
            return Err(LedgerError::invalid_input(
                field,
                format!("Invalid {}", field),
                format!("{} cannot be empty", field),
            ));
        }
        if value.len() > max_length {
            return Err(LedgerError::invalid_input(
                field,
                format!("{} Too Long", field),
                format!("{} cannot exceed {} characters", field, max_length),
            ));
        }
        if value.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
            return Err(LedgerError::invalid_input(
                field,
                format!("Invalid {}", field),
                format!("{} contains invalid characters", field),
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: f64) -> Result<(), LedgerError> {
        if !amount.is_finite() {
            return Err(LedgerError::invalid_input(
                field,
                "Invalid Amount",
                "Amount must be a finite number",
            ));
        }
        if amount <= 0.0 {
            return Err(LedgerError::invalid_input(
                field,
                "Invalid Amount",
                "Amount must be greater than 0",
            ));
        }
        if amount > MAX_AMOUNT {
            return Err(LedgerError::invalid_input(
                field,
                "Amount Too Large",
                "Amount cannot exceed 1,000,000",
            ));
        }
        if ((amount * 100.0).round() - amount * 100.0).abs() > 1e-6 {
            return Err(LedgerError::invalid_input(
                field,
                "Invalid Amount",
                "Amount cannot have more than 2 decimal places",
            ));
        }
        Ok(())
    }

    /// Upper-cased three letter code, or the configured default when absent.
    fn normalize_currency(&self, currency: Option<&str>) -> Result<String, LedgerError> {
        let code = match currency.map(str::trim).filter(|c| !c.is_empty()) {
            Some(code) => code.to_uppercase(),
            None => return Ok(self.config.default_currency.clone()),
        };
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(LedgerError::invalid_input(
                "currency",
                "Invalid Currency",
                format!("{} is not a three letter currency code", code),
            ));
        }
        Ok(code)
    }

    // GROUPS

    pub async fn create_group(
        &self,
        name: String,
        member_ids: Vec<String>,
        created_by: &str,
    ) -> Result<Group, LedgerError> {
        self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;
        self.validate_string_input("created_by", created_by, MAX_NAME_LENGTH)?;

        let mut members = vec![GroupMember {
            member_id: created_by.to_string(),
            role: Role::Owner,
        }];
        for id in member_ids {
            self.validate_string_input("member_id", &id, MAX_NAME_LENGTH)?;
            if !members.iter().any(|m| m.member_id == id) {
                members.push(GroupMember {
                    member_id: id,
                    role: Role::Member,
                });
            }
        }

        let group = Group {
            id: Uuid::new_v4().to_string(),
            name,
            members,
        };
        self.storage.save_group(group.clone()).await?;
        debug!("Group created with ID: {}", group.id);

        self.log_and_audit(
            Some(&group.id),
            GROUP_CREATED,
            json!({ "group_id": group.id, "name": group.name, "member_ids": group.member_ids() }),
            Some(created_by),
        )
        .await?;

        Ok(group)
    }

    pub async fn get_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError> {
        self.storage.get_group(group_id).await
    }

    pub async fn add_member(&self, group_id: &str, member_id: &str, added_by: &str) -> Result<Group, LedgerError> {
        let mut group = self.validate_group_membership(group_id, added_by).await?;
        self.validate_string_input("member_id", member_id, MAX_NAME_LENGTH)?;
        if group.has_member(member_id) {
            return Err(LedgerError::AlreadyGroupMember(member_id.to_string()));
        }

        group.members.push(GroupMember {
            member_id: member_id.to_string(),
            role: Role::Member,
        });
        self.storage.save_group(group.clone()).await?;
        self.cache.invalidate_settlement_plan(group_id).await?;

        self.log_and_audit(
            Some(group_id),
            MEMBER_ADDED,
            json!({ "group_id": group_id, "member_id": member_id }),
            Some(added_by),
        )
        .await?;
        Ok(group)
    }

    // DEBTS

    pub async fn record_debt(&self, group_id: &str, debt: NewDebt, created_by: &str) -> Result<DebtEntry, LedgerError> {
        info!(
            "Recording {} of {} in group {} by {}",
            debt.kind, debt.amount, group_id, created_by
        );
        let group = self.validate_group_membership(group_id, created_by).await?;
        self.validate_string_input("title", &debt.title, MAX_NAME_LENGTH)?;
        self.validate_amount_input("amount", debt.amount)?;
        if debt.debtor_id == debt.creditor_id {
            return Err(LedgerError::SelfDebt);
        }
        for party in [&debt.debtor_id, &debt.creditor_id] {
            if !group.has_member(party) {
                return Err(LedgerError::NotGroupMember(party.clone()));
            }
        }
        let currency = self.normalize_currency(debt.currency.as_deref())?;

        let now = Utc::now();
        let entry = DebtEntry {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            kind: debt.kind,
            title: debt.title,
            amount: debt.amount,
            currency,
            debtor_id: debt.debtor_id,
            creditor_id: debt.creditor_id,
            is_paid: false,
            paid_at: None,
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.storage.save_debt(entry.clone()).await?;
        self.cache.invalidate_settlement_plan(group_id).await?;

        self.log_and_audit(
            Some(group_id),
            DEBT_RECORDED,
            json!({
                "debt_id": entry.id,
                "amount": entry.amount,
                "currency": entry.currency,
                "debtor_id": entry.debtor_id,
                "creditor_id": entry.creditor_id
            }),
            Some(created_by),
        )
        .await?;

        Ok(entry)
    }

    pub async fn list_debts(
        &self,
        group_id: &str,
        queried_by: &str,
        include_paid: bool,
    ) -> Result<Vec<DebtEntry>, LedgerError> {
        self.validate_group_membership(group_id, queried_by).await?;
        let debts = self.storage.get_group_debts(group_id).await?;
        Ok(debts
            .into_iter()
            .filter(|d| include_paid || (!d.is_paid && d.kind != DebtKind::Settlement))
            .collect())
    }

    pub async fn toggle_debt_paid(
        &self,
        group_id: &str,
        debt_id: &str,
        toggled_by: &str,
    ) -> Result<DebtEntry, LedgerError> {
        self.validate_group_membership(group_id, toggled_by).await?;
        let mut debt = self
            .storage
            .get_debt(group_id, debt_id)
            .await?
            .ok_or_else(|| LedgerError::DebtNotFound(debt_id.to_string()))?;

        let paid = !debt.is_paid;
        debt.mark_paid(paid, Utc::now());
        self.storage.save_debt(debt.clone()).await?;
        self.cache.invalidate_settlement_plan(group_id).await?;
        debug!("Debt {} is_paid set to {}", debt_id, paid);

        self.log_and_audit(
            Some(group_id),
            DEBT_PAID_TOGGLED,
            json!({ "debt_id": debt_id, "is_paid": paid }),
            Some(toggled_by),
        )
        .await?;
        Ok(debt)
    }

    // SETTLEMENT

    async fn group_records(&self, group_id: &str) -> Result<Vec<DebtRecord>, LedgerError> {
        let debts = self.storage.get_group_debts(group_id).await?;
        Ok(debts.iter().map(DebtRecord::from).collect())
    }

    async fn settle_lock(&self, group_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.settle_locks.lock().await;
        locks.entry(group_id.to_string()).or_default().clone()
    }

    async fn compute_plan(&self, group: &Group) -> Result<SettlementPlan, LedgerError> {
        if let Some(plan) = self.cache.get_settlement_plan(&group.id).await? {
            debug!("Settlement plan cache hit for group {}", group.id);
            return Ok(plan);
        }

        let records = self.group_records(&group.id).await?;
        let plan = SettlementPlan {
            group_id: group.id.clone(),
            transactions: simplify_debts(&records, &group.member_ids()),
            generated_at: Utc::now(),
        };
        self.cache
            .save_settlement_plan(&group.id, &plan, self.config.plan_cache_ttl)
            .await?;
        Ok(plan)
    }

    pub async fn get_settlement_plan(&self, group_id: &str, queried_by: &str) -> Result<SettlementPlan, LedgerError> {
        let group = self.validate_group_membership(group_id, queried_by).await?;
        let plan = self.compute_plan(&group).await?;

        self.log_and_audit(
            Some(group_id),
            PLAN_QUERIED,
            json!({ "group_id": group_id, "transactions": plan.transactions.len() }),
            Some(queried_by),
        )
        .await?;
        Ok(plan)
    }

    pub async fn get_net_balances(&self, group_id: &str, queried_by: &str) -> Result<Vec<CurrencyBalances>, LedgerError> {
        let group = self.validate_group_membership(group_id, queried_by).await?;
        let records = self.group_records(group_id).await?;
        Ok(net_balances(&records, &group.member_ids()))
    }

    /// Records that `transaction.from` paid `transaction.to`.
    ///
    /// The payment is stored as an offsetting entry. When it leaves the
    /// currency fully balanced, every open entry in that currency is marked
    /// paid.
    pub async fn settle_transaction(
        &self,
        group_id: &str,
        transaction: &Transaction,
        settled_by: &str,
    ) -> Result<DebtEntry, LedgerError> {
        info!(
            "Settling {} -> {} {} {} in group {}",
            transaction.from, transaction.to, transaction.amount, transaction.currency, group_id
        );
        if transaction.from == transaction.to {
            return Err(LedgerError::SelfSettlement);
        }
        self.validate_amount_input("amount", transaction.amount)?;
        let group = self.validate_group_membership(group_id, settled_by).await?;

        // Held until the payment is stored so the same step cannot be paid twice.
        let lock = self.settle_lock(group_id).await;
        let _guard = lock.lock().await;

        let plan = self.compute_plan(&group).await?;
        let planned = plan
            .for_currency(&transaction.currency)
            .find(|t| t.from == transaction.from && t.to == transaction.to)
            .ok_or_else(|| {
                warn!("No planned payment {} -> {} in group {}", transaction.from, transaction.to, group_id);
                LedgerError::InvalidSettlementTransaction(format!(
                    "{} -> {} ({})",
                    transaction.from, transaction.to, transaction.currency
                ))
            })?;
        if transaction.amount > planned.amount + SETTLEMENT_TOLERANCE {
            warn!(
                "Settlement of {} exceeds planned {} in group {}",
                transaction.amount, planned.amount, group_id
            );
            return Err(LedgerError::InvalidSettlementAmount);
        }

        let now = Utc::now();
        // A payment from A to B cancels out as if B owed A the same amount.
        let mut payment = DebtEntry {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            kind: DebtKind::Settlement,
            title: format!("{} paid {}", transaction.from, transaction.to),
            amount: transaction.amount,
            currency: transaction.currency.clone(),
            debtor_id: transaction.to.clone(),
            creditor_id: transaction.from.clone(),
            is_paid: false,
            paid_at: None,
            created_by: settled_by.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.storage.save_debt(payment.clone()).await?;
        self.cache.invalidate_settlement_plan(group_id).await?;

        self.log_and_audit(
            Some(group_id),
            TRANSACTION_SETTLED,
            json!({
                "payment_id": payment.id,
                "from": transaction.from,
                "to": transaction.to,
                "amount": transaction.amount,
                "currency": transaction.currency
            }),
            Some(settled_by),
        )
        .await?;

        let open: Vec<DebtEntry> = self
            .storage
            .get_group_debts(group_id)
            .await?
            .into_iter()
            .filter(|d| d.currency == transaction.currency && !d.is_paid)
            .collect();
        let records: Vec<DebtRecord> = open.iter().map(DebtRecord::from).collect();
        if simplify_debts(&records, &group.member_ids()).is_empty() {
            let closed = open.len();
            try_join_all(open.into_iter().map(|mut entry| {
                entry.mark_paid(true, now);
                self.storage.save_debt(entry)
            }))
            .await?;
            payment.mark_paid(true, now);
            info!(
                "Closed {} entries in {} for group {}",
                closed, transaction.currency, group_id
            );

            self.log_and_audit(
                Some(group_id),
                CURRENCY_CLOSED,
                json!({ "currency": transaction.currency, "entries": closed }),
                Some(settled_by),
            )
            .await?;
        }

        Ok(payment)
    }

    pub async fn get_member_summary(
        &self,
        group_id: &str,
        member_id: &str,
        queried_by: &str,
    ) -> Result<Vec<CurrencySummary>, LedgerError> {
        let group = self.validate_group_membership(group_id, queried_by).await?;
        if !group.has_member(member_id) {
            return Err(LedgerError::NotGroupMember(member_id.to_string()));
        }
        let records = self.group_records(group_id).await?;
        let summary = member_summary(&records, member_id);

        self.log_and_audit(
            Some(group_id),
            SUMMARY_QUERIED,
            json!({ "member_id": member_id }),
            Some(queried_by),
        )
        .await?;
        Ok(summary)
    }

    // AUDIT

    pub async fn get_group_audits(&self, group_id: &str) -> Result<Vec<GroupAudit>, LedgerError> {
        self.require_group(group_id).await?;
        self.storage.get_group_audits(group_id).await
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, LedgerError> {
        self.logging.get_logs().await
    }
}
