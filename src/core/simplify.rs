use crate::constants::SETTLEMENT_TOLERANCE;
use crate::core::models::{CurrencyBalances, CurrencySummary, DebtRecord, ParticipantBalance, Transaction};
use log::debug;
use std::collections::HashMap;

/// Rounds to cents, half-up toward positive infinity.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Balance map that remembers the order in which ids were first seen.
///
/// Seeded ids come first, ids that only show up on a record are appended
/// when first touched.
#[derive(Default)]
struct BalanceSheet {
    index: HashMap<String, usize>,
    entries: Vec<(String, f64)>,
}

impl BalanceSheet {
    fn seeded(participant_ids: &[String]) -> Self {
        let mut sheet = BalanceSheet::default();
        for id in participant_ids {
            sheet.adjust(id, 0.0);
        }
        sheet
    }

    fn adjust(&mut self, id: &str, delta: f64) {
        match self.index.get(id) {
            Some(&pos) => self.entries[pos].1 += delta,
            None => {
                self.index.insert(id.to_string(), self.entries.len());
                self.entries.push((id.to_string(), delta));
            }
        }
    }

    fn into_entries(self) -> Vec<(String, f64)> {
        self.entries
    }
}

/// Groups unsettled records by currency, in first-occurrence order.
fn partition_by_currency(debts: &[DebtRecord]) -> Vec<(String, Vec<&DebtRecord>)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&DebtRecord>)> = Vec::new();

    for debt in debts.iter().filter(|d| !d.is_settled) {
        let currency = debt.currency_or_default();
        let pos = *positions.entry(currency).or_insert_with(|| {
            groups.push((currency.to_string(), Vec::new()));
            groups.len() - 1
        });
        groups[pos].1.push(debt);
    }

    groups
}

fn balance_sheet(debts: &[&DebtRecord], participant_ids: &[String]) -> BalanceSheet {
    let mut sheet = BalanceSheet::seeded(participant_ids);
    for (debtor, creditor, amount) in debts.iter().filter_map(|d| d.parties()) {
        sheet.adjust(debtor, -amount);
        sheet.adjust(creditor, amount);
    }
    sheet
}

/// Net balance of every participant, per currency.
///
/// Settled records are ignored and incomplete ones contribute nothing.
/// Ids that appear on a record but not in `participant_ids` still get a
/// balance.
pub fn net_balances(debts: &[DebtRecord], participant_ids: &[String]) -> Vec<CurrencyBalances> {
    partition_by_currency(debts)
        .into_iter()
        .map(|(currency, records)| CurrencyBalances {
            currency,
            balances: balance_sheet(&records, participant_ids)
                .into_entries()
                .into_iter()
                .map(|(participant_id, balance)| ParticipantBalance { participant_id, balance })
                .collect(),
        })
        .collect()
}

struct Position {
    id: String,
    amount: f64,
}

fn settle_currency(currency: &str, balances: Vec<(String, f64)>, out: &mut Vec<Transaction>) {
    let mut debtors: Vec<Position> = Vec::new();
    let mut creditors: Vec<Position> = Vec::new();

    for (id, balance) in balances {
        let value = round_to_cents(balance);
        if value < -SETTLEMENT_TOLERANCE {
            debtors.push(Position { id, amount: -value });
        } else if value > SETTLEMENT_TOLERANCE {
            creditors.push(Position { id, amount: value });
        }
    }

    // Largest first; sort_by is stable so ties keep balance order.
    debtors.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    creditors.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    let mut i = 0;
    let mut j = 0;
    while i < debtors.len() && j < creditors.len() {
        let amount = debtors[i].amount.min(creditors[j].amount);

        if amount > 0.0 {
            out.push(Transaction {
                from: debtors[i].id.clone(),
                to: creditors[j].id.clone(),
                amount: round_to_cents(amount),
                currency: currency.to_string(),
            });
        }

        debtors[i].amount -= amount;
        creditors[j].amount -= amount;

        if debtors[i].amount < SETTLEMENT_TOLERANCE {
            i += 1;
        }
        if creditors[j].amount < SETTLEMENT_TOLERANCE {
            j += 1;
        }
    }
}

/// Reduces a set of pairwise debts to a short list of settling payments.
///
/// Each currency is settled on its own: balances are netted per
/// participant, then the largest debtor pays the largest creditor until
/// one side runs out. Currencies appear in the output in the order they
/// first occur in `debts`. The greedy matching is a heuristic and does not
/// always produce the fewest possible payments.
pub fn simplify_debts(debts: &[DebtRecord], participant_ids: &[String]) -> Vec<Transaction> {
    let mut transactions = Vec::new();

    for (currency, records) in partition_by_currency(debts) {
        let balances = balance_sheet(&records, participant_ids).into_entries();
        debug!("Settling {} with {} participants", currency, balances.len());
        settle_currency(&currency, balances, &mut transactions);
    }

    debug!("Simplified {} debts into {} transactions", debts.len(), transactions.len());
    transactions
}

/// What `member_id` is owed and owes per currency, from unsettled records.
///
/// Payments are stored with payee and payer swapped, so a payment the
/// member made lowers what they owe and one they received lowers what they
/// are owed.
pub fn member_summary(debts: &[DebtRecord], member_id: &str) -> Vec<CurrencySummary> {
    partition_by_currency(debts)
        .into_iter()
        .map(|(currency, records)| {
            let mut summary = CurrencySummary {
                currency,
                owed_to_member: 0.0,
                member_owes: 0.0,
            };
            for record in &records {
                let Some((debtor, creditor, amount)) = record.parties() else {
                    continue;
                };
                if record.is_payment {
                    if creditor == member_id {
                        summary.member_owes -= amount;
                    }
                    if debtor == member_id {
                        summary.owed_to_member -= amount;
                    }
                    continue;
                }
                if creditor == member_id {
                    summary.owed_to_member += amount;
                }
                if debtor == member_id {
                    summary.member_owes += amount;
                }
            }
            summary.owed_to_member = round_to_cents(summary.owed_to_member.max(0.0));
            summary.member_owes = round_to_cents(summary.member_owes.max(0.0));
            summary
        })
        .collect()
}
