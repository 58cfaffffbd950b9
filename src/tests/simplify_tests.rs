use crate::core::models::{DebtRecord, Transaction};
use crate::core::simplify::{member_summary, net_balances, round_to_cents, simplify_debts};
use crate::tests::ids;
use std::collections::HashMap;

fn debt(debtor: &str, creditor: &str, amount: f64, currency: &str) -> DebtRecord {
    DebtRecord::new(debtor, creditor, amount, currency)
}

fn tx(from: &str, to: &str, amount: f64, currency: &str) -> Transaction {
    Transaction {
        from: from.to_string(),
        to: to.to_string(),
        amount,
        currency: currency.to_string(),
    }
}

#[test]
fn test_empty_input_yields_no_transactions() {
    assert!(simplify_debts(&[], &[]).is_empty());
    assert!(simplify_debts(&[], &ids(&["p1", "p2"])).is_empty());
}

#[test]
fn test_single_debt() {
    let debts = vec![debt("A", "B", 100.0, "PEN")];
    let result = simplify_debts(&debts, &ids(&["A", "B"]));
    assert_eq!(result, vec![tx("A", "B", 100.0, "PEN")]);
}

#[test]
fn test_cycle_cancels_out() {
    let debts = vec![debt("A", "B", 50.0, "PEN"), debt("B", "A", 50.0, "PEN")];
    assert!(simplify_debts(&debts, &ids(&["A", "B"])).is_empty());
}

#[test]
fn test_chain_collapses_to_one_payment() {
    let debts = vec![debt("A", "B", 30.0, "PEN"), debt("B", "C", 30.0, "PEN")];
    let participants = ids(&["A", "B", "C"]);

    let balances = net_balances(&debts, &participants);
    assert_eq!(balances.len(), 1);
    assert_eq!(balances[0].balance_of("A"), Some(-30.0));
    assert_eq!(balances[0].balance_of("B"), Some(0.0));
    assert_eq!(balances[0].balance_of("C"), Some(30.0));

    let result = simplify_debts(&debts, &participants);
    assert_eq!(result, vec![tx("A", "C", 30.0, "PEN")]);
}

#[test]
fn test_currencies_follow_first_seen_order() {
    let debts = vec![debt("A", "B", 20.0, "PEN"), debt("A", "B", 10.0, "USD")];
    let result = simplify_debts(&debts, &ids(&["A", "B"]));
    assert_eq!(result, vec![tx("A", "B", 20.0, "PEN"), tx("A", "B", 10.0, "USD")]);

    let reversed = vec![debt("A", "B", 10.0, "USD"), debt("A", "B", 20.0, "PEN")];
    let result = simplify_debts(&reversed, &ids(&["A", "B"]));
    assert_eq!(result, vec![tx("A", "B", 10.0, "USD"), tx("A", "B", 20.0, "PEN")]);
}

#[test]
fn test_currencies_are_settled_independently() {
    // B owes 25 PEN but is owed 25 USD; the two never net out.
    let debts = vec![
        debt("B", "A", 25.0, "PEN"),
        debt("A", "B", 25.0, "USD"),
        debt("C", "A", 5.0, "PEN"),
        debt("A", "C", 5.0, "USD"),
    ];
    let result = simplify_debts(&debts, &ids(&["A", "B", "C"]));
    assert_eq!(
        result,
        vec![
            tx("B", "A", 25.0, "PEN"),
            tx("C", "A", 5.0, "PEN"),
            tx("A", "B", 25.0, "USD"),
            tx("A", "C", 5.0, "USD"),
        ]
    );
}

#[test]
fn test_identical_structure_in_two_currencies() {
    let structure = [("A", "B", 40.0), ("B", "C", 15.0), ("C", "A", 5.0)];
    let debts: Vec<DebtRecord> = ["PEN", "USD"]
        .iter()
        .flat_map(|cur| structure.iter().map(move |(d, c, a)| debt(d, c, *a, cur)))
        .collect();

    let result = simplify_debts(&debts, &ids(&["A", "B", "C"]));
    let pen: Vec<_> = result.iter().filter(|t| t.currency == "PEN").collect();
    let usd: Vec<_> = result.iter().filter(|t| t.currency == "USD").collect();

    assert_eq!(pen.len(), usd.len());
    for (p, u) in pen.iter().zip(usd.iter()) {
        assert_eq!((&p.from, &p.to, p.amount), (&u.from, &u.to, u.amount));
    }
}

#[test]
fn test_settled_records_are_ignored() {
    let open = vec![debt("A", "B", 40.0, "PEN"), debt("C", "B", 10.0, "PEN")];
    let mut with_paid = open.clone();
    with_paid.insert(1, debt("B", "A", 500.0, "PEN").settled());
    with_paid.push(debt("A", "C", 7.0, "EUR").settled());

    let participants = ids(&["A", "B", "C"]);
    assert_eq!(simplify_debts(&open, &participants), simplify_debts(&with_paid, &participants));
    // A currency seen only on settled records does not show up at all.
    assert!(net_balances(&with_paid, &participants).iter().all(|b| b.currency != "EUR"));
}

#[test]
fn test_missing_currency_defaults_to_pen() {
    let mut no_currency = debt("A", "B", 12.0, "PEN");
    no_currency.currency = None;
    let debts = vec![no_currency, debt("A", "B", 3.0, "PEN")];

    let result = simplify_debts(&debts, &ids(&["A", "B"]));
    assert_eq!(result, vec![tx("A", "B", 15.0, "PEN")]);
}

#[test]
fn test_incomplete_records_are_skipped() {
    let mut no_amount = debt("A", "B", 10.0, "PEN");
    no_amount.amount = None;
    let mut no_debtor = debt("A", "B", 10.0, "PEN");
    no_debtor.debtor_id = None;
    let mut no_creditor = debt("A", "B", 10.0, "PEN");
    no_creditor.creditor_id = None;
    let empty_id = debt("", "B", 10.0, "PEN");
    let zero = debt("A", "B", 0.0, "PEN");
    let nan = debt("B", "A", f64::NAN, "PEN");

    let debts = vec![no_amount, no_debtor, no_creditor, empty_id, zero, nan, debt("B", "A", 8.0, "PEN")];
    let result = simplify_debts(&debts, &ids(&["A", "B"]));
    assert_eq!(result, vec![tx("B", "A", 8.0, "PEN")]);
}

#[test]
fn test_self_debt_cancels_out() {
    let debts = vec![debt("A", "A", 70.0, "PEN")];
    assert!(simplify_debts(&debts, &ids(&["A"])).is_empty());
}

#[test]
fn test_debt_with_participant_outside_group() {
    // X is not declared but still gets a balance and a payment.
    let debts = vec![debt("X", "A", 40.0, "PEN")];
    let participants = ids(&["A", "B"]);

    let balances = net_balances(&debts, &participants);
    let order: Vec<_> = balances[0].balances.iter().map(|b| b.participant_id.as_str()).collect();
    assert_eq!(order, vec!["A", "B", "X"]);
    assert_eq!(balances[0].balance_of("X"), Some(-40.0));

    let result = simplify_debts(&debts, &participants);
    assert_eq!(result, vec![tx("X", "A", 40.0, "PEN")]);
}

#[test]
fn test_largest_debtor_pays_largest_creditor_first() {
    let debts = vec![
        debt("A", "C", 50.0, "PEN"),
        debt("B", "C", 10.0, "PEN"),
        debt("B", "D", 20.0, "PEN"),
    ];
    let result = simplify_debts(&debts, &ids(&["A", "B", "C", "D"]));
    assert_eq!(
        result,
        vec![
            tx("A", "C", 50.0, "PEN"),
            tx("B", "C", 10.0, "PEN"),
            tx("B", "D", 20.0, "PEN"),
        ]
    );
}

#[test]
fn test_equal_balances_keep_participant_order() {
    let debts = vec![debt("A", "C", 10.0, "PEN"), debt("B", "C", 10.0, "PEN")];

    let result = simplify_debts(&debts, &ids(&["A", "B", "C"]));
    assert_eq!(result, vec![tx("A", "C", 10.0, "PEN"), tx("B", "C", 10.0, "PEN")]);

    let result = simplify_debts(&debts, &ids(&["B", "A", "C"]));
    assert_eq!(result, vec![tx("B", "C", 10.0, "PEN"), tx("A", "C", 10.0, "PEN")]);
}

#[test]
fn test_floating_point_drift_is_rounded_away() {
    let debts = vec![debt("A", "B", 0.1, "PEN"), debt("A", "B", 0.2, "PEN")];
    let result = simplify_debts(&debts, &ids(&["A", "B"]));
    assert_eq!(result, vec![tx("A", "B", 0.3, "PEN")]);
}

#[test]
fn test_balances_under_tolerance_count_as_settled() {
    let debts = vec![debt("A", "B", 0.004, "PEN")];
    assert!(simplify_debts(&debts, &ids(&["A", "B"])).is_empty());
}

#[test]
fn test_round_to_cents() {
    assert_eq!(round_to_cents(12.344), 12.34);
    assert_eq!(round_to_cents(12.346), 12.35);
    assert_eq!(round_to_cents(-0.30000000000000004), -0.3);
    assert_eq!(round_to_cents(0.0), 0.0);
}

fn mixed_ledger() -> (Vec<DebtRecord>, Vec<String>) {
    let debts = vec![
        debt("a", "b", 12.5, "PEN"),
        debt("b", "c", 33.33, "PEN"),
        debt("c", "a", 7.1, "PEN"),
        debt("d", "e", 19.99, "PEN"),
        debt("e", "a", 45.0, "PEN"),
        debt("b", "d", 8.75, "USD"),
        debt("c", "e", 0.5, "USD"),
        debt("e", "b", 101.01, "USD"),
        debt("a", "d", 64.2, "PEN").settled(),
    ];
    (debts, ids(&["a", "b", "c", "d", "e"]))
}

#[test]
fn test_net_balances_sum_to_zero() {
    let (debts, participants) = mixed_ledger();
    let balances = net_balances(&debts, &participants);
    assert_eq!(balances.len(), 2);
    for currency in &balances {
        assert!(currency.total().abs() < 0.01, "{} sums to {}", currency.currency, currency.total());
    }
}

#[test]
fn test_applying_plan_settles_everyone() {
    let (debts, participants) = mixed_ledger();
    let plan = simplify_debts(&debts, &participants);
    assert!(!plan.is_empty());
    assert!(plan.iter().all(|t| t.from != t.to && t.amount > 0.0));

    for currency in net_balances(&debts, &participants) {
        let mut remaining: HashMap<String, f64> = currency
            .balances
            .iter()
            .map(|b| (b.participant_id.clone(), b.balance))
            .collect();
        for t in plan.iter().filter(|t| t.currency == currency.currency) {
            *remaining.entry(t.from.clone()).or_insert(0.0) += t.amount;
            *remaining.entry(t.to.clone()).or_insert(0.0) -= t.amount;
        }
        for (id, balance) in remaining {
            assert!(balance.abs() < 0.01 + 1e-9, "{} left with {} {}", id, balance, currency.currency);
        }
    }
}

#[test]
fn test_simplify_is_idempotent() {
    let (debts, participants) = mixed_ledger();
    assert_eq!(simplify_debts(&debts, &participants), simplify_debts(&debts, &participants));
}

#[test]
fn test_member_summary_per_currency() {
    let debts = vec![
        debt("A", "B", 10.0, "PEN"),
        debt("C", "A", 5.0, "PEN"),
        debt("A", "B", 3.0, "USD"),
        debt("A", "C", 100.0, "PEN").settled(),
    ];
    let summary = member_summary(&debts, "A");
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].currency, "PEN");
    assert_eq!(summary[0].owed_to_member, 5.0);
    assert_eq!(summary[0].member_owes, 10.0);
    assert_eq!(summary[1].currency, "USD");
    assert_eq!(summary[1].owed_to_member, 0.0);
    assert_eq!(summary[1].member_owes, 3.0);
}

#[test]
fn test_member_summary_nets_payments() {
    let mut payment = debt("B", "A", 40.0, "PEN");
    payment.is_payment = true;
    let debts = vec![debt("A", "B", 100.0, "PEN"), payment];

    let payer = member_summary(&debts, "A");
    assert_eq!(payer[0].owed_to_member, 0.0);
    assert_eq!(payer[0].member_owes, 60.0);

    let payee = member_summary(&debts, "B");
    assert_eq!(payee[0].owed_to_member, 60.0);
    assert_eq!(payee[0].member_owes, 0.0);
}
