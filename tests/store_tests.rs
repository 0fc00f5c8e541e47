// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;

use rust_decimal::Decimal;

use casafin::models::{new_id, PaymentMethod, Transaction, TxKind};
use casafin::remote::NullBackend;
use casafin::stats::{allocation, monthly_stats};
use casafin::store::{DataStore, PercentField};

fn setup() -> DataStore {
    let mut store = DataStore::new(Arc::new(NullBackend));
    store.attach("owner-1");
    store
}

fn income(month: &str, amount: &str) -> Transaction {
    Transaction {
        id: new_id(),
        month: month.to_string(),
        description: "Salário".to_string(),
        day: 5,
        kind: TxKind::Income,
        amount: amount.parse::<Decimal>().unwrap(),
        category_id: None,
        payment_method: PaymentMethod::Pix,
        card_id: None,
        goal_id: None,
        investment_id: None,
        paid: true,
        payment_date: None,
        notes: String::new(),
        from_fixed: None,
    }
}

#[test]
fn a_fresh_store_has_the_default_category_set() {
    let store = setup();
    assert_eq!(store.categories.len(), 23);
    let revenue = store
        .categories
        .iter()
        .find(|c| c.name == "Receitas")
        .expect("revenue category present");
    assert!(revenue.system);
}

#[test]
fn detach_resets_categories_to_defaults_not_empty() {
    let mut store = setup();
    store.save_transaction(income("jan-26", "100"));
    let custom_ids: Vec<String> = store.categories.iter().map(|c| c.id.clone()).collect();
    store.detach();
    assert!(!store.is_loaded());
    assert!(store.transactions.is_empty());
    assert_eq!(store.categories.len(), 23);
    // Fresh ids: the defaults are regenerated, not retained.
    assert!(store.categories.iter().all(|c| !custom_ids.contains(&c.id)));
}

#[test]
fn system_categories_are_exempt_from_deletion() {
    let mut store = setup();
    let revenue_id = store
        .categories
        .iter()
        .find(|c| c.system)
        .map(|c| c.id.clone())
        .unwrap();
    assert!(!store.delete_category(&revenue_id));
    assert!(store.category(&revenue_id).is_some());

    let plain_id = store
        .categories
        .iter()
        .find(|c| !c.system)
        .map(|c| c.id.clone())
        .unwrap();
    assert!(store.delete_category(&plain_id));
    assert!(store.category(&plain_id).is_none());
}

#[test]
fn deleting_a_referenced_category_leaves_the_transaction_dangling() {
    let mut store = setup();
    let cat_id = store
        .categories
        .iter()
        .find(|c| c.name == "Mercado")
        .map(|c| c.id.clone())
        .unwrap();
    let mut tx = income("jan-26", "50");
    tx.kind = TxKind::Expense;
    tx.category_id = Some(cat_id.clone());
    let tx_id = tx.id.clone();
    store.save_transaction(tx);

    assert!(store.delete_category(&cat_id));
    let survivor = store.transaction(&tx_id).expect("transaction survives");
    assert_eq!(survivor.category_id.as_deref(), Some(cat_id.as_str()));
    assert!(store.category(&cat_id).is_none());
}

#[test]
fn switching_payment_method_does_not_clear_a_stored_card_id() {
    let mut store = setup();
    let mut tx = income("jan-26", "80");
    tx.kind = TxKind::Expense;
    tx.payment_method = PaymentMethod::Credit;
    tx.card_id = Some("card-9".to_string());
    let id = tx.id.clone();
    store.save_transaction(tx);

    let mut edited = store.transaction(&id).cloned().unwrap();
    edited.payment_method = PaymentMethod::Debit;
    store.save_transaction(edited);

    let stored = store.transaction(&id).unwrap();
    assert_eq!(stored.payment_method, PaymentMethod::Debit);
    assert_eq!(stored.card_id.as_deref(), Some("card-9"));
}

#[test]
fn month_config_defaults_populate_income_from_live_transactions() {
    let mut store = setup();
    store.save_transaction(income("jan-26", "2500"));
    let cfg = store.month_config("jan-26");
    assert!(cfg.id.is_none());
    assert_eq!(cfg.income, Decimal::from(2500));
    assert_eq!(cfg.needs_percent, 50);
    assert_eq!(cfg.wants_percent, 30);
    assert_eq!(cfg.savings_percent, 20);
}

#[test]
fn percent_sum_never_exceeds_100_under_any_edit_sequence() {
    let mut store = setup();
    let edits = [
        (PercentField::Needs, 90),
        (PercentField::Wants, 40),
        (PercentField::Savings, 70),
        (PercentField::Needs, -10),
        (PercentField::Wants, 120),
        (PercentField::Savings, 0),
        (PercentField::Needs, 33),
    ];
    for (field, value) in edits {
        let cfg = store.set_month_percent("mar-26", field, value);
        let sum = u32::from(cfg.needs_percent)
            + u32::from(cfg.wants_percent)
            + u32::from(cfg.savings_percent);
        assert!(sum <= 100, "sum {} exceeded 100 after {:?}", sum, field);
    }
}

#[test]
fn new_household_flow_from_defaults_to_allocation() {
    let mut store = setup();
    assert_eq!(store.categories.len(), 23);

    store.save_transaction(income("jan-26", "3000"));
    let stats = monthly_stats(&store.transactions, "jan-26");
    assert_eq!(stats.income, Decimal::from(3000));
    assert_eq!(stats.expense, Decimal::ZERO);
    assert_eq!(stats.balance, Decimal::from(3000));

    let cfg = store.set_month_percent("jan-26", PercentField::Needs, 60);
    assert_eq!(cfg.needs_percent, 50, "clamped by default wants 30 + savings 20");

    // Free room first, then the requested 60 fits.
    store.set_month_percent("jan-26", PercentField::Wants, 20);
    let cfg = store.set_month_percent("jan-26", PercentField::Needs, 60);
    assert_eq!(cfg.needs_percent, 60);
    assert_eq!(allocation(&cfg).needs, Decimal::from(1800));
}

#[test]
fn apply_fixed_materializes_each_active_template_once() {
    let mut store = setup();
    store.save_fixed_entry(casafin::models::FixedEntry {
        id: "fix-1".to_string(),
        description: "Aluguel".to_string(),
        day: 5,
        kind: TxKind::Expense,
        amount: Decimal::from(1200),
        category_id: None,
        payment_method: PaymentMethod::Pix,
        notes: String::new(),
        active: true,
    });
    store.save_fixed_entry(casafin::models::FixedEntry {
        id: "fix-2".to_string(),
        description: "Academia".to_string(),
        day: 10,
        kind: TxKind::Expense,
        amount: Decimal::from(100),
        category_id: None,
        payment_method: PaymentMethod::Debit,
        notes: String::new(),
        active: false,
    });

    assert_eq!(store.apply_fixed("jan-26"), 1);
    assert_eq!(store.apply_fixed("jan-26"), 0, "already materialized");
    assert_eq!(store.apply_fixed("fev-26"), 1, "a new month applies again");

    let materialized = store
        .transactions
        .iter()
        .find(|t| t.month == "jan-26")
        .unwrap();
    assert_eq!(materialized.from_fixed.as_deref(), Some("fix-1"));
    assert!(!materialized.paid);
}
