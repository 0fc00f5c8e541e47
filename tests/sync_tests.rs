// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use serde_json::Value;

use casafin::mapping;
use casafin::models::{new_id, Category, PaymentMethod, Transaction, TxKind};
use casafin::remote::{Backend, RemoteError, Table};
use casafin::store::{DataStore, PercentField};

/// In-memory stand-in for the hosted store: rows keyed by id per table, with
/// optional per-table failure injection.
#[derive(Default)]
struct MemoryBackend {
    tables: Mutex<HashMap<Table, BTreeMap<String, Value>>>,
    failing: Vec<Table>,
}

impl MemoryBackend {
    fn seeded(table: Table, rows: Vec<Value>) -> Self {
        let backend = MemoryBackend::default();
        {
            let mut tables = backend.tables.lock().unwrap();
            let slot = tables.entry(table).or_default();
            for row in rows {
                let id = row["id"].as_str().unwrap().to_string();
                slot.insert(id, row);
            }
        }
        backend
    }

    fn snapshot(&self, table: Table) -> BTreeMap<String, Value> {
        self.tables
            .lock()
            .unwrap()
            .get(&table)
            .cloned()
            .unwrap_or_default()
    }
}

impl Backend for MemoryBackend {
    fn fetch_owned(&self, table: Table, owner_id: &str) -> Result<Vec<Value>, RemoteError> {
        if self.failing.contains(&table) {
            return Err(RemoteError::Auth("injected failure".to_string()));
        }
        Ok(self
            .tables
            .lock()
            .unwrap()
            .get(&table)
            .map(|rows| {
                rows.values()
                    .filter(|r| r["owner_id"].as_str() == Some(owner_id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn upsert_rows(&self, table: Table, rows: &[Value]) -> Result<(), RemoteError> {
        if self.failing.contains(&table) {
            return Err(RemoteError::Auth("injected failure".to_string()));
        }
        let mut tables = self.tables.lock().unwrap();
        let slot = tables.entry(table).or_default();
        for row in rows {
            let id = row["id"].as_str().unwrap().to_string();
            slot.insert(id, row.clone());
        }
        Ok(())
    }

    fn delete_row(&self, table: Table, id: &str) -> Result<(), RemoteError> {
        if self.failing.contains(&table) {
            return Err(RemoteError::Auth("injected failure".to_string()));
        }
        if let Some(slot) = self.tables.lock().unwrap().get_mut(&table) {
            slot.remove(id);
        }
        Ok(())
    }
}

fn category(name: &str) -> Category {
    Category {
        id: new_id(),
        name: name.to_string(),
        icon: "📦".to_string(),
        subcategories: String::new(),
        system: false,
    }
}

fn expense(month: &str, amount: &str) -> Transaction {
    Transaction {
        id: new_id(),
        month: month.to_string(),
        description: "Mercado".to_string(),
        day: 12,
        kind: TxKind::Expense,
        amount: amount.parse::<Decimal>().unwrap(),
        category_id: None,
        payment_method: PaymentMethod::Debit,
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
fn pushes_are_suppressed_until_the_initial_load_completes() {
    let remote_cat = mapping::category_to_row(&category("Remota"), "owner-1");
    let backend = Arc::new(MemoryBackend::seeded(Table::Categories, vec![remote_cat]));
    let mut store = DataStore::new(backend.clone());

    // Mutating before attach must not overwrite remote data with local
    // defaults.
    store.save_category(category("Local precoce"));
    assert_eq!(backend.snapshot(Table::Categories).len(), 1);

    store.attach("owner-1");
    assert!(store.is_loaded());
    // The fetched rows replaced the local collection wholesale.
    assert_eq!(store.categories.len(), 1);
    assert_eq!(store.categories[0].name, "Remota");
}

#[test]
fn a_mutation_after_load_pushes_the_whole_table_keyed_by_id() {
    let backend = Arc::new(MemoryBackend::default());
    let mut store = DataStore::new(backend.clone());
    store.attach("owner-1");

    store.save_transaction(expense("jan-26", "45.90"));
    store.save_transaction(expense("jan-26", "12.00"));

    let rows = backend.snapshot(Table::Transactions);
    assert_eq!(rows.len(), 2);
    for row in rows.values() {
        assert_eq!(row["owner_id"].as_str(), Some("owner-1"));
        assert_eq!(row["month_code"].as_str(), Some("jan-26"));
        assert_eq!(row["type"].as_str(), Some("Despesa"));
    }
}

#[test]
fn pushing_an_unchanged_collection_twice_is_idempotent() {
    let backend = Arc::new(MemoryBackend::default());
    let mut store = DataStore::new(backend.clone());
    store.attach("owner-1");

    let tx = expense("jan-26", "45.90");
    store.save_transaction(tx.clone());
    let first = backend.snapshot(Table::Transactions);

    // Saving the identical row again re-pushes the same collection.
    store.save_transaction(tx);
    let second = backend.snapshot(Table::Transactions);
    assert_eq!(first, second);
}

#[test]
fn deletes_propagate_and_do_not_resurrect_locally_on_failure() {
    let backend = Arc::new(MemoryBackend::default());
    let mut store = DataStore::new(backend.clone());
    store.attach("owner-1");

    let tx = expense("jan-26", "45.90");
    let id = tx.id.clone();
    store.save_transaction(tx);
    assert_eq!(backend.snapshot(Table::Transactions).len(), 1);

    assert!(store.delete_transaction(&id));
    assert!(store.transaction(&id).is_none());
    assert!(backend.snapshot(Table::Transactions).is_empty());
}

#[test]
fn delete_failure_is_swallowed_and_local_state_wins() {
    let backend = Arc::new(MemoryBackend {
        failing: vec![Table::Transactions],
        ..MemoryBackend::default()
    });
    let mut store = DataStore::new(backend.clone());
    store.attach("owner-1");

    let tx = expense("jan-26", "45.90");
    let id = tx.id.clone();
    store.save_transaction(tx);
    assert!(store.delete_transaction(&id));
    assert!(store.transaction(&id).is_none(), "no local rollback");
}

#[test]
fn a_failed_table_fetch_still_lets_the_store_finish_loading() {
    let remote_cat = mapping::category_to_row(&category("Remota"), "owner-1");
    let mut backend = MemoryBackend::seeded(Table::Categories, vec![remote_cat]);
    backend.failing = vec![Table::Transactions];
    let mut store = DataStore::new(Arc::new(backend));

    store.attach("owner-1");
    assert!(store.is_loaded());
    assert_eq!(store.categories.len(), 1);
    assert!(store.transactions.is_empty());
}

#[test]
fn month_config_rows_get_the_deterministic_composite_key() {
    let backend = Arc::new(MemoryBackend::default());
    let mut store = DataStore::new(backend.clone());
    store.attach("owner-1");

    store.save_transaction(expense("jan-26", "10"));
    store.set_month_percent("jan-26", PercentField::Needs, 40);

    let rows = backend.snapshot(Table::MonthConfigs);
    assert!(rows.contains_key("mconf_owner-1_jan-26"));
    let row = &rows["mconf_owner-1_jan-26"];
    assert_eq!(row["month_code"].as_str(), Some("jan-26"));
    assert_eq!(row["needs_percent"].as_u64(), Some(40));
}

#[test]
fn pushed_month_configs_mirror_the_live_income_sum() {
    let backend = Arc::new(MemoryBackend::default());
    let mut store = DataStore::new(backend.clone());
    store.attach("owner-1");

    let mut salary = expense("jan-26", "3000");
    salary.kind = TxKind::Income;
    store.save_transaction(salary);
    store.set_month_percent("jan-26", PercentField::Needs, 50);

    let rows = backend.snapshot(Table::MonthConfigs);
    let row = &rows["mconf_owner-1_jan-26"];
    assert_eq!(row["income"].as_str(), Some("3000"));
}
