// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory collections for every household table, kept synchronized with
//! the hosted store: one bulk filtered fetch when an identity attaches, a
//! per-table push after every local mutation thereafter. Mutations always
//! land in memory first; remote failures are logged and never surfaced, so
//! local state stays the visible source of truth. There is no conflict
//! detection: a push overwrites the remote rows wholesale (one active client
//! per household is a hard constraint).

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::mapping;
use crate::models::{
    default_categories, new_id, Asset, Card, Category, FixedEntry, Goal, Investment, MonthConfig,
    Transaction,
};
use crate::remote::{Backend, RemoteError, Table, DATA_TABLES};
use crate::stats::{clamp_percent, monthly_stats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentField {
    Needs,
    Wants,
    Savings,
}

pub struct DataStore {
    backend: Arc<dyn Backend>,
    owner_id: Option<String>,
    loaded: bool,
    syncing: bool,
    pub categories: Vec<Category>,
    pub cards: Vec<Card>,
    pub goals: Vec<Goal>,
    pub fixed_entries: Vec<FixedEntry>,
    pub transactions: Vec<Transaction>,
    pub assets: Vec<Asset>,
    pub investments: Vec<Investment>,
    pub month_configs: Vec<MonthConfig>,
}

impl DataStore {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        DataStore {
            backend,
            owner_id: None,
            loaded: false,
            syncing: false,
            categories: default_categories(),
            cards: Vec::new(),
            goals: Vec::new(),
            fixed_entries: Vec::new(),
            transactions: Vec::new(),
            assets: Vec::new(),
            investments: Vec::new(),
            month_configs: Vec::new(),
        }
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_syncing(&self) -> bool {
        self.syncing
    }

    /// Identity became present: bulk-fetch every table in parallel and
    /// replace the in-memory collections. Tables that fail to fetch keep
    /// their defaults (the load is partial-failure tolerant, not atomic);
    /// the store is marked loaded either way, which also arms pushes.
    pub fn attach(&mut self, owner_id: &str) {
        self.owner_id = Some(owner_id.to_string());
        let backend = &*self.backend;
        let results: Vec<(Table, Result<Vec<Value>, RemoteError>)> = std::thread::scope(|s| {
            let handles: Vec<_> = DATA_TABLES
                .iter()
                .map(|&t| s.spawn(move || (t, backend.fetch_owned(t, owner_id))))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("fetch thread panicked"))
                .collect()
        });
        for (table, result) in results {
            match result {
                Ok(rows) => self.replace_from_rows(table, rows),
                Err(e) => log::warn!("initial fetch of {} failed: {}", table.as_str(), e),
            }
        }
        self.loaded = true;
    }

    /// Identity became absent: reset every collection to its default state.
    /// Categories go back to the built-in set, not to empty.
    pub fn detach(&mut self) {
        self.owner_id = None;
        self.loaded = false;
        self.categories = default_categories();
        self.cards.clear();
        self.goals.clear();
        self.fixed_entries.clear();
        self.transactions.clear();
        self.assets.clear();
        self.investments.clear();
        self.month_configs.clear();
    }

    fn replace_from_rows(&mut self, table: Table, rows: Vec<Value>) {
        fn decode<T>(
            table: Table,
            rows: Vec<Value>,
            f: impl Fn(Value) -> Result<T, RemoteError>,
        ) -> Vec<T> {
            rows.into_iter()
                .filter_map(|v| match f(v) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        log::warn!("skipping undecodable {} row: {}", table.as_str(), e);
                        None
                    }
                })
                .collect()
        }
        match table {
            Table::Categories => {
                let fetched = decode(table, rows, mapping::category_from_row);
                // A brand-new household has no remote categories yet; keep
                // the built-in defaults until the first push seeds them.
                if !fetched.is_empty() {
                    self.categories = fetched;
                }
            }
            Table::Cards => self.cards = decode(table, rows, mapping::card_from_row),
            Table::Goals => self.goals = decode(table, rows, mapping::goal_from_row),
            Table::FixedEntries => {
                self.fixed_entries = decode(table, rows, mapping::fixed_entry_from_row)
            }
            Table::Transactions => {
                self.transactions = decode(table, rows, mapping::transaction_from_row)
            }
            Table::Assets => self.assets = decode(table, rows, mapping::asset_from_row),
            Table::Investments => {
                self.investments = decode(table, rows, mapping::investment_from_row)
            }
            Table::MonthConfigs => {
                self.month_configs = decode(table, rows, mapping::month_config_from_row)
            }
            Table::Users => {}
        }
    }

    /// Push one table's full collection to the remote store, keyed by id.
    /// Suppressed until the initial load completes so startup defaults can
    /// never overwrite remote data. Failures are logged only.
    fn push(&mut self, table: Table) {
        if !self.loaded {
            return;
        }
        let Some(owner) = self.owner_id.clone() else {
            return;
        };
        if table == Table::MonthConfigs {
            // Restamp the income mirror from the live transaction sums
            // before the rows leave memory.
            let sums: Vec<Decimal> = self
                .month_configs
                .iter()
                .map(|m| monthly_stats(&self.transactions, &m.month).income)
                .collect();
            for (cfg, income) in self.month_configs.iter_mut().zip(sums) {
                cfg.income = income;
            }
        }
        let rows: Vec<Value> = match table {
            Table::Categories => self
                .categories
                .iter()
                .map(|c| mapping::category_to_row(c, &owner))
                .collect(),
            Table::Cards => self
                .cards
                .iter()
                .map(|c| mapping::card_to_row(c, &owner))
                .collect(),
            Table::Goals => self
                .goals
                .iter()
                .map(|g| mapping::goal_to_row(g, &owner))
                .collect(),
            Table::FixedEntries => self
                .fixed_entries
                .iter()
                .map(|f| mapping::fixed_entry_to_row(f, &owner))
                .collect(),
            Table::Transactions => self
                .transactions
                .iter()
                .map(|t| mapping::transaction_to_row(t, &owner))
                .collect(),
            Table::Assets => self
                .assets
                .iter()
                .map(|a| mapping::asset_to_row(a, &owner))
                .collect(),
            Table::Investments => self
                .investments
                .iter()
                .map(|i| mapping::investment_to_row(i, &owner))
                .collect(),
            Table::MonthConfigs => self
                .month_configs
                .iter()
                .map(|m| mapping::month_config_to_row(m, &owner))
                .collect(),
            Table::Users => return,
        };
        self.syncing = true;
        if let Err(e) = self.backend.upsert_rows(table, &rows) {
            log::warn!("push of {} failed, local state kept: {}", table.as_str(), e);
        }
        self.syncing = false;
    }

    fn remote_delete(&mut self, table: Table, id: &str) {
        if !self.loaded || self.owner_id.is_none() {
            return;
        }
        self.syncing = true;
        if let Err(e) = self.backend.delete_row(table, id) {
            log::warn!("remote delete from {} failed: {}", table.as_str(), e);
        }
        self.syncing = false;
    }

    // ---- categories ----

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn save_category(&mut self, cat: Category) {
        upsert_by_id(&mut self.categories, cat, |c| &c.id);
        self.push(Table::Categories);
    }

    /// System categories are exempt from deletion. Dangling references from
    /// transactions are tolerated, not cascaded.
    pub fn delete_category(&mut self, id: &str) -> bool {
        if self.category(id).map(|c| c.system).unwrap_or(false) {
            return false;
        }
        if !remove_by_id(&mut self.categories, id, |c| &c.id) {
            return false;
        }
        self.remote_delete(Table::Categories, id);
        true
    }

    // ---- cards ----

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn save_card(&mut self, card: Card) {
        upsert_by_id(&mut self.cards, card, |c| &c.id);
        self.push(Table::Cards);
    }

    pub fn delete_card(&mut self, id: &str) -> bool {
        if !remove_by_id(&mut self.cards, id, |c| &c.id) {
            return false;
        }
        self.remote_delete(Table::Cards, id);
        true
    }

    // ---- goals ----

    pub fn goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn save_goal(&mut self, goal: Goal) {
        upsert_by_id(&mut self.goals, goal, |g| &g.id);
        self.push(Table::Goals);
    }

    pub fn delete_goal(&mut self, id: &str) -> bool {
        if !remove_by_id(&mut self.goals, id, |g| &g.id) {
            return false;
        }
        self.remote_delete(Table::Goals, id);
        true
    }

    // ---- fixed entries ----

    pub fn save_fixed_entry(&mut self, entry: FixedEntry) {
        upsert_by_id(&mut self.fixed_entries, entry, |f| &f.id);
        self.push(Table::FixedEntries);
    }

    pub fn delete_fixed_entry(&mut self, id: &str) -> bool {
        if !remove_by_id(&mut self.fixed_entries, id, |f| &f.id) {
            return false;
        }
        self.remote_delete(Table::FixedEntries, id);
        true
    }

    /// Materialize every active fixed entry into a concrete transaction for
    /// the given month, skipping entries already materialized there.
    /// Returns how many transactions were created.
    pub fn apply_fixed(&mut self, month: &str) -> usize {
        let pending: Vec<FixedEntry> = self
            .fixed_entries
            .iter()
            .filter(|f| f.active)
            .filter(|f| {
                !self.transactions.iter().any(|t| {
                    t.month == month && t.from_fixed.as_deref() == Some(f.id.as_str())
                })
            })
            .cloned()
            .collect();
        let created = pending.len();
        for f in pending {
            self.transactions.push(Transaction {
                id: new_id(),
                month: month.to_string(),
                description: f.description.clone(),
                day: f.day,
                kind: f.kind,
                amount: f.amount,
                category_id: f.category_id.clone(),
                payment_method: f.payment_method,
                card_id: None,
                goal_id: None,
                investment_id: None,
                paid: false,
                payment_date: None,
                notes: f.notes.clone(),
                from_fixed: Some(f.id.clone()),
            });
        }
        if created > 0 {
            self.push(Table::Transactions);
        }
        created
    }

    // ---- transactions ----

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn save_transaction(&mut self, tx: Transaction) {
        upsert_by_id(&mut self.transactions, tx, |t| &t.id);
        self.push(Table::Transactions);
    }

    pub fn delete_transaction(&mut self, id: &str) -> bool {
        if !remove_by_id(&mut self.transactions, id, |t| &t.id) {
            return false;
        }
        self.remote_delete(Table::Transactions, id);
        true
    }

    // ---- assets & investments ----

    pub fn save_asset(&mut self, asset: Asset) {
        upsert_by_id(&mut self.assets, asset, |a| &a.id);
        self.push(Table::Assets);
    }

    pub fn delete_asset(&mut self, id: &str) -> bool {
        if !remove_by_id(&mut self.assets, id, |a| &a.id) {
            return false;
        }
        self.remote_delete(Table::Assets, id);
        true
    }

    pub fn save_investment(&mut self, inv: Investment) {
        upsert_by_id(&mut self.investments, inv, |i| &i.id);
        self.push(Table::Investments);
    }

    pub fn delete_investment(&mut self, id: &str) -> bool {
        if !remove_by_id(&mut self.investments, id, |i| &i.id) {
            return false;
        }
        self.remote_delete(Table::Investments, id);
        true
    }

    // ---- month configs ----

    /// The month's budget split. Months without an explicit config get the
    /// built-in default split; either way the income mirror is populated
    /// from the live income-transaction sum, never from a stored value.
    pub fn month_config(&self, month: &str) -> MonthConfig {
        let mut cfg = self
            .month_configs
            .iter()
            .find(|m| m.month == month)
            .cloned()
            .unwrap_or_else(|| MonthConfig::default_for(month));
        cfg.income = monthly_stats(&self.transactions, month).income;
        cfg
    }

    /// Edit one percentage, clamped so the three never sum past 100.
    /// Returns the updated config.
    pub fn set_month_percent(&mut self, month: &str, field: PercentField, value: i64) -> MonthConfig {
        let mut cfg = self.month_config(month);
        match field {
            PercentField::Needs => {
                cfg.needs_percent = clamp_percent(value, cfg.wants_percent, cfg.savings_percent)
            }
            PercentField::Wants => {
                cfg.wants_percent = clamp_percent(value, cfg.needs_percent, cfg.savings_percent)
            }
            PercentField::Savings => {
                cfg.savings_percent = clamp_percent(value, cfg.needs_percent, cfg.wants_percent)
            }
        }
        if let Some(slot) = self.month_configs.iter_mut().find(|m| m.month == month) {
            *slot = cfg.clone();
        } else {
            self.month_configs.push(cfg.clone());
        }
        self.push(Table::MonthConfigs);
        cfg
    }
}

fn upsert_by_id<T>(items: &mut Vec<T>, item: T, id_of: impl Fn(&T) -> &String) {
    let id = id_of(&item).clone();
    if let Some(slot) = items.iter_mut().find(|x| *id_of(x) == id) {
        *slot = item;
    } else {
        items.push(item);
    }
}

fn remove_by_id<T>(items: &mut Vec<T>, id: &str, id_of: impl Fn(&T) -> &String) -> bool {
    let before = items.len();
    items.retain(|x| id_of(x) != id);
    items.len() != before
}
