// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Explicit, per-entity translation between in-memory entities and the rows
//! the hosted store holds. Each entity gets its own row struct with the
//! remote column names spelled out; no generic key-casing transform is
//! applied anywhere, so columns that do not follow the convention
//! (`month` -> `month_code`, `limit` -> `credit_limit`, `kind` -> `type`)
//! cannot be silently corrupted. Conversions to the wire also stamp the
//! owning household id onto every row.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{
    Asset, Card, Category, FixedEntry, Goal, Investment, InvestmentKind, LiquidityTier,
    MonthConfig, PaymentMethod, Permissions, Role, Transaction, TxKind, User,
};
use crate::remote::RemoteError;

/// Deterministic composite key for month-config rows, so repeated pushes of
/// the same month land on the same remote row.
pub fn month_config_key(owner_id: &str, month: &str) -> String {
    format!("mconf_{}_{}", owner_id, month)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserRow {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub login: String,
    pub email: String,
    pub role: Role,
    pub permissions: Permissions,
    pub responsible_id: Option<String>,
}

pub fn user_to_row(u: &User, owner_id: &str) -> Value {
    serde_json::to_value(UserRow {
        id: u.id.clone(),
        owner_id: owner_id.to_string(),
        name: u.name.clone(),
        login: u.handle.clone(),
        email: u.email.clone(),
        role: u.role,
        permissions: u.permissions,
        responsible_id: u.responsible_id.clone(),
    })
    .expect("user row serializes")
}

pub fn user_from_row(v: Value) -> Result<User, RemoteError> {
    let r: UserRow = serde_json::from_value(v)?;
    Ok(User {
        id: r.id,
        name: r.name,
        handle: r.login,
        email: r.email,
        role: r.role,
        permissions: r.permissions,
        responsible_id: r.responsible_id,
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryRow {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub icon: String,
    pub subcategories: String,
    #[serde(default)]
    pub is_system: bool,
}

pub fn category_to_row(c: &Category, owner_id: &str) -> Value {
    serde_json::to_value(CategoryRow {
        id: c.id.clone(),
        owner_id: owner_id.to_string(),
        name: c.name.clone(),
        icon: c.icon.clone(),
        subcategories: c.subcategories.clone(),
        is_system: c.system,
    })
    .expect("category row serializes")
}

pub fn category_from_row(v: Value) -> Result<Category, RemoteError> {
    let r: CategoryRow = serde_json::from_value(v)?;
    Ok(Category {
        id: r.id,
        name: r.name,
        icon: r.icon,
        subcategories: r.subcategories,
        system: r.is_system,
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardRow {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub bank: String,
    pub credit_limit: Decimal,
    pub closing_day: u8,
    pub color: String,
}

pub fn card_to_row(c: &Card, owner_id: &str) -> Value {
    serde_json::to_value(CardRow {
        id: c.id.clone(),
        owner_id: owner_id.to_string(),
        name: c.name.clone(),
        bank: c.bank.clone(),
        credit_limit: c.limit,
        closing_day: c.closing_day,
        color: c.color.clone(),
    })
    .expect("card row serializes")
}

pub fn card_from_row(v: Value) -> Result<Card, RemoteError> {
    let r: CardRow = serde_json::from_value(v)?;
    Ok(Card {
        id: r.id,
        name: r.name,
        bank: r.bank,
        limit: r.credit_limit,
        closing_day: r.closing_day,
        color: r.color,
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GoalRow {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub icon: String,
    pub target_value: Decimal,
    pub saved_value: Decimal,
}

pub fn goal_to_row(g: &Goal, owner_id: &str) -> Value {
    serde_json::to_value(GoalRow {
        id: g.id.clone(),
        owner_id: owner_id.to_string(),
        name: g.name.clone(),
        icon: g.icon.clone(),
        target_value: g.target_value,
        saved_value: g.saved_value,
    })
    .expect("goal row serializes")
}

pub fn goal_from_row(v: Value) -> Result<Goal, RemoteError> {
    let r: GoalRow = serde_json::from_value(v)?;
    Ok(Goal {
        id: r.id,
        name: r.name,
        icon: r.icon,
        target_value: r.target_value,
        saved_value: r.saved_value,
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FixedEntryRow {
    pub id: String,
    pub owner_id: String,
    pub description: String,
    pub day: u8,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub amount: Decimal,
    pub category_id: Option<String>,
    pub payment_method: PaymentMethod,
    pub notes: String,
    pub active: bool,
}

pub fn fixed_entry_to_row(f: &FixedEntry, owner_id: &str) -> Value {
    serde_json::to_value(FixedEntryRow {
        id: f.id.clone(),
        owner_id: owner_id.to_string(),
        description: f.description.clone(),
        day: f.day,
        kind: f.kind,
        amount: f.amount,
        category_id: f.category_id.clone(),
        payment_method: f.payment_method,
        notes: f.notes.clone(),
        active: f.active,
    })
    .expect("fixed entry row serializes")
}

pub fn fixed_entry_from_row(v: Value) -> Result<FixedEntry, RemoteError> {
    let r: FixedEntryRow = serde_json::from_value(v)?;
    Ok(FixedEntry {
        id: r.id,
        description: r.description,
        day: r.day,
        kind: r.kind,
        amount: r.amount,
        category_id: r.category_id,
        payment_method: r.payment_method,
        notes: r.notes,
        active: r.active,
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: String,
    pub owner_id: String,
    pub month_code: String,
    pub description: String,
    pub day: u8,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub amount: Decimal,
    pub category_id: Option<String>,
    pub payment_method: PaymentMethod,
    pub card_id: Option<String>,
    pub goal_id: Option<String>,
    pub investment_id: Option<String>,
    pub paid: bool,
    pub payment_date: Option<NaiveDate>,
    pub notes: String,
    pub from_fixed: Option<String>,
}

pub fn transaction_to_row(t: &Transaction, owner_id: &str) -> Value {
    serde_json::to_value(TransactionRow {
        id: t.id.clone(),
        owner_id: owner_id.to_string(),
        month_code: t.month.clone(),
        description: t.description.clone(),
        day: t.day,
        kind: t.kind,
        amount: t.amount,
        category_id: t.category_id.clone(),
        payment_method: t.payment_method,
        card_id: t.card_id.clone(),
        goal_id: t.goal_id.clone(),
        investment_id: t.investment_id.clone(),
        paid: t.paid,
        payment_date: t.payment_date,
        notes: t.notes.clone(),
        from_fixed: t.from_fixed.clone(),
    })
    .expect("transaction row serializes")
}

pub fn transaction_from_row(v: Value) -> Result<Transaction, RemoteError> {
    let r: TransactionRow = serde_json::from_value(v)?;
    Ok(Transaction {
        id: r.id,
        month: r.month_code,
        description: r.description,
        day: r.day,
        kind: r.kind,
        amount: r.amount,
        category_id: r.category_id,
        payment_method: r.payment_method,
        card_id: r.card_id,
        goal_id: r.goal_id,
        investment_id: r.investment_id,
        paid: r.paid,
        payment_date: r.payment_date,
        notes: r.notes,
        from_fixed: r.from_fixed,
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssetRow {
    pub id: String,
    pub owner_id: String,
    pub description: String,
    pub objective: String,
    pub bank: String,
    pub value: Decimal,
    pub updated_at: chrono::DateTime<Utc>,
    pub liquidity: LiquidityTier,
    pub touchable: bool,
}

pub fn asset_to_row(a: &Asset, owner_id: &str) -> Value {
    serde_json::to_value(AssetRow {
        id: a.id.clone(),
        owner_id: owner_id.to_string(),
        description: a.description.clone(),
        objective: a.objective.clone(),
        bank: a.bank.clone(),
        value: a.value,
        updated_at: a.updated_at,
        liquidity: a.liquidity,
        touchable: a.touchable,
    })
    .expect("asset row serializes")
}

pub fn asset_from_row(v: Value) -> Result<Asset, RemoteError> {
    let r: AssetRow = serde_json::from_value(v)?;
    Ok(Asset {
        id: r.id,
        description: r.description,
        objective: r.objective,
        bank: r.bank,
        value: r.value,
        updated_at: r.updated_at,
        liquidity: r.liquidity,
        touchable: r.touchable,
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InvestmentRow {
    pub id: String,
    pub owner_id: String,
    #[serde(rename = "type")]
    pub kind: InvestmentKind,
    pub value: Decimal,
    pub broker: String,
    pub updated_at: chrono::DateTime<Utc>,
    pub category: String,
}

pub fn investment_to_row(i: &Investment, owner_id: &str) -> Value {
    serde_json::to_value(InvestmentRow {
        id: i.id.clone(),
        owner_id: owner_id.to_string(),
        kind: i.kind,
        value: i.value,
        broker: i.broker.clone(),
        updated_at: i.updated_at,
        category: i.category.clone(),
    })
    .expect("investment row serializes")
}

pub fn investment_from_row(v: Value) -> Result<Investment, RemoteError> {
    let r: InvestmentRow = serde_json::from_value(v)?;
    Ok(Investment {
        id: r.id,
        kind: r.kind,
        value: r.value,
        broker: r.broker,
        updated_at: r.updated_at,
        category: r.category,
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthConfigRow {
    pub id: String,
    pub owner_id: String,
    pub month_code: String,
    pub income: Decimal,
    pub needs_percent: u8,
    pub wants_percent: u8,
    pub savings_percent: u8,
}

pub fn month_config_to_row(m: &MonthConfig, owner_id: &str) -> Value {
    serde_json::to_value(MonthConfigRow {
        id: m
            .id
            .clone()
            .unwrap_or_else(|| month_config_key(owner_id, &m.month)),
        owner_id: owner_id.to_string(),
        month_code: m.month.clone(),
        income: m.income,
        needs_percent: m.needs_percent,
        wants_percent: m.wants_percent,
        savings_percent: m.savings_percent,
    })
    .expect("month config row serializes")
}

pub fn month_config_from_row(v: Value) -> Result<MonthConfig, RemoteError> {
    let r: MonthConfigRow = serde_json::from_value(v)?;
    Ok(MonthConfig {
        id: Some(r.id),
        month: r.month_code,
        income: r.income,
        needs_percent: r.needs_percent,
        wants_percent: r.wants_percent,
        savings_percent: r.savings_percent,
    })
}
