// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "responsible")]
    Responsible,
    #[serde(rename = "dependent")]
    Dependent,
}

/// The six independent capabilities a responsible user can grant a dependent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub add_transactions: bool,
    pub edit_transactions: bool,
    pub view_reports: bool,
    pub manage_goals: bool,
    pub view_patrimony: bool,
    pub manage_categories: bool,
}

impl Permissions {
    pub fn all() -> Self {
        Permissions {
            add_transactions: true,
            edit_transactions: true,
            view_reports: true,
            manage_goals: true,
            view_patrimony: true,
            manage_categories: true,
        }
    }

    pub fn none() -> Self {
        Permissions {
            add_transactions: false,
            edit_transactions: false,
            view_reports: false,
            manage_goals: false,
            view_patrimony: false,
            manage_categories: false,
        }
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::none()
    }
}

/// A household member. `responsible_id` is present iff `role` is `Dependent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub handle: String,
    pub email: String,
    pub role: Role,
    pub permissions: Permissions,
    pub responsible_id: Option<String>,
}

impl User {
    /// The top-level identity all household rows are filed under.
    pub fn owner_id(&self) -> &str {
        self.responsible_id.as_deref().unwrap_or(&self.id)
    }

    pub fn is_responsible(&self) -> bool {
        self.role == Role::Responsible
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub subcategories: String,
    /// System categories (e.g. the synthetic revenue category) cannot be
    /// deleted and are skipped by type-switch reassignment.
    #[serde(default)]
    pub system: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub bank: String,
    pub limit: Decimal,
    pub closing_day: u8,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub target_value: Decimal,
    /// Redundant mirror; displayed progress is recomputed from paid
    /// transactions referencing the goal (see `stats::goal_progress`).
    pub saved_value: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxKind {
    #[serde(rename = "Receita")]
    Income,
    #[serde(rename = "Despesa")]
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Dinheiro")]
    Cash,
    #[serde(rename = "Débito")]
    Debit,
    #[serde(rename = "Crédito")]
    Credit,
    #[serde(rename = "Pix")]
    Pix,
}

/// A recurring template, materialized into one concrete transaction per
/// applicable month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedEntry {
    pub id: String,
    pub description: String,
    pub day: u8,
    pub kind: TxKind,
    pub amount: Decimal,
    pub category_id: Option<String>,
    pub payment_method: PaymentMethod,
    pub notes: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Month code, e.g. `jan-26`.
    pub month: String,
    pub description: String,
    pub day: u8,
    pub kind: TxKind,
    pub amount: Decimal,
    pub category_id: Option<String>,
    pub payment_method: PaymentMethod,
    /// Meaningful only when `payment_method` is `Credit`; a stale value left
    /// behind after switching methods is tolerated, not cleared.
    pub card_id: Option<String>,
    pub goal_id: Option<String>,
    pub investment_id: Option<String>,
    pub paid: bool,
    pub payment_date: Option<NaiveDate>,
    pub notes: String,
    /// Id of the fixed entry this transaction was materialized from.
    pub from_fixed: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LiquidityTier {
    #[serde(rename = "Imediata")]
    Immediate,
    #[serde(rename = "Curto prazo")]
    ShortTerm,
    #[serde(rename = "Médio prazo")]
    MediumTerm,
    #[serde(rename = "Longo prazo")]
    LongTerm,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub description: String,
    pub objective: String,
    pub bank: String,
    pub value: Decimal,
    pub updated_at: chrono::DateTime<Utc>,
    pub liquidity: LiquidityTier,
    pub touchable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestmentKind {
    #[serde(rename = "Ações")]
    Stocks,
    #[serde(rename = "FIIs")]
    RealEstateFunds,
    #[serde(rename = "Tesouro Direto")]
    TreasuryBonds,
    #[serde(rename = "CDB")]
    BankDeposit,
    #[serde(rename = "LCI/LCA")]
    CreditNotes,
    #[serde(rename = "Fundos")]
    Funds,
    #[serde(rename = "Previdência")]
    Pension,
    #[serde(rename = "Poupança")]
    Savings,
    #[serde(rename = "Cripto")]
    Crypto,
    #[serde(rename = "Outros")]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: String,
    pub kind: InvestmentKind,
    pub value: Decimal,
    pub broker: String,
    pub updated_at: chrono::DateTime<Utc>,
    pub category: String,
}

/// Per-month budget split. `income` mirrors the month's live income sum and
/// is restamped on every push; the three percentages each stay >= 0 and sum
/// to at most 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthConfig {
    /// Deterministic composite key `mconf_<ownerId>_<monthCode>`, synthesized
    /// at push time when absent.
    pub id: Option<String>,
    pub month: String,
    pub income: Decimal,
    pub needs_percent: u8,
    pub wants_percent: u8,
    pub savings_percent: u8,
}

pub const DEFAULT_NEEDS_PERCENT: u8 = 50;
pub const DEFAULT_WANTS_PERCENT: u8 = 30;
pub const DEFAULT_SAVINGS_PERCENT: u8 = 20;

impl MonthConfig {
    pub fn default_for(month: &str) -> Self {
        MonthConfig {
            id: None,
            month: month.to_string(),
            income: Decimal::ZERO,
            needs_percent: DEFAULT_NEEDS_PERCENT,
            wants_percent: DEFAULT_WANTS_PERCENT,
            savings_percent: DEFAULT_SAVINGS_PERCENT,
        }
    }
}

/// The built-in category set a fresh household starts from. The synthetic
/// revenue category is the only system one.
pub fn default_categories() -> Vec<Category> {
    const DEFAULTS: &[(&str, &str, bool)] = &[
        ("Receitas", "💰", true),
        ("Moradia", "🏠", false),
        ("Mercado", "🛒", false),
        ("Alimentação", "🍽️", false),
        ("Transporte", "🚗", false),
        ("Combustível", "⛽", false),
        ("Saúde", "💊", false),
        ("Educação", "📚", false),
        ("Lazer", "🎮", false),
        ("Viagem", "✈️", false),
        ("Vestuário", "👕", false),
        ("Assinaturas", "📺", false),
        ("Internet", "🌐", false),
        ("Telefone", "📱", false),
        ("Energia", "💡", false),
        ("Água", "💧", false),
        ("Pets", "🐶", false),
        ("Presentes", "🎁", false),
        ("Beleza", "💅", false),
        ("Impostos", "🧾", false),
        ("Seguros", "🛡️", false),
        ("Investimentos", "📈", false),
        ("Outros", "📦", false),
    ];
    DEFAULTS
        .iter()
        .map(|(name, icon, system)| Category {
            id: new_id(),
            name: (*name).to_string(),
            icon: (*icon).to_string(),
            subcategories: String::new(),
            system: *system,
        })
        .collect()
}
