// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod assets;
pub mod auth;
pub mod cards;
pub mod categories;
pub mod doctor;
pub mod exporter;
pub mod fixed;
pub mod goals;
pub mod investments;
pub mod month;
pub mod reports;
pub mod tx;
pub mod users;

use anyhow::Result;

use crate::models::{InvestmentKind, LiquidityTier, PaymentMethod, TxKind};
use crate::store::DataStore;

pub fn parse_kind(s: &str) -> Result<TxKind> {
    match s.to_lowercase().as_str() {
        "receita" | "income" => Ok(TxKind::Income),
        "despesa" | "expense" => Ok(TxKind::Expense),
        other => Err(anyhow::anyhow!(
            "Unknown kind '{}' (use receita|despesa)",
            other
        )),
    }
}

pub fn parse_method(s: &str) -> Result<PaymentMethod> {
    match s.to_lowercase().as_str() {
        "dinheiro" | "cash" => Ok(PaymentMethod::Cash),
        "debito" | "débito" | "debit" => Ok(PaymentMethod::Debit),
        "credito" | "crédito" | "credit" => Ok(PaymentMethod::Credit),
        "pix" => Ok(PaymentMethod::Pix),
        other => Err(anyhow::anyhow!(
            "Unknown payment method '{}' (use dinheiro|debito|credito|pix)",
            other
        )),
    }
}

pub fn parse_liquidity(s: &str) -> Result<LiquidityTier> {
    match s.to_lowercase().as_str() {
        "imediata" => Ok(LiquidityTier::Immediate),
        "curto" => Ok(LiquidityTier::ShortTerm),
        "medio" | "médio" => Ok(LiquidityTier::MediumTerm),
        "longo" => Ok(LiquidityTier::LongTerm),
        other => Err(anyhow::anyhow!(
            "Unknown liquidity tier '{}' (use imediata|curto|medio|longo)",
            other
        )),
    }
}

pub fn parse_investment_kind(s: &str) -> Result<InvestmentKind> {
    match s.to_lowercase().as_str() {
        "acoes" | "ações" => Ok(InvestmentKind::Stocks),
        "fiis" => Ok(InvestmentKind::RealEstateFunds),
        "tesouro" => Ok(InvestmentKind::TreasuryBonds),
        "cdb" => Ok(InvestmentKind::BankDeposit),
        "lci-lca" | "lci/lca" => Ok(InvestmentKind::CreditNotes),
        "fundos" => Ok(InvestmentKind::Funds),
        "previdencia" | "previdência" => Ok(InvestmentKind::Pension),
        "poupanca" | "poupança" => Ok(InvestmentKind::Savings),
        "cripto" => Ok(InvestmentKind::Crypto),
        "outros" => Ok(InvestmentKind::Other),
        other => Err(anyhow::anyhow!("Unknown investment kind '{}'", other)),
    }
}

pub fn id_for_category(store: &DataStore, name: &str) -> Result<String> {
    store
        .categories
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .map(|c| c.id.clone())
        .ok_or_else(|| anyhow::anyhow!("Category '{}' not found", name))
}

pub fn id_for_card(store: &DataStore, name: &str) -> Result<String> {
    store
        .cards
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .map(|c| c.id.clone())
        .ok_or_else(|| anyhow::anyhow!("Card '{}' not found", name))
}

pub fn id_for_goal(store: &DataStore, name: &str) -> Result<String> {
    store
        .goals
        .iter()
        .find(|g| g.name.eq_ignore_ascii_case(name))
        .map(|g| g.id.clone())
        .ok_or_else(|| anyhow::anyhow!("Goal '{}' not found", name))
}

/// How a dangling reference renders: the row stays, the lookup shows absent.
pub fn label_or_not_found(found: Option<&str>) -> String {
    found.map(String::from).unwrap_or_else(|| "(not found)".to_string())
}
