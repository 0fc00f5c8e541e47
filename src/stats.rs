// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Asset, Goal, Investment, MonthConfig, Transaction, TxKind};
use crate::utils::month_codes_for_year;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthlyStats {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

/// Income, expense and balance restricted to transactions of one month code.
pub fn monthly_stats(txs: &[Transaction], month: &str) -> MonthlyStats {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in txs.iter().filter(|t| t.month == month) {
        match t.kind {
            TxKind::Income => income += t.amount,
            TxKind::Expense => expense += t.amount,
        }
    }
    MonthlyStats {
        income,
        expense,
        balance: income - expense,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Allocation {
    pub needs: Decimal,
    pub wants: Decimal,
    pub savings: Decimal,
}

/// Each bucket is the month's income times its configured percentage.
pub fn allocation(cfg: &MonthConfig) -> Allocation {
    let hundred = Decimal::from(100);
    Allocation {
        needs: cfg.income * Decimal::from(cfg.needs_percent) / hundred,
        wants: cfg.income * Decimal::from(cfg.wants_percent) / hundred,
        savings: cfg.income * Decimal::from(cfg.savings_percent) / hundred,
    }
}

/// Clamp an edited percentage so the three never sum past 100:
/// `min(requested, 100 - other_a - other_b)`, floored at 0.
pub fn clamp_percent(requested: i64, other_a: u8, other_b: u8) -> u8 {
    let room = 100 - i64::from(other_a) - i64::from(other_b);
    requested.min(room).max(0) as u8
}

/// Actual amount saved toward a goal: paid income-kind transactions add,
/// paid expense-kind ones subtract, floored at 0. The persisted
/// `saved_value` field is ignored as a display source.
pub fn goal_progress(goal: &Goal, txs: &[Transaction]) -> Decimal {
    let mut total = Decimal::ZERO;
    for t in txs
        .iter()
        .filter(|t| t.paid && t.goal_id.as_deref() == Some(goal.id.as_str()))
    {
        match t.kind {
            TxKind::Income => total += t.amount,
            TxKind::Expense => total -= t.amount,
        }
    }
    total.max(Decimal::ZERO)
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnualRow {
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    pub cumulative: Decimal,
}

/// One row per calendar month of the selected year, with a running
/// cumulative balance.
pub fn annual_report(txs: &[Transaction], year: i32) -> Vec<AnnualRow> {
    let mut cumulative = Decimal::ZERO;
    month_codes_for_year(year)
        .into_iter()
        .map(|code| {
            let s = monthly_stats(txs, &code);
            cumulative += s.balance;
            AnnualRow {
                month: code,
                income: s.income,
                expense: s.expense,
                balance: s.balance,
                cumulative,
            }
        })
        .collect()
}

/// Expense-to-income ratio in percent; None when the month has no income.
pub fn thermometer(stats: &MonthlyStats) -> Option<Decimal> {
    if stats.income.is_zero() {
        return None;
    }
    Some(stats.expense / stats.income * Decimal::from(100))
}

/// Aggregate net worth across liquid assets and investments.
pub fn patrimony(assets: &[Asset], investments: &[Investment]) -> Decimal {
    let a: Decimal = assets.iter().map(|a| a.value).sum();
    let i: Decimal = investments.iter().map(|i| i.value).sum();
    a + i
}
