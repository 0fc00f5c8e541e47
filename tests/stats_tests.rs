// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use casafin::models::{new_id, Goal, MonthConfig, PaymentMethod, Transaction, TxKind};
use casafin::stats::{
    allocation, annual_report, clamp_percent, goal_progress, monthly_stats, thermometer,
};

fn tx(month: &str, kind: TxKind, amount: &str) -> Transaction {
    Transaction {
        id: new_id(),
        month: month.to_string(),
        description: "test".to_string(),
        day: 10,
        kind,
        amount: amount.parse::<Decimal>().unwrap(),
        category_id: None,
        payment_method: PaymentMethod::Cash,
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
fn monthly_stats_are_restricted_to_the_month() {
    let txs = vec![
        tx("jan-26", TxKind::Income, "3000"),
        tx("jan-26", TxKind::Expense, "450.50"),
        tx("fev-26", TxKind::Expense, "999"),
    ];
    let s = monthly_stats(&txs, "jan-26");
    assert_eq!(s.income, Decimal::from(3000));
    assert_eq!(s.expense, "450.50".parse::<Decimal>().unwrap());
    assert_eq!(s.balance, "2549.50".parse::<Decimal>().unwrap());
}

#[test]
fn goal_progress_adds_income_and_subtracts_expense() {
    let goal = Goal {
        id: "g1".to_string(),
        name: "Viagem".to_string(),
        icon: "✈️".to_string(),
        target_value: Decimal::from(5000),
        saved_value: Decimal::from(9999), // must be ignored
    };
    let mut deposit = tx("jan-26", TxKind::Income, "500");
    deposit.goal_id = Some("g1".to_string());
    let mut withdrawal = tx("jan-26", TxKind::Expense, "120");
    withdrawal.goal_id = Some("g1".to_string());
    let mut unpaid = tx("jan-26", TxKind::Income, "1000");
    unpaid.goal_id = Some("g1".to_string());
    unpaid.paid = false;
    let unrelated = tx("jan-26", TxKind::Income, "700");

    let txs = vec![deposit, withdrawal, unpaid, unrelated];
    assert_eq!(goal_progress(&goal, &txs), Decimal::from(380));
}

#[test]
fn goal_progress_floors_at_zero() {
    let goal = Goal {
        id: "g1".to_string(),
        name: "Reserva".to_string(),
        icon: "🛟".to_string(),
        target_value: Decimal::from(1000),
        saved_value: Decimal::ZERO,
    };
    let mut withdrawal = tx("jan-26", TxKind::Expense, "300");
    withdrawal.goal_id = Some("g1".to_string());
    assert_eq!(goal_progress(&goal, &[withdrawal]), Decimal::ZERO);
}

#[test]
fn allocation_multiplies_income_by_percent() {
    let cfg = MonthConfig {
        id: None,
        month: "jan-26".to_string(),
        income: Decimal::from(3000),
        needs_percent: 60,
        wants_percent: 20,
        savings_percent: 20,
    };
    let a = allocation(&cfg);
    assert_eq!(a.needs, Decimal::from(1800));
    assert_eq!(a.wants, Decimal::from(600));
    assert_eq!(a.savings, Decimal::from(600));
}

#[test]
fn clamp_caps_at_the_remaining_room_and_floors_at_zero() {
    assert_eq!(clamp_percent(60, 30, 20), 50);
    assert_eq!(clamp_percent(40, 30, 20), 40);
    assert_eq!(clamp_percent(-5, 30, 20), 0);
    assert_eq!(clamp_percent(200, 0, 0), 100);
}

#[test]
fn annual_report_carries_a_running_cumulative() {
    let txs = vec![
        tx("jan-26", TxKind::Income, "1000"),
        tx("jan-26", TxKind::Expense, "400"),
        tx("fev-26", TxKind::Expense, "200"),
        tx("mar-26", TxKind::Income, "100"),
    ];
    let report = annual_report(&txs, 2026);
    assert_eq!(report.len(), 12);
    assert_eq!(report[0].month, "jan-26");
    assert_eq!(report[0].balance, Decimal::from(600));
    assert_eq!(report[0].cumulative, Decimal::from(600));
    assert_eq!(report[1].balance, Decimal::from(-200));
    assert_eq!(report[1].cumulative, Decimal::from(400));
    assert_eq!(report[2].cumulative, Decimal::from(500));
    // Empty months keep the cumulative flat.
    assert_eq!(report[11].cumulative, Decimal::from(500));
}

#[test]
fn thermometer_is_none_without_income() {
    let empty = monthly_stats(&[], "jan-26");
    assert!(thermometer(&empty).is_none());

    let txs = vec![
        tx("jan-26", TxKind::Income, "2000"),
        tx("jan-26", TxKind::Expense, "500"),
    ];
    let s = monthly_stats(&txs, "jan-26");
    assert_eq!(thermometer(&s), Some(Decimal::from(25)));
}
