// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use casafin::mapping;
use casafin::models::{
    Card, MonthConfig, PaymentMethod, Permissions, Role, Transaction, TxKind, User,
};

#[test]
fn transaction_rows_use_the_remote_column_names_and_wire_values() {
    let tx = Transaction {
        id: "t1".to_string(),
        month: "jan-26".to_string(),
        description: "Salário".to_string(),
        day: 5,
        kind: TxKind::Income,
        amount: "3000.00".parse::<Decimal>().unwrap(),
        category_id: None,
        payment_method: PaymentMethod::Pix,
        card_id: None,
        goal_id: None,
        investment_id: None,
        paid: true,
        payment_date: None,
        notes: String::new(),
        from_fixed: None,
    };
    let row = mapping::transaction_to_row(&tx, "owner-1");

    assert_eq!(row["owner_id"].as_str(), Some("owner-1"));
    assert_eq!(row["month_code"].as_str(), Some("jan-26"));
    assert_eq!(row["type"].as_str(), Some("Receita"));
    assert_eq!(row["payment_method"].as_str(), Some("Pix"));
    // The in-memory field names never leak onto the wire.
    assert!(row.get("month").is_none());
    assert!(row.get("kind").is_none());

    let back = mapping::transaction_from_row(row).unwrap();
    assert_eq!(back.month, "jan-26");
    assert_eq!(back.kind, TxKind::Income);
    assert_eq!(back.amount, tx.amount);
}

#[test]
fn card_limit_maps_to_the_credit_limit_column() {
    let card = Card {
        id: "c1".to_string(),
        name: "Roxinho".to_string(),
        bank: "Nubank".to_string(),
        limit: Decimal::from(4500),
        closing_day: 8,
        color: "#820ad1".to_string(),
    };
    let row = mapping::card_to_row(&card, "owner-1");
    assert_eq!(row["credit_limit"].as_str(), Some("4500"));
    assert!(row.get("limit").is_none());

    let back = mapping::card_from_row(row).unwrap();
    assert_eq!(back.limit, Decimal::from(4500));
    assert_eq!(back.closing_day, 8);
}

#[test]
fn user_handle_maps_to_the_login_column() {
    let user = User {
        id: "u1".to_string(),
        name: "Ana".to_string(),
        handle: "ana".to_string(),
        email: "ana@example.com".to_string(),
        role: Role::Dependent,
        permissions: Permissions::none(),
        responsible_id: Some("u0".to_string()),
    };
    let row = mapping::user_to_row(&user, user.owner_id());
    assert_eq!(row["login"].as_str(), Some("ana"));
    assert_eq!(row["owner_id"].as_str(), Some("u0"));
    assert_eq!(row["role"].as_str(), Some("dependent"));
    assert!(row.get("handle").is_none());

    let back = mapping::user_from_row(row).unwrap();
    assert_eq!(back.handle, "ana");
    assert_eq!(back.owner_id(), "u0");
}

#[test]
fn month_config_id_is_synthesized_when_absent_and_kept_when_present() {
    let fresh = MonthConfig {
        id: None,
        month: "jan-26".to_string(),
        income: Decimal::from(3000),
        needs_percent: 50,
        wants_percent: 30,
        savings_percent: 20,
    };
    let row = mapping::month_config_to_row(&fresh, "owner-1");
    assert_eq!(row["id"].as_str(), Some("mconf_owner-1_jan-26"));
    assert_eq!(row["month_code"].as_str(), Some("jan-26"));

    let stored = MonthConfig {
        id: Some("mconf_owner-1_jan-26".to_string()),
        ..fresh
    };
    let row = mapping::month_config_to_row(&stored, "owner-1");
    assert_eq!(row["id"].as_str(), Some("mconf_owner-1_jan-26"));

    let back = mapping::month_config_from_row(row).unwrap();
    assert_eq!(back.id.as_deref(), Some("mconf_owner-1_jan-26"));
    assert_eq!(back.month, "jan-26");
    assert_eq!(back.needs_percent, 50);
}

#[test]
fn undecodable_rows_surface_as_decode_errors() {
    let garbage = serde_json::json!({ "id": "t1", "type": "Empréstimo" });
    assert!(mapping::transaction_from_row(garbage).is_err());
}
