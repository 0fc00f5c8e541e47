// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::commands::{id_for_card, id_for_category, id_for_goal, label_or_not_found, parse_kind, parse_method};
use crate::context::AppContext;
use crate::models::{new_id, PaymentMethod, Transaction, TxKind};
use crate::utils::{fmt_money, maybe_print_json, parse_day, parse_decimal, parse_month_code, pretty_table};

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("pay", sub)) => pay(ctx, sub)?,
        Some(("rm", sub)) => rm(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    ctx.require_permission("add transactions", |p| p.add_transactions)?;
    let month = sub.get_one::<String>("month").unwrap().to_lowercase();
    parse_month_code(&month)?;
    let day = parse_day(sub.get_one::<String>("day").unwrap())?;
    let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let method = sub
        .get_one::<String>("method")
        .map(|s| parse_method(s))
        .transpose()?
        .unwrap_or(PaymentMethod::Cash);

    let category_id = sub
        .get_one::<String>("category")
        .map(|name| id_for_category(&ctx.store, name))
        .transpose()?;
    let card_id = sub
        .get_one::<String>("card")
        .map(|name| id_for_card(&ctx.store, name))
        .transpose()?;
    if method == PaymentMethod::Credit && card_id.is_none() {
        return Err(anyhow::anyhow!("--card is required with --method credito"));
    }
    let goal_id = sub
        .get_one::<String>("goal")
        .map(|name| id_for_goal(&ctx.store, name))
        .transpose()?;
    let payment_date = sub
        .get_one::<String>("paid-on")
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
        })
        .transpose()?;

    let tx = Transaction {
        id: new_id(),
        month: month.clone(),
        description: sub.get_one::<String>("desc").unwrap().clone(),
        day,
        kind,
        amount,
        category_id,
        payment_method: method,
        card_id,
        goal_id,
        investment_id: sub.get_one::<String>("investment").cloned(),
        paid: sub.get_flag("paid") || payment_date.is_some(),
        payment_date,
        notes: sub.get_one::<String>("notes").cloned().unwrap_or_default(),
        from_fixed: None,
    };
    let desc = tx.description.clone();
    let id = tx.id.clone();
    ctx.store.save_transaction(tx);
    println!("Recorded '{}' in {} (id {})", desc, month, id);
    Ok(())
}

fn list(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    ctx.require_user()?;
    let month = sub.get_one::<String>("month").unwrap().to_lowercase();
    let txs: Vec<&Transaction> = ctx
        .store
        .transactions
        .iter()
        .filter(|t| t.month == month)
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &txs)? {
        let rows = txs
            .iter()
            .map(|t| {
                let category =
                    label_or_not_found(t.category_id.as_deref().and_then(|id| {
                        ctx.store.category(id).map(|c| c.name.as_str())
                    }));
                let card = t
                    .card_id
                    .as_deref()
                    .map(|id| {
                        label_or_not_found(ctx.store.card(id).map(|c| c.name.as_str()))
                    })
                    .unwrap_or_default();
                vec![
                    t.id.clone(),
                    t.day.to_string(),
                    t.description.clone(),
                    match t.kind {
                        TxKind::Income => "Receita".to_string(),
                        TxKind::Expense => "Despesa".to_string(),
                    },
                    fmt_money(&t.amount),
                    category,
                    card,
                    if t.paid { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Day", "Description", "Kind", "Amount", "Category", "Card", "Paid"],
                rows,
            )
        );
    }
    Ok(())
}

fn pay(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    ctx.require_permission("edit transactions", |p| p.edit_transactions)?;
    let id = sub.get_one::<String>("id").unwrap();
    let date = match sub.get_one::<String>("date") {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))?,
        None => chrono::Utc::now().date_naive(),
    };
    let mut tx = ctx
        .store
        .transaction(id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Transaction '{}' not found", id))?;
    tx.paid = true;
    tx.payment_date = Some(date);
    ctx.store.save_transaction(tx);
    println!("Marked {} as paid on {}", id, date);
    Ok(())
}

fn rm(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    ctx.require_permission("edit transactions", |p| p.edit_transactions)?;
    let id = sub.get_one::<String>("id").unwrap();
    if ctx.store.delete_transaction(id) {
        println!("Deleted transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}
