// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::commands::{id_for_category, label_or_not_found, parse_kind, parse_method};
use crate::context::AppContext;
use crate::models::{new_id, FixedEntry, PaymentMethod, TxKind};
use crate::utils::{fmt_money, maybe_print_json, parse_day, parse_decimal, parse_month_code, pretty_table};

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("apply", sub)) => apply(ctx, sub)?,
        Some(("toggle", sub)) => toggle(ctx, sub)?,
        Some(("rm", sub)) => rm(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    ctx.require_permission("add transactions", |p| p.add_transactions)?;
    let entry = FixedEntry {
        id: new_id(),
        description: sub.get_one::<String>("desc").unwrap().clone(),
        day: parse_day(sub.get_one::<String>("day").unwrap())?,
        kind: parse_kind(sub.get_one::<String>("kind").unwrap())?,
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        category_id: sub
            .get_one::<String>("category")
            .map(|name| id_for_category(&ctx.store, name))
            .transpose()?,
        payment_method: sub
            .get_one::<String>("method")
            .map(|s| parse_method(s))
            .transpose()?
            .unwrap_or(PaymentMethod::Cash),
        notes: sub.get_one::<String>("notes").cloned().unwrap_or_default(),
        active: true,
    };
    let desc = entry.description.clone();
    ctx.store.save_fixed_entry(entry);
    println!("Added fixed entry '{}'", desc);
    Ok(())
}

fn list(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    ctx.require_user()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &ctx.store.fixed_entries)? {
        let rows = ctx
            .store
            .fixed_entries
            .iter()
            .map(|f| {
                let category = label_or_not_found(
                    f.category_id
                        .as_deref()
                        .and_then(|id| ctx.store.category(id).map(|c| c.name.as_str())),
                );
                vec![
                    f.id.clone(),
                    f.day.to_string(),
                    f.description.clone(),
                    match f.kind {
                        TxKind::Income => "Receita".to_string(),
                        TxKind::Expense => "Despesa".to_string(),
                    },
                    fmt_money(&f.amount),
                    category,
                    if f.active { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Day", "Description", "Kind", "Amount", "Category", "Active"],
                rows,
            )
        );
    }
    Ok(())
}

fn apply(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    ctx.require_permission("add transactions", |p| p.add_transactions)?;
    let month = sub.get_one::<String>("month").unwrap().to_lowercase();
    parse_month_code(&month)?;
    let created = ctx.store.apply_fixed(&month);
    println!("Materialized {} fixed entries into {}", created, month);
    Ok(())
}

fn toggle(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    ctx.require_permission("edit transactions", |p| p.edit_transactions)?;
    let id = sub.get_one::<String>("id").unwrap();
    let mut entry = ctx
        .store
        .fixed_entries
        .iter()
        .find(|f| f.id == *id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Fixed entry '{}' not found", id))?;
    entry.active = !entry.active;
    let active = entry.active;
    ctx.store.save_fixed_entry(entry);
    println!("Fixed entry {} is now {}", id, if active { "active" } else { "inactive" });
    Ok(())
}

fn rm(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    ctx.require_permission("edit transactions", |p| p.edit_transactions)?;
    let id = sub.get_one::<String>("id").unwrap();
    if ctx.store.delete_fixed_entry(id) {
        println!("Deleted fixed entry {}", id);
    } else {
        println!("No fixed entry with id {}", id);
    }
    Ok(())
}
