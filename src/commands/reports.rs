// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::json;

use crate::context::AppContext;
use crate::stats::{annual_report, monthly_stats, patrimony, thermometer};
use crate::utils::{fmt_money, maybe_print_json, parse_month_code, pretty_table};

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("monthly", sub)) => monthly(ctx, sub)?,
        Some(("annual", sub)) => annual(ctx, sub)?,
        Some(("thermometer", sub)) => thermo(ctx, sub)?,
        Some(("patrimony", sub)) => patrimony_report(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn monthly(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    ctx.require_permission("view reports", |p| p.view_reports)?;
    let month = sub.get_one::<String>("month").unwrap().to_lowercase();
    parse_month_code(&month)?;
    let stats = monthly_stats(&ctx.store.transactions, &month);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &stats)? {
        let rows = vec![vec![
            month.clone(),
            fmt_money(&stats.income),
            fmt_money(&stats.expense),
            fmt_money(&stats.balance),
        ]];
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Balance"], rows)
        );
    }
    Ok(())
}

fn annual(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    ctx.require_permission("view reports", |p| p.view_reports)?;
    let year = *sub.get_one::<i32>("year").unwrap();
    let report = annual_report(&ctx.store.transactions, year);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        let rows = report
            .iter()
            .map(|r| {
                vec![
                    r.month.clone(),
                    fmt_money(&r.income),
                    fmt_money(&r.expense),
                    fmt_money(&r.balance),
                    fmt_money(&r.cumulative),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Month", "Income", "Expense", "Balance", "Cumulative"],
                rows,
            )
        );
    }
    Ok(())
}

fn thermo(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    ctx.require_permission("view reports", |p| p.view_reports)?;
    let month = sub.get_one::<String>("month").unwrap().to_lowercase();
    parse_month_code(&month)?;
    let stats = monthly_stats(&ctx.store.transactions, &month);
    match thermometer(&stats) {
        Some(ratio) => println!(
            "Thermometer for {}: {:.1}% of income spent",
            month,
            ratio.round_dp(1)
        ),
        None => println!("Thermometer for {}: no income recorded", month),
    }
    Ok(())
}

fn patrimony_report(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    ctx.require_permission("view patrimony", |p| p.view_patrimony)?;
    let assets_total: rust_decimal::Decimal = ctx.store.assets.iter().map(|a| a.value).sum();
    let investments_total: rust_decimal::Decimal =
        ctx.store.investments.iter().map(|i| i.value).sum();
    let total = patrimony(&ctx.store.assets, &ctx.store.investments);
    let payload = json!({
        "assets": assets_total,
        "investments": investments_total,
        "total": total,
    });
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &payload)? {
        let rows = vec![
            vec!["Assets".to_string(), fmt_money(&assets_total)],
            vec!["Investments".to_string(), fmt_money(&investments_total)],
            vec!["Total".to_string(), fmt_money(&total)],
        ];
        println!("{}", pretty_table(&["Patrimony", "Value"], rows));
    }
    Ok(())
}
