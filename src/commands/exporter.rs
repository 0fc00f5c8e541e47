// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::json;

use crate::context::AppContext;
use crate::stats::annual_report;

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("annual", sub)) => export_annual(ctx, sub),
        _ => Ok(()),
    }
}

/// One row per month, four columns: month, income, expense, balance.
fn export_annual(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    ctx.require_permission("view reports", |p| p.view_reports)?;
    let year = *sub.get_one::<i32>("year").unwrap();
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let report = annual_report(&ctx.store.transactions, year);

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["month", "income", "expense", "balance"])?;
            for r in &report {
                wtr.write_record([
                    r.month.clone(),
                    r.income.to_string(),
                    r.expense.to_string(),
                    r.balance.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = report
                .iter()
                .map(|r| {
                    json!({
                        "month": r.month,
                        "income": r.income,
                        "expense": r.expense,
                        "balance": r.balance,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} annual report to {}", year, out);
    Ok(())
}
