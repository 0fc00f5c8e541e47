// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::context::AppContext;
use crate::stats::allocation;
use crate::store::PercentField;
use crate::utils::{fmt_money, maybe_print_json, parse_month_code, pretty_table};

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(ctx, sub)?,
        Some(("set", sub)) => set(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    ctx.require_user()?;
    let month = sub.get_one::<String>("month").unwrap().to_lowercase();
    parse_month_code(&month)?;
    let cfg = ctx.store.month_config(&month);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cfg)? {
        return Ok(());
    }
    let alloc = allocation(&cfg);
    let rows = vec![
        vec![
            "Needs".to_string(),
            format!("{}%", cfg.needs_percent),
            fmt_money(&alloc.needs),
        ],
        vec![
            "Wants".to_string(),
            format!("{}%", cfg.wants_percent),
            fmt_money(&alloc.wants),
        ],
        vec![
            "Savings".to_string(),
            format!("{}%", cfg.savings_percent),
            fmt_money(&alloc.savings),
        ],
    ];
    println!("Income for {}: {}", month, fmt_money(&cfg.income));
    println!("{}", pretty_table(&["Bucket", "Percent", "Allocated"], rows));
    Ok(())
}

fn set(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    ctx.require_permission("edit the budget split", |p| p.edit_transactions)?;
    let month = sub.get_one::<String>("month").unwrap().to_lowercase();
    parse_month_code(&month)?;
    let field = match sub.get_one::<String>("field").unwrap().as_str() {
        "needs" => PercentField::Needs,
        "wants" => PercentField::Wants,
        "savings" => PercentField::Savings,
        other => {
            return Err(anyhow::anyhow!(
                "Unknown field '{}' (use needs|wants|savings)",
                other
            ))
        }
    };
    let percent = *sub.get_one::<i64>("percent").unwrap();
    let cfg = ctx.store.set_month_percent(&month, field, percent);
    println!(
        "Split for {}: needs {}%, wants {}%, savings {}%",
        month, cfg.needs_percent, cfg.wants_percent, cfg.savings_percent
    );
    Ok(())
}
