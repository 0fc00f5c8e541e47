// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;

use crate::commands::parse_liquidity;
use crate::context::AppContext;
use crate::models::{new_id, Asset, LiquidityTier};
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};

fn liquidity_label(tier: LiquidityTier) -> &'static str {
    match tier {
        LiquidityTier::Immediate => "Imediata",
        LiquidityTier::ShortTerm => "Curto prazo",
        LiquidityTier::MediumTerm => "Médio prazo",
        LiquidityTier::LongTerm => "Longo prazo",
    }
}

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            ctx.require_permission("manage patrimony", |p| p.view_patrimony)?;
            let asset = Asset {
                id: new_id(),
                description: sub.get_one::<String>("desc").unwrap().clone(),
                objective: sub.get_one::<String>("objective").unwrap().clone(),
                bank: sub.get_one::<String>("bank").unwrap().clone(),
                value: parse_decimal(sub.get_one::<String>("value").unwrap())?,
                updated_at: Utc::now(),
                liquidity: parse_liquidity(sub.get_one::<String>("liquidity").unwrap())?,
                touchable: !sub.get_flag("untouchable"),
            };
            let desc = asset.description.clone();
            ctx.store.save_asset(asset);
            println!("Added asset '{}'", desc);
        }
        Some(("list", sub)) => {
            ctx.require_permission("view patrimony", |p| p.view_patrimony)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &ctx.store.assets)? {
                let rows = ctx
                    .store
                    .assets
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.clone(),
                            a.description.clone(),
                            a.bank.clone(),
                            fmt_money(&a.value),
                            liquidity_label(a.liquidity).to_string(),
                            if a.touchable { "yes" } else { "no" }.to_string(),
                            a.updated_at.format("%Y-%m-%d").to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["Id", "Description", "Bank", "Value", "Liquidity", "Touchable", "Updated"],
                        rows,
                    )
                );
            }
        }
        Some(("rm", sub)) => {
            ctx.require_permission("manage patrimony", |p| p.view_patrimony)?;
            let id = sub.get_one::<String>("id").unwrap();
            if ctx.store.delete_asset(id) {
                println!("Removed asset {}", id);
            } else {
                println!("No asset with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}
