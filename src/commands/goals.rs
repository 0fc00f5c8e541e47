// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::commands::id_for_goal;
use crate::context::AppContext;
use crate::models::{new_id, Goal};
use crate::stats::goal_progress;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            ctx.require_permission("manage goals", |p| p.manage_goals)?;
            let goal = Goal {
                id: new_id(),
                name: sub.get_one::<String>("name").unwrap().clone(),
                icon: sub.get_one::<String>("icon").unwrap().clone(),
                target_value: parse_decimal(sub.get_one::<String>("target").unwrap())?,
                saved_value: Decimal::ZERO,
            };
            let name = goal.name.clone();
            ctx.store.save_goal(goal);
            println!("Added goal '{}'", name);
        }
        Some(("list", sub)) => {
            ctx.require_user()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &ctx.store.goals)? {
                let rows = ctx
                    .store
                    .goals
                    .iter()
                    .map(|g| {
                        // Progress always comes from the paid transactions
                        // that reference the goal, not from saved_value.
                        let actual = goal_progress(g, &ctx.store.transactions);
                        let pct = if g.target_value.is_zero() {
                            Decimal::ZERO
                        } else {
                            (actual / g.target_value * Decimal::from(100)).round_dp(1)
                        };
                        vec![
                            g.icon.clone(),
                            g.name.clone(),
                            fmt_money(&g.target_value),
                            fmt_money(&actual),
                            format!("{}%", pct),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Icon", "Name", "Target", "Saved", "Progress"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            ctx.require_permission("manage goals", |p| p.manage_goals)?;
            let name = sub.get_one::<String>("name").unwrap();
            let id = id_for_goal(&ctx.store, name)?;
            ctx.store.delete_goal(&id);
            println!("Removed goal '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
