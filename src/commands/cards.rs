// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::commands::id_for_card;
use crate::context::AppContext;
use crate::models::{new_id, Card};
use crate::utils::{fmt_money, maybe_print_json, parse_day, parse_decimal, pretty_table};

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            ctx.require_user()?;
            let card = Card {
                id: new_id(),
                name: sub.get_one::<String>("name").unwrap().clone(),
                bank: sub.get_one::<String>("bank").unwrap().clone(),
                limit: parse_decimal(sub.get_one::<String>("limit").unwrap())?,
                closing_day: parse_day(sub.get_one::<String>("closing-day").unwrap())?,
                color: sub.get_one::<String>("color").unwrap().clone(),
            };
            let name = card.name.clone();
            ctx.store.save_card(card);
            println!("Added card '{}'", name);
        }
        Some(("list", sub)) => {
            ctx.require_user()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &ctx.store.cards)? {
                let rows = ctx
                    .store
                    .cards
                    .iter()
                    .map(|c| {
                        vec![
                            c.name.clone(),
                            c.bank.clone(),
                            fmt_money(&c.limit),
                            c.closing_day.to_string(),
                            c.color.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Name", "Bank", "Limit", "Closing day", "Color"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            ctx.require_user()?;
            let name = sub.get_one::<String>("name").unwrap();
            let id = id_for_card(&ctx.store, name)?;
            ctx.store.delete_card(&id);
            println!("Removed card '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
