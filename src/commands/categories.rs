// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::commands::id_for_category;
use crate::context::AppContext;
use crate::models::{new_id, Category};
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            ctx.require_permission("manage categories", |p| p.manage_categories)?;
            let cat = Category {
                id: new_id(),
                name: sub.get_one::<String>("name").unwrap().clone(),
                icon: sub.get_one::<String>("icon").unwrap().clone(),
                subcategories: sub.get_one::<String>("sub").cloned().unwrap_or_default(),
                system: false,
            };
            let name = cat.name.clone();
            ctx.store.save_category(cat);
            println!("Added category '{}'", name);
        }
        Some(("list", sub)) => {
            ctx.require_user()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &ctx.store.categories)? {
                let rows = ctx
                    .store
                    .categories
                    .iter()
                    .map(|c| {
                        vec![
                            c.icon.clone(),
                            c.name.clone(),
                            c.subcategories.clone(),
                            if c.system { "yes" } else { "" }.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Icon", "Name", "Subcategories", "System"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            ctx.require_permission("manage categories", |p| p.manage_categories)?;
            let name = sub.get_one::<String>("name").unwrap();
            let id = id_for_category(&ctx.store, name)?;
            if ctx.store.delete_category(&id) {
                println!("Removed category '{}'", name);
            } else {
                println!("Category '{}' is a system category and cannot be removed", name);
            }
        }
        _ => {}
    }
    Ok(())
}
