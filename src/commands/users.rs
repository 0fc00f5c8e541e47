// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::context::AppContext;
use crate::models::{Permissions, Role};
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("set-perms", sub)) => set_perms(ctx, sub)?,
        Some(("rm", sub)) => rm(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn perms_summary(p: &Permissions) -> String {
    let mut granted = Vec::new();
    if p.add_transactions {
        granted.push("add_transactions");
    }
    if p.edit_transactions {
        granted.push("edit_transactions");
    }
    if p.view_reports {
        granted.push("view_reports");
    }
    if p.manage_goals {
        granted.push("manage_goals");
    }
    if p.view_patrimony {
        granted.push("view_patrimony");
    }
    if p.manage_categories {
        granted.push("manage_categories");
    }
    granted.join(", ")
}

fn list(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    ctx.require_user()?;
    let users = ctx.session.known_users();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &users)? {
        let rows = users
            .iter()
            .map(|u| {
                vec![
                    u.id.clone(),
                    u.name.clone(),
                    u.handle.clone(),
                    match u.role {
                        Role::Responsible => "responsible".to_string(),
                        Role::Dependent => "dependent".to_string(),
                    },
                    perms_summary(&u.permissions),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Handle", "Role", "Permissions"], rows)
        );
    }
    Ok(())
}

fn parse_perms(list: &str) -> Result<Permissions> {
    let mut p = Permissions::none();
    for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match item {
            "add_transactions" => p.add_transactions = true,
            "edit_transactions" => p.edit_transactions = true,
            "view_reports" => p.view_reports = true,
            "manage_goals" => p.manage_goals = true,
            "view_patrimony" => p.view_patrimony = true,
            "manage_categories" => p.manage_categories = true,
            other => return Err(anyhow::anyhow!("Unknown capability '{}'", other)),
        }
    }
    Ok(p)
}

fn set_perms(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let user = ctx.require_user()?;
    if !user.is_responsible() {
        return Err(anyhow::anyhow!(
            "Only the responsible user can administer permissions"
        ));
    }
    let id = sub.get_one::<String>("id").unwrap();
    let perms = parse_perms(sub.get_one::<String>("perms").unwrap())?;
    if ctx.session.update_dependent_permissions(id, perms) {
        println!("Permissions updated for {}", id);
    } else {
        println!("Permission update failed for {}", id);
    }
    Ok(())
}

fn rm(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let user = ctx.require_user()?;
    if !user.is_responsible() {
        return Err(anyhow::anyhow!("Only the responsible user can delete users"));
    }
    let id = sub.get_one::<String>("id").unwrap().clone();
    ctx.session.delete_user(&id);
    println!("Requested deletion of user {}", id);
    Ok(())
}
