// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::context::AppContext;
use crate::models::{new_id, Permissions, Role, User};
use crate::utils::maybe_print_json;

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => login(ctx, sub)?,
        Some(("logout", _)) => logout(ctx),
        Some(("register", sub)) => register(ctx, sub)?,
        Some(("reset", sub)) => reset(ctx, sub),
        Some(("whoami", sub)) => whoami(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn login(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let handle = sub.get_one::<String>("handle").unwrap();
    let password = sub.get_one::<String>("password").unwrap();
    if ctx.session.login(handle, password) {
        let owner = ctx
            .session
            .current()
            .map(|u| u.owner_id().to_string())
            .unwrap_or_default();
        ctx.store.attach(&owner);
        let name = ctx.session.current().map(|u| u.name.as_str()).unwrap_or(handle);
        println!("Logged in as {}", name);
    } else {
        println!("Login failed: check the handle and password");
    }
    Ok(())
}

fn logout(ctx: &mut AppContext) {
    ctx.session.logout();
    ctx.store.detach();
    println!("Logged out");
}

fn register(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let responsible_id = sub.get_one::<String>("dependent-of").cloned();
    let role = if responsible_id.is_some() {
        Role::Dependent
    } else {
        Role::Responsible
    };
    let profile = User {
        id: new_id(),
        name: sub.get_one::<String>("name").unwrap().clone(),
        handle: sub.get_one::<String>("handle").unwrap().clone(),
        email: sub.get_one::<String>("email").unwrap().clone(),
        role,
        permissions: match role {
            Role::Responsible => Permissions::all(),
            Role::Dependent => Permissions::none(),
        },
        responsible_id,
    };
    let password = sub.get_one::<String>("password").unwrap();
    ctx.session.register(profile, password)?;
    let owner = ctx
        .session
        .current()
        .map(|u| u.owner_id().to_string())
        .unwrap_or_default();
    ctx.store.attach(&owner);
    println!(
        "Registered and logged in. The store starts with {} categories.",
        ctx.store.categories.len()
    );
    Ok(())
}

fn reset(ctx: &mut AppContext, sub: &clap::ArgMatches) {
    let email = sub.get_one::<String>("email").unwrap();
    let outcome = ctx.session.request_password_reset(email);
    if outcome.success {
        println!("Reset email requested for {}", email);
    } else {
        println!(
            "Reset request failed: {}",
            outcome.error.unwrap_or_else(|| "unknown error".to_string())
        );
    }
}

fn whoami(ctx: &AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    match ctx.session.current() {
        Some(user) => {
            if !maybe_print_json(json_flag, jsonl_flag, user)? {
                println!(
                    "{} ({}, {})",
                    user.name,
                    user.handle,
                    match user.role {
                        Role::Responsible => "responsible",
                        Role::Dependent => "dependent",
                    }
                );
            }
        }
        None => println!("anonymous"),
    }
    Ok(())
}
