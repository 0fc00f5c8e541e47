// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use casafin::{cli, commands, config, context::AppContext};

fn main() -> Result<()> {
    env_logger::init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut ctx = AppContext::from_env()?;

    match matches.subcommand() {
        Some(("auth", sub)) => commands::auth::handle(&mut ctx, sub)?,
        Some(("user", sub)) => commands::users::handle(&mut ctx, sub)?,
        Some(("tx", sub)) => commands::tx::handle(&mut ctx, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut ctx, sub)?,
        Some(("card", sub)) => commands::cards::handle(&mut ctx, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut ctx, sub)?,
        Some(("fixed", sub)) => commands::fixed::handle(&mut ctx, sub)?,
        Some(("asset", sub)) => commands::assets::handle(&mut ctx, sub)?,
        Some(("investment", sub)) => commands::investments::handle(&mut ctx, sub)?,
        Some(("month", sub)) => commands::month::handle(&mut ctx, sub)?,
        Some(("report", sub)) => commands::reports::handle(&mut ctx, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&mut ctx, sub)?,
        Some(("lang", sub)) => match sub.get_one::<String>("code") {
            Some(code) => {
                config::set_language(code)?;
                println!("Language set to {}", code);
            }
            None => println!("{}", config::language()),
        },
        Some(("doctor", _)) => commands::doctor::handle(&ctx)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
