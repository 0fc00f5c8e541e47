// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;

use crate::commands::parse_investment_kind;
use crate::context::AppContext;
use crate::models::{new_id, Investment, InvestmentKind};
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};

fn kind_label(kind: InvestmentKind) -> &'static str {
    match kind {
        InvestmentKind::Stocks => "Ações",
        InvestmentKind::RealEstateFunds => "FIIs",
        InvestmentKind::TreasuryBonds => "Tesouro Direto",
        InvestmentKind::BankDeposit => "CDB",
        InvestmentKind::CreditNotes => "LCI/LCA",
        InvestmentKind::Funds => "Fundos",
        InvestmentKind::Pension => "Previdência",
        InvestmentKind::Savings => "Poupança",
        InvestmentKind::Crypto => "Cripto",
        InvestmentKind::Other => "Outros",
    }
}

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            ctx.require_permission("manage patrimony", |p| p.view_patrimony)?;
            let inv = Investment {
                id: new_id(),
                kind: parse_investment_kind(sub.get_one::<String>("kind").unwrap())?,
                value: parse_decimal(sub.get_one::<String>("value").unwrap())?,
                broker: sub.get_one::<String>("broker").unwrap().clone(),
                updated_at: Utc::now(),
                category: sub.get_one::<String>("category").unwrap().clone(),
            };
            let label = kind_label(inv.kind);
            ctx.store.save_investment(inv);
            println!("Added {} investment", label);
        }
        Some(("list", sub)) => {
            ctx.require_permission("view patrimony", |p| p.view_patrimony)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &ctx.store.investments)? {
                let rows = ctx
                    .store
                    .investments
                    .iter()
                    .map(|i| {
                        vec![
                            i.id.clone(),
                            kind_label(i.kind).to_string(),
                            fmt_money(&i.value),
                            i.broker.clone(),
                            i.category.clone(),
                            i.updated_at.format("%Y-%m-%d").to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Kind", "Value", "Broker", "Category", "Updated"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            ctx.require_permission("manage patrimony", |p| p.view_patrimony)?;
            let id = sub.get_one::<String>("id").unwrap();
            if ctx.store.delete_investment(id) {
                println!("Removed investment {}", id);
            } else {
                println!("No investment with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}
