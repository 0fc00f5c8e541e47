// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::config::RemoteConfig;
use crate::context::AppContext;
use crate::models::PaymentMethod;
use crate::utils::pretty_table;

pub fn handle(ctx: &AppContext) -> Result<()> {
    let mut rows = Vec::new();

    if RemoteConfig::from_env().is_none() {
        rows.push(vec![
            "offline_mode".to_string(),
            "CASAFIN_URL / CASAFIN_ANON_KEY not set; nothing is persisted".to_string(),
        ]);
    }
    if ctx.session.current().is_none() {
        rows.push(vec!["no_session".to_string(), "not logged in".to_string()]);
    }

    // Dangling references are tolerated at render time; surface them here.
    for t in &ctx.store.transactions {
        if let Some(cat) = t.category_id.as_deref() {
            if ctx.store.category(cat).is_none() {
                rows.push(vec!["tx_missing_category".to_string(), t.id.clone()]);
            }
        }
        if let Some(card) = t.card_id.as_deref() {
            if ctx.store.card(card).is_none() {
                rows.push(vec!["tx_missing_card".to_string(), t.id.clone()]);
            }
        }
        if let Some(goal) = t.goal_id.as_deref() {
            if ctx.store.goal(goal).is_none() {
                rows.push(vec!["tx_missing_goal".to_string(), t.id.clone()]);
            }
        }
        if t.payment_method == PaymentMethod::Credit && t.card_id.is_none() {
            rows.push(vec!["credit_tx_without_card".to_string(), t.id.clone()]);
        }
    }
    for f in &ctx.store.fixed_entries {
        if let Some(cat) = f.category_id.as_deref() {
            if ctx.store.category(cat).is_none() {
                rows.push(vec!["fixed_missing_category".to_string(), f.id.clone()]);
            }
        }
    }
    for cfg in &ctx.store.month_configs {
        let sum = u32::from(cfg.needs_percent)
            + u32::from(cfg.wants_percent)
            + u32::from(cfg.savings_percent);
        if sum > 100 {
            rows.push(vec!["percent_sum_over_100".to_string(), cfg.month.clone()]);
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
