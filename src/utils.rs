// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

const UA: &str = concat!(
    "casafin/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/casafin/casafin)"
);

/// Portuguese three-letter month abbreviations, in calendar order. These are
/// the left half of every month code.
pub const MONTH_ABBR: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

/// Build a month code like `jan-26` from a calendar year and 1-based month.
pub fn month_code(year: i32, month: u32) -> Result<String> {
    if !(1..=12).contains(&month) {
        return Err(anyhow::anyhow!("Invalid month number {}", month));
    }
    if !(2000..2100).contains(&year) {
        return Err(anyhow::anyhow!("Year {} out of range", year));
    }
    Ok(format!("{}-{:02}", MONTH_ABBR[(month - 1) as usize], year % 100))
}

/// Parse a month code like `jan-26` into (year, 1-based month).
pub fn parse_month_code(code: &str) -> Result<(i32, u32)> {
    let (abbr, yy) = code
        .split_once('-')
        .with_context(|| format!("Invalid month code '{}', expected e.g. jan-26", code))?;
    let month = MONTH_ABBR
        .iter()
        .position(|m| m.eq_ignore_ascii_case(abbr))
        .with_context(|| format!("Unknown month abbreviation '{}'", abbr))? as u32
        + 1;
    let yy: i32 = yy
        .parse()
        .with_context(|| format!("Invalid year in month code '{}'", code))?;
    if !(0..100).contains(&yy) {
        return Err(anyhow::anyhow!("Invalid year in month code '{}'", code));
    }
    Ok((2000 + yy, month))
}

/// The twelve month codes of a calendar year, in order.
pub fn month_codes_for_year(year: i32) -> Vec<String> {
    MONTH_ABBR
        .iter()
        .map(|m| format!("{}-{:02}", m, year % 100))
        .collect()
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_day(s: &str) -> Result<u8> {
    let d: u8 = s
        .trim()
        .parse()
        .with_context(|| format!("Invalid day '{}'", s))?;
    if !(1..=31).contains(&d) {
        return Err(anyhow::anyhow!("Day {} out of range 1-31", d));
    }
    Ok(d)
}

pub fn valid_email(s: &str) -> bool {
    // Shape check only; the auth service performs the real validation.
    static PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
    regex::Regex::new(PATTERN).map(|re| re.is_match(s)).unwrap_or(false)
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("R$ {}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
