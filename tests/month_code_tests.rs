// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use casafin::utils::{month_code, month_codes_for_year, parse_month_code};

#[test]
fn codes_use_portuguese_abbreviations_and_two_digit_years() {
    assert_eq!(month_code(2026, 1).unwrap(), "jan-26");
    assert_eq!(month_code(2026, 2).unwrap(), "fev-26");
    assert_eq!(month_code(2026, 12).unwrap(), "dez-26");
    assert_eq!(month_code(2030, 9).unwrap(), "set-30");
    // Single-digit years pad.
    assert_eq!(month_code(2005, 3).unwrap(), "mar-05");
}

#[test]
fn parsing_inverts_formatting_for_the_whole_calendar() {
    for year in [2005, 2026, 2099] {
        for month in 1..=12 {
            let code = month_code(year, month).unwrap();
            assert_eq!(parse_month_code(&code).unwrap(), (year, month));
        }
    }
}

#[test]
fn parsing_is_case_insensitive_on_the_abbreviation() {
    assert_eq!(parse_month_code("JAN-26").unwrap(), (2026, 1));
    assert_eq!(parse_month_code("Dez-05").unwrap(), (2005, 12));
}

#[test]
fn malformed_codes_are_rejected() {
    assert!(parse_month_code("january-26").is_err());
    assert!(parse_month_code("jan26").is_err());
    assert!(parse_month_code("jan-xx").is_err());
    assert!(parse_month_code("jan-260").is_err());
    assert!(month_code(2026, 0).is_err());
    assert!(month_code(2026, 13).is_err());
    assert!(month_code(1999, 5).is_err());
}

#[test]
fn a_year_yields_its_twelve_codes_in_order() {
    let codes = month_codes_for_year(2026);
    assert_eq!(codes.len(), 12);
    assert_eq!(codes.first().map(String::as_str), Some("jan-26"));
    assert_eq!(codes.last().map(String::as_str), Some("dez-26"));
}
