// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("casafin")
        .about("Family budgeting, savings goals, and net-worth tracking backed by a hosted store")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(
            Command::new("auth")
                .about("Login, logout, registration, password reset")
                .subcommand(
                    Command::new("login")
                        .about("Sign in with a login handle")
                        .arg(Arg::new("handle").long("handle").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(Command::new("logout").about("Sign out and clear the local session"))
                .subcommand(
                    Command::new("register")
                        .about("Create a responsible account, or a dependent of one")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("handle").long("handle").required(true))
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true))
                        .arg(
                            Arg::new("dependent-of")
                                .long("dependent-of")
                                .help("Id of the responsible user this dependent belongs to"),
                        ),
                )
                .subcommand(
                    Command::new("reset")
                        .about("Request a password reset email")
                        .arg(Arg::new("email").long("email").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("whoami").about("Show the current session identity"),
                )),
        )
        .subcommand(
            Command::new("user")
                .about("Household members and dependent permissions")
                .subcommand(json_flags(Command::new("list").about("List household users")))
                .subcommand(
                    Command::new("set-perms")
                        .about("Replace a dependent's permission set")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("perms").long("perms").required(true).help(
                            "Comma-separated capabilities: add_transactions, edit_transactions, \
                             view_reports, manage_goals, view_patrimony, manage_categories",
                        )),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a user (best-effort, no cascade)")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("month").long("month").required(true).help("Month code, e.g. jan-26"))
                        .arg(Arg::new("desc").long("desc").required(true))
                        .arg(Arg::new("day").long("day").required(true))
                        .arg(Arg::new("kind").long("kind").required(true).help("receita | despesa"))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("method").long("method").help("dinheiro | debito | credito | pix"))
                        .arg(Arg::new("card").long("card").help("Card name, required with --method credito"))
                        .arg(Arg::new("goal").long("goal"))
                        .arg(Arg::new("investment").long("investment"))
                        .arg(Arg::new("paid").long("paid").action(ArgAction::SetTrue))
                        .arg(Arg::new("paid-on").long("paid-on").help("Payment date YYYY-MM-DD"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions of a month")
                        .arg(Arg::new("month").long("month").required(true)),
                ))
                .subcommand(
                    Command::new("pay")
                        .about("Mark a transaction as paid")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("date").long("date").help("Payment date YYYY-MM-DD")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Spending categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("icon").long("icon").default_value("📦"))
                        .arg(Arg::new("sub").long("sub").help("Free-text subcategories")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("rm").arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("card")
                .about("Credit cards")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("bank").long("bank").required(true))
                        .arg(Arg::new("limit").long("limit").required(true))
                        .arg(Arg::new("closing-day").long("closing-day").required(true))
                        .arg(Arg::new("color").long("color").default_value("#777777")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("rm").arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("icon").long("icon").default_value("🎯"))
                        .arg(Arg::new("target").long("target").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List goals with recomputed progress"),
                ))
                .subcommand(
                    Command::new("rm").arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("fixed")
                .about("Recurring transaction templates")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("desc").long("desc").required(true))
                        .arg(Arg::new("day").long("day").required(true))
                        .arg(Arg::new("kind").long("kind").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("method").long("method"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("apply")
                        .about("Materialize active templates into a month")
                        .arg(Arg::new("month").long("month").required(true)),
                )
                .subcommand(
                    Command::new("toggle")
                        .about("Flip a template's active flag")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true))),
        )
        .subcommand(
            Command::new("asset")
                .about("Patrimony: liquid assets")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("desc").long("desc").required(true))
                        .arg(Arg::new("objective").long("objective").default_value(""))
                        .arg(Arg::new("bank").long("bank").required(true))
                        .arg(Arg::new("value").long("value").required(true))
                        .arg(
                            Arg::new("liquidity")
                                .long("liquidity")
                                .required(true)
                                .help("imediata | curto | medio | longo"),
                        )
                        .arg(
                            Arg::new("untouchable")
                                .long("untouchable")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true))),
        )
        .subcommand(
            Command::new("investment")
                .about("Patrimony: investments")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .help("acoes | fiis | tesouro | cdb | lci-lca | fundos | previdencia | poupanca | cripto | outros"),
                        )
                        .arg(Arg::new("value").long("value").required(true))
                        .arg(Arg::new("broker").long("broker").required(true))
                        .arg(Arg::new("category").long("category").default_value("")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true))),
        )
        .subcommand(
            Command::new("month")
                .about("Monthly budget split (needs/wants/savings)")
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Show a month's split and allocated amounts")
                        .arg(Arg::new("month").long("month").required(true)),
                ))
                .subcommand(
                    Command::new("set")
                        .about("Edit one percentage; clamped so the three never sum past 100")
                        .arg(Arg::new("month").long("month").required(true))
                        .arg(
                            Arg::new("field")
                                .long("field")
                                .required(true)
                                .help("needs | wants | savings"),
                        )
                        .arg(
                            Arg::new("percent")
                                .long("percent")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly and annual reports")
                .subcommand(json_flags(
                    Command::new("monthly").arg(Arg::new("month").long("month").required(true)),
                ))
                .subcommand(json_flags(
                    Command::new("annual").arg(
                        Arg::new("year")
                            .long("year")
                            .required(true)
                            .value_parser(clap::value_parser!(i32)),
                    ),
                ))
                .subcommand(
                    Command::new("thermometer")
                        .about("Expense-to-income ratio for a month")
                        .arg(Arg::new("month").long("month").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("patrimony").about("Aggregate net worth"),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export reports to files")
                .subcommand(
                    Command::new("annual")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .required(true)
                                .value_parser(clap::value_parser!(i32)),
                        )
                        .arg(Arg::new("format").long("format").default_value("csv").help("csv | json"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("lang")
                .about("Show or set the display language marker")
                .arg(Arg::new("code").help("e.g. pt-BR, en-US")),
        )
        .subcommand(Command::new("doctor").about("Check configuration and dangling references"))
}
