// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn base_url_arg() -> Arg {
    Arg::new("base-url")
        .long("base-url")
        .value_name("URL")
        .help("Server base URL (overrides GIRIBAZAR_BASE_URL and the stored setting)")
}

fn file_arg(help: &'static str) -> Arg {
    Arg::new("file")
        .long("file")
        .value_name("PATH")
        .value_parser(value_parser!(std::path::PathBuf))
        .conflicts_with("base-url")
        .help(help)
}

fn query_arg() -> Arg {
    Arg::new("query")
        .long("query")
        .short('q')
        .value_name("TEXT")
        .default_value("")
        .help("Case-insensitive product or category search")
}

pub fn build_cli() -> Command {
    Command::new("giribazar")
        .about("Storefront inventory overview and sale-history search")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the local settings store"))
        .subcommand(
            Command::new("config")
                .about("Client settings")
                .subcommand(
                    Command::new("set-base-url")
                        .about("Store the server base URL")
                        .arg(Arg::new("url").required(true)),
                )
                .subcommand(Command::new("show").about("Show effective settings")),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in and store the session")
                .arg(Arg::new("username").long("username").short('u').required(true))
                .arg(Arg::new("password").long("password").short('p').required(true))
                .arg(base_url_arg()),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the stored session"))
        .subcommand(
            Command::new("inventory").about("Inventory overview").subcommand(json_flags(
                Command::new("show")
                    .about("Aggregate inventory by category and product")
                    .arg(base_url_arg())
                    .arg(file_arg("Read the inventory snapshot from a JSON file"))
                    .arg(
                        Arg::new("chart")
                            .long("chart")
                            .action(ArgAction::SetTrue)
                            .help("Show the chart series instead of product cards"),
                    ),
            )),
        )
        .subcommand(
            Command::new("history").about("Sale history").subcommand(json_flags(
                Command::new("list")
                    .about("List sales matching a query with their total")
                    .arg(base_url_arg())
                    .arg(file_arg("Read the sale-history snapshot from a JSON file"))
                    .arg(query_arg()),
            )),
        )
        .subcommand(
            Command::new("export")
                .about("Write aggregated views to disk")
                .subcommand(
                    Command::new("inventory")
                        .arg(base_url_arg())
                        .arg(file_arg("Read the inventory snapshot from a JSON file"))
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("history")
                        .arg(base_url_arg())
                        .arg(file_arg("Read the sale-history snapshot from a JSON file"))
                        .arg(query_arg())
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("doctor")
                .about("Report records that cannot be aggregated")
                .arg(base_url_arg())
                .arg(
                    Arg::new("inventory-file")
                        .long("inventory-file")
                        .value_parser(value_parser!(std::path::PathBuf))
                        .requires("history-file")
                        .conflicts_with("base-url"),
                )
                .arg(
                    Arg::new("history-file")
                        .long("history-file")
                        .value_parser(value_parser!(std::path::PathBuf))
                        .requires("inventory-file")
                        .conflicts_with("base-url"),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn history_query_defaults_to_empty() {
        let m = build_cli().get_matches_from(["giribazar", "history", "list"]);
        let (_, h) = m.subcommand().unwrap();
        let (_, l) = h.subcommand().unwrap();
        assert_eq!(l.get_one::<String>("query").map(String::as_str), Some(""));
    }
}
