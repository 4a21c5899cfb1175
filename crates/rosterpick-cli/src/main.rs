// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use logging::LogTarget;
use rosterpick_app::User;
use rosterpick_tui::{PickerOptions, PickerOutcome};
use runtime::{DEFAULT_DEMO_SIZE, RosterSource, SeedRuntime};
use std::env;
use std::path::PathBuf;
use tracing::info;

const EXIT_ABORTED: i32 = 130;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Finish {
    Done,
    Aborted,
}

fn main() {
    match run() {
        Ok(Finish::Done) => {}
        Ok(Finish::Aborted) => std::process::exit(EXIT_ABORTED),
        Err(error) => {
            eprintln!("{error:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<Finish> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(Finish::Done);
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(Finish::Done);
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(Finish::Done);
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `rosterpick --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let interactive = !(options.check_only || options.print_roster);
    logging::init_tracing(
        config.log_level(),
        &LogTarget::choose(config.log_path(), interactive),
    )?;

    let source = roster_source(&options, &config);
    let mut runtime = SeedRuntime::new(source.clone());

    if options.print_roster {
        let users = runtime.users()?;
        println!("{}", format_users(&users, options.json)?);
        return Ok(Finish::Done);
    }

    let picker_options = PickerOptions {
        title: config.title().to_owned(),
        placeholder: config.placeholder().to_owned(),
        hide_delay: config.hide_delay()?,
        dropdown_rows: config.dropdown_rows(),
    };

    if options.check_only {
        let users = runtime.users()?;
        info!(?source, users = users.len(), "configuration ok");
        return Ok(Finish::Done);
    }

    match rosterpick_tui::run_picker(&mut runtime, &picker_options)? {
        PickerOutcome::Confirmed(users) => {
            if !users.is_empty() {
                println!("{}", format_users(&users, options.json)?);
            }
            Ok(Finish::Done)
        }
        PickerOutcome::Aborted => Ok(Finish::Aborted),
    }
}

fn roster_source(options: &CliOptions, config: &Config) -> RosterSource {
    if let Some(count) = options.demo {
        return RosterSource::Demo(count);
    }
    match options.roster_path.clone().or_else(|| config.roster_path()) {
        Some(path) => RosterSource::File(path),
        None => RosterSource::Builtin,
    }
}

fn format_users(users: &[User], json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(users).context("encode selection as JSON");
    }
    Ok(users
        .iter()
        .map(User::mailbox)
        .collect::<Vec<_>>()
        .join("\n"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    roster_path: Option<PathBuf>,
    demo: Option<usize>,
    json: bool,
    print_config_path: bool,
    print_example: bool,
    print_roster: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        roster_path: None,
        demo: None,
        json: false,
        print_config_path: false,
        print_example: false,
        print_roster: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter().peekable();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--roster" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--roster requires a file path"))?;
                options.roster_path = Some(PathBuf::from(value.as_ref()));
            }
            "--demo" => {
                let count = match iter.next_if(|next| !next.as_ref().starts_with('-')) {
                    Some(value) => parse_demo_size(value.as_ref())?,
                    None => DEFAULT_DEMO_SIZE,
                };
                options.demo = Some(count);
            }
            "--json" => {
                options.json = true;
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--print-roster" => {
                options.print_roster = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    if options.demo.is_some() && options.roster_path.is_some() {
        return Err(anyhow!(
            "--demo and --roster are mutually exclusive; pick one roster source"
        ));
    }

    Ok(options)
}

fn parse_demo_size(raw: &str) -> Result<usize> {
    let count: usize = raw
        .parse()
        .with_context(|| format!("--demo expects a number of people, got {raw:?}"))?;
    if count == 0 {
        return Err(anyhow!("--demo needs at least one person"));
    }
    Ok(count)
}

fn print_help() {
    println!("rosterpick");
    println!("  --config <path>          Use a specific config path");
    println!("  --roster <path>          Load people from a TOML or JSON roster file");
    println!("  --demo [N]               Pick from N generated people (default {DEFAULT_DEMO_SIZE})");
    println!("  --json                   Print the selection as JSON");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --print-roster           Print the roster and exit");
    println!("  --check                  Validate config and roster");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, format_users, parse_cli_args, roster_source};
    use crate::config::Config;
    use crate::runtime::{DEFAULT_DEMO_SIZE, RosterSource};
    use anyhow::Result;
    use rosterpick_app::User;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/rosterpick-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                roster_path: None,
                demo: None,
                json: false,
                print_config_path: false,
                print_example: false,
                print_roster: false,
                check_only: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_and_roster_paths() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml", "--roster", "team.json"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        assert_eq!(options.roster_path, Some(PathBuf::from("team.json")));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_values() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));

        let error = parse_cli_args(vec!["--roster"], default_options_path())
            .expect_err("missing roster value should fail");
        assert!(error.to_string().contains("--roster requires a file path"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn demo_takes_an_optional_count() -> Result<()> {
        let bare = parse_cli_args(vec!["--demo"], default_options_path())?;
        assert_eq!(bare.demo, Some(DEFAULT_DEMO_SIZE));

        let sized = parse_cli_args(vec!["--demo", "120", "--json"], default_options_path())?;
        assert_eq!(sized.demo, Some(120));
        assert!(sized.json);

        let followed = parse_cli_args(vec!["--demo", "--check"], default_options_path())?;
        assert_eq!(followed.demo, Some(DEFAULT_DEMO_SIZE));
        assert!(followed.check_only);
        Ok(())
    }

    #[test]
    fn demo_rejects_bad_counts() {
        for raw in ["zero", "0"] {
            let error = parse_cli_args(vec!["--demo", raw], default_options_path())
                .expect_err("bad demo size should fail");
            assert!(error.to_string().contains("--demo"), "raw = {raw}");
        }
    }

    #[test]
    fn demo_and_roster_conflict() {
        let error = parse_cli_args(
            vec!["--demo", "--roster", "team.toml"],
            default_options_path(),
        )
        .expect_err("conflicting sources should fail");
        assert!(error.to_string().contains("mutually exclusive"));
    }

    #[test]
    fn parse_cli_args_sets_print_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "--print-config-path",
                "--print-example-config",
                "--print-roster",
                "--check",
            ],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert!(options.print_roster);
        assert!(options.check_only);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }

    #[test]
    fn roster_source_prefers_demo_then_flag_then_config() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config_path = temp.path().join("config.toml");
        std::fs::write(&config_path, "version = 1\n[roster]\npath = \"/from/config.toml\"\n")?;
        let config = Config::load(&config_path)?;

        let demo = parse_cli_args(vec!["--demo", "5"], default_options_path())?;
        assert_eq!(roster_source(&demo, &config), RosterSource::Demo(5));

        let flagged = parse_cli_args(vec!["--roster", "/from/flag.json"], default_options_path())?;
        assert_eq!(
            roster_source(&flagged, &config),
            RosterSource::File(PathBuf::from("/from/flag.json"))
        );

        let plain = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            roster_source(&plain, &config),
            RosterSource::File(PathBuf::from("/from/config.toml"))
        );
        Ok(())
    }

    #[test]
    fn selection_prints_as_mailboxes_or_json() -> Result<()> {
        let users = vec![
            User::new(5, "Ken Alvarez", "ken.alvarez@example.com"),
            User::new(9, "Cher", ""),
        ];
        assert_eq!(
            format_users(&users, false)?,
            "Ken Alvarez <ken.alvarez@example.com>\nCher"
        );

        let json: serde_json::Value = serde_json::from_str(&format_users(&users, true)?)?;
        assert_eq!(json[0]["id"], 5);
        assert_eq!(json[1]["name"], "Cher");
        assert!(json[1].get("avatar_url").is_none());
        Ok(())
    }
}
