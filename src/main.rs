//! rltable - Columnar Terminal Log Viewer

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use rltable::ui::TerminalUI;
use rltable::{AppConfig, Application};
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

fn cli() -> Command {
    Command::new("rltable")
        .version(rltable::VERSION)
        .about("A terminal log viewer that splits lines into highlighted columns")
        .long_about(
            "rltable shows a log file as a table. A format file supplies the regular \
             expression whose named groups become columns, plus highlight rules that \
             color matching cells or rows. Without a format each line is one column.",
        )
        .arg(
            Arg::new("file")
                .help("Path to the log file to view")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("PATH")
                .help("TOML format file (pattern and highlight rules)"),
        )
        .arg(
            Arg::new("poll-interval")
                .long("poll-interval")
                .value_name("MS")
                .value_parser(clap::value_parser!(u64).range(10..))
                .default_value("250")
                .help("How often to check the log and format files for changes"),
        )
        .arg(
            Arg::new("no-follow")
                .long("no-follow")
                .action(ArgAction::SetTrue)
                .help("Do not pick up lines appended to the log file"),
        )
        .arg(
            Arg::new("auto-scroll")
                .long("auto-scroll")
                .action(ArgAction::SetTrue)
                .help("Start with the view pinned to the last row"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .help("Write diagnostics to this file (filtered by RUST_LOG)"),
        )
}

/// The terminal belongs to the UI, so diagnostics only go to stderr at `error`
/// unless a log file is given.
fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let mut builder = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            let mut builder =
                env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error"))
        }
    };
    builder.init();
    Ok(())
}

fn config_from_args(matches: &clap::ArgMatches) -> Result<AppConfig> {
    let file_path = matches
        .get_one::<String>("file")
        .map(PathBuf::from)
        .context("file argument is required")?;

    let mut config = AppConfig::new(file_path);
    config.format_path = matches.get_one::<String>("format").map(PathBuf::from);
    if let Some(ms) = matches.get_one::<u64>("poll-interval") {
        config.poll_interval = Duration::from_millis(*ms);
    }
    config.follow = !matches.get_flag("no-follow");
    config.auto_scroll = matches.get_flag("auto-scroll");
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    let log_file = matches.get_one::<String>("log-file").map(PathBuf::from);
    init_logging(log_file.as_ref())?;

    let config = config_from_args(&matches)?;
    let log_path = config.log_path.clone();

    let ui_renderer = Box::new(TerminalUI::new());
    let mut app = Application::new(config, ui_renderer)
        .with_context(|| format!("Failed to open {}", log_path.display()))?;

    app.run().await?;

    Ok(())
}
