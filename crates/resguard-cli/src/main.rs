// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! resguard CLI - resource lifecycle checks over parsed Java units.

mod commands;
mod logger;
mod output;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use resguard_lint::LintOpts;

use commands::Format;

#[derive(Parser)]
#[command(
    name = "resguard",
    about = "Find ResourceResolver handles that should use try-with-resources",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level for diagnostics on stderr
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

#[derive(Subcommand)]
enum Command {
    /// Check unit files (JSON) for resource lifecycle issues
    Check {
        /// Unit files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,

        /// Only run rules matching this pattern (e.g. "resource/*")
        #[arg(long = "rule")]
        rules: Vec<String>,

        /// Skip rules matching this pattern
        #[arg(long = "exclude")]
        excludes: Vec<String>,
    },
    /// List the available rules
    Rules {
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    output::init();
    if let Err(e) = logger::init(cli.log_level.into()) {
        eprintln!("{}: cannot set up logging: {}", output::error_label(), e);
    }

    let ok = match cli.command {
        Command::Check {
            files,
            config,
            format,
            rules,
            excludes,
        } => match commands::load_config(config.as_deref()) {
            Ok(config) => commands::cmd_check(&files, &config, &LintOpts { rules, excludes }, format),
            Err(e) => {
                eprintln!("{}: {}", output::error_label(), e);
                false
            }
        },
        Command::Rules { config } => match commands::load_config(config.as_deref()) {
            Ok(config) => {
                commands::cmd_rules(&config);
                true
            }
            Err(e) => {
                eprintln!("{}: {}", output::error_label(), e);
                false
            }
        },
    };

    if !ok {
        process::exit(1);
    }
}
