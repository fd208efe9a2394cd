// SPDX-FileCopyrightText: 2025-2026 Cadence Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use cadence_core::{APP_NAME, Scheduler};
use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::LocalBoxFuture};
use tracing_subscriber::EnvFilter;

use crate::cmd_next_date::CmdNextDate;
use crate::cmd_task::{
    CmdTaskAdd, CmdTaskDelete, CmdTaskDone, CmdTaskEdit, CmdTaskList, CmdTaskShow,
};
use crate::config::parse_config;

/// Run the Cadence command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match Cli::parse() {
        Ok(cli) => cli.run().await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Schedule recurring tasks by day interval, year or weekday.")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to list
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/cadence/config.toml on Linux and \
MacOS, %APPDATA%/cadence/config.toml on Windows. Can also be set with CADENCE_CONFIG.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdTaskList::command())
            .subcommand(CmdTaskAdd::command())
            .subcommand(CmdTaskShow::command())
            .subcommand(CmdTaskEdit::command())
            .subcommand(CmdTaskDone::command())
            .subcommand(CmdTaskDelete::command())
            .subcommand(CmdNextDate::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdTaskList::NAME, matches)) => List(CmdTaskList::from(matches)),
            Some((CmdTaskAdd::NAME, matches)) => Add(CmdTaskAdd::from(matches)),
            Some((CmdTaskShow::NAME, matches)) => Show(CmdTaskShow::from(matches)),
            Some((CmdTaskEdit::NAME, matches)) => Edit(CmdTaskEdit::from(matches)),
            Some((CmdTaskDone::NAME, matches)) => Done(CmdTaskDone::from(matches)),
            Some((CmdTaskDelete::NAME, matches)) => Delete(CmdTaskDelete::from(matches)),
            Some((CmdNextDate::NAME, matches)) => NextDate(CmdNextDate::from(matches)),
            None => List(CmdTaskList::new()),
            Some((name, _)) => return Err(format!("Unknown command: {name}").into()),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// List or search tasks
    List(CmdTaskList),

    /// Add a new task
    Add(CmdTaskAdd),

    /// Show a task
    Show(CmdTaskShow),

    /// Edit a task
    Edit(CmdTaskEdit),

    /// Mark tasks as done
    Done(CmdTaskDone),

    /// Delete tasks
    Delete(CmdTaskDelete),

    /// Compute the next date of a repeat rule
    NextDate(CmdNextDate),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            List(a)   => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            Add(a)    => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            Show(a)   => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            Edit(a)   => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            Done(a)   => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            Delete(a) => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            NextDate(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a mut Scheduler) -> LocalBoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let (core_config, _config) = parse_config(config).await?;
        let mut scheduler = Scheduler::new(core_config).await?;

        f(&mut scheduler).await?;

        scheduler.close().await?;
        Ok(())
    }
}
