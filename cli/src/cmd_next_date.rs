// SPDX-FileCopyrightText: 2025-2026 Cadence Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use cadence_core::{MAX_REPEAT_LEN, TaskDate, next_date};
use clap::{ArgMatches, Command, arg};

#[derive(Debug, Clone)]
pub struct CmdNextDate {
    pub now: Option<String>,
    pub date: String,
    pub repeat: String,
}

impl CmdNextDate {
    pub const NAME: &str = "next-date";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Compute the next date of a repeat rule without touching any task")
            .arg(arg!(--now <NOW> "The reference day as YYYYMMDD, defaults to today"))
            .arg(arg!(--date <DATE> "The anchor day as YYYYMMDD").required(true))
            .arg(
                arg!(--repeat <RULE> "The repeat rule, e.g. \"d 7\", \"y\" or \"w 1,5\"")
                    .required(true),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            now: matches.get_one::<String>("now").cloned(),
            date: matches
                .get_one::<String>("date")
                .cloned()
                .unwrap_or_default(),
            repeat: matches
                .get_one::<String>("repeat")
                .cloned()
                .unwrap_or_default(),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "computing next date...");
        self.write_to(&mut io::stdout())
    }

    fn write_to(&self, w: &mut impl io::Write) -> Result<(), Box<dyn Error>> {
        if self.repeat.len() > MAX_REPEAT_LEN {
            return Err(format!("Repeat rule is longer than {MAX_REPEAT_LEN} characters").into());
        }

        let now = match &self.now {
            Some(now) => now.clone(),
            None => TaskDate::today().format_stable(),
        };
        let next = next_date(&now, &self.date, &self.repeat)?;
        writeln!(w, "{next}")?;
        Ok(())
    }
}
