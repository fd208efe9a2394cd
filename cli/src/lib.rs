// SPDX-FileCopyrightText: 2025-2026 Cadence Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface of the Cadence recurring task scheduler.

mod cli;
mod cmd_next_date;
mod cmd_task;
mod config;
mod table;
mod task_formatter;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::cmd_next_date::CmdNextDate;
pub use crate::cmd_task::{
    CmdTaskAdd, CmdTaskDelete, CmdTaskDone, CmdTaskEdit, CmdTaskList, CmdTaskShow,
};
pub use crate::util::ArgOutputFormat;
