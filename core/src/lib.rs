// SPDX-FileCopyrightText: 2025-2026 Cadence Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Core of the Cadence recurring task scheduler: the repeat rule engine, the
//! task model, the SQLite store and the scheduling policy on top of them.

mod config;
mod date;
mod localdb;
mod repeat;
mod scheduler;
mod store;
mod task;

pub use crate::config::{APP_NAME, Config, ENV_DB_FILE};
pub use crate::date::TaskDate;
pub use crate::localdb::LocalDb;
pub use crate::repeat::{
    MAX_DAY_INTERVAL, RepeatError, RepeatRule, next_date, next_occurrence, parse_rule,
};
pub use crate::scheduler::{Completion, Scheduler};
pub use crate::store::TaskStore;
pub use crate::task::{MAX_REPEAT_LEN, Pager, Task, TaskDraft, TaskFilter, TaskPatch};
