// SPDX-FileCopyrightText: 2025-2026 Cadence Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::path::Path;

use cadence_core::{Config, LocalDb, Scheduler, TaskDate, TaskDraft};

/// Creates a test configuration storing its database under `state_dir`.
#[must_use]
pub fn test_config(state_dir: &Path) -> Config {
    Config {
        state_dir: Some(state_dir.to_path_buf()),
        ..Default::default()
    }
}

/// Parses a `YYYYMMDD` date, panicking on bad input.
#[must_use]
pub fn date(s: &str) -> TaskDate {
    TaskDate::parse_stable(s).expect("test dates are valid")
}

/// Creates a task draft for today without a repeat rule.
#[must_use]
pub fn test_task_draft(title: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        ..Default::default()
    }
}

/// Opens a scheduler on the database file at `path` with a fixed current day.
pub async fn open_scheduler(path: &Path, today: &str) -> Scheduler<LocalDb> {
    let db = LocalDb::open(Some(path))
        .await
        .expect("Failed to open test database");
    Scheduler::with_store(db, date(today), 10)
}
