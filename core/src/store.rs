// SPDX-FileCopyrightText: 2025-2026 Cadence Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use async_trait::async_trait;

use crate::{Pager, Task, TaskFilter};

/// Persistence for tasks.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// The error type of the underlying storage.
    type Error: Error + Send + Sync + 'static;

    /// Stores a new task and returns its id. The id of the input is ignored.
    async fn store(&self, task: &Task) -> Result<i64, Self::Error>;

    /// Loads a task by id.
    async fn load(&self, id: i64) -> Result<Option<Task>, Self::Error>;

    /// Overwrites a task, returning `None` if no task has its id.
    async fn update(&self, task: &Task) -> Result<Option<Task>, Self::Error>;

    /// Deletes a task, returning whether it existed.
    async fn delete(&self, id: i64) -> Result<bool, Self::Error>;

    /// Lists tasks matching the filter, ordered by date.
    async fn query(&self, filter: &TaskFilter, pager: &Pager) -> Result<Vec<Task>, Self::Error>;

    /// Counts tasks matching the filter.
    async fn count(&self, filter: &TaskFilter) -> Result<i64, Self::Error>;
}
