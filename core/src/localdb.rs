// SPDX-FileCopyrightText: 2025-2026 Cadence Developers
//
// SPDX-License-Identifier: Apache-2.0

mod tasks;

use std::error::Error;
use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::localdb::tasks::{TaskRecord, Tasks};
use crate::{Pager, Task, TaskFilter, TaskStore};

/// Tasks kept in a SQLite database.
#[derive(Debug, Clone)]
pub struct LocalDb {
    pool: SqlitePool,

    pub tasks: Tasks,
}

impl LocalDb {
    /// Opens a sqlite database connection.
    /// If `filename` is `None`, it opens an in-memory database.
    pub async fn open(filename: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let (options, max_connections) = if let Some(filename) = filename {
            tracing::info!(path = %filename.display(), "connecting to SQLite database");
            let options = SqliteConnectOptions::new()
                .filename(filename.to_str().ok_or("Invalid path encoding")?)
                .create_if_missing(true);
            (options, 4)
        } else {
            // every connection to an in-memory database sees its own database
            tracing::info!("connecting to in-memory SQLite database");
            (SqliteConnectOptions::new().in_memory(true), 1)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| format!("Failed to connect to SQLite database: {e}"))?;

        sqlx::migrate!("src/localdb/migrations") // relative path from the crate root
            .run(&pool)
            .await
            .map_err(|e| format!("Failed to run migrations: {e}"))?;

        tracing::debug!("ensuring tables in the database");
        let tasks = Tasks::new(pool.clone());
        Ok(LocalDb { pool, tasks })
    }

    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!("closing database connection");
        self.pool.close().await;
        Ok(())
    }
}

#[async_trait]
impl TaskStore for LocalDb {
    type Error = sqlx::Error;

    async fn store(&self, task: &Task) -> Result<i64, Self::Error> {
        self.tasks.insert(&TaskRecord::from(task)).await
    }

    async fn load(&self, id: i64) -> Result<Option<Task>, Self::Error> {
        self.tasks.get(id).await?.map(TryInto::try_into).transpose()
    }

    async fn update(&self, task: &Task) -> Result<Option<Task>, Self::Error> {
        let found = self.tasks.update(&TaskRecord::from(task)).await?;
        Ok(found.then(|| task.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, Self::Error> {
        self.tasks.delete(id).await
    }

    async fn query(&self, filter: &TaskFilter, pager: &Pager) -> Result<Vec<Task>, Self::Error> {
        self.tasks
            .list(filter, pager)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    async fn count(&self, filter: &TaskFilter) -> Result<i64, Self::Error> {
        self.tasks.count(filter).await
    }
}
