// SPDX-FileCopyrightText: 2025-2026 Cadence Developers
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::{Sqlite, SqlitePool, query::QueryAs, sqlite::SqliteArguments};

use crate::task::parse_optional_rule;
use crate::{Pager, Task, TaskDate, TaskFilter};

#[derive(Debug, Clone)]
pub struct Tasks {
    pool: SqlitePool,
}

impl Tasks {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, task: &TaskRecord) -> Result<i64, sqlx::Error> {
        const SQL: &str = "\
INSERT INTO scheduler (date, title, comment, repeat)
VALUES (?, ?, ?, ?);
";

        let result = sqlx::query(SQL)
            .bind(&task.date)
            .bind(&task.title)
            .bind(&task.comment)
            .bind(&task.repeat)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get(&self, id: i64) -> Result<Option<TaskRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, date, title, comment, repeat
FROM scheduler
WHERE id = ?;
";

        sqlx::query_as(SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Overwrites every column of the task, returns whether the row exists.
    pub async fn update(&self, task: &TaskRecord) -> Result<bool, sqlx::Error> {
        const SQL: &str = "\
UPDATE scheduler
SET date = ?, title = ?, comment = ?, repeat = ?
WHERE id = ?;
";

        let result = sqlx::query(SQL)
            .bind(&task.date)
            .bind(&task.title)
            .bind(&task.comment)
            .bind(&task.repeat)
            .bind(task.id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        const SQL: &str = "DELETE FROM scheduler WHERE id = ?;";

        let result = sqlx::query(SQL).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list(
        &self,
        filter: &TaskFilter,
        pager: &Pager,
    ) -> Result<Vec<TaskRecord>, sqlx::Error> {
        let mut sql = "\
SELECT id, date, title, comment, repeat
FROM scheduler
"
        .to_string();
        sql += &Self::build_where(filter);
        sql += " ORDER BY date, id LIMIT ? OFFSET ?;";

        let pattern = Self::like_pattern(filter);
        let query = Self::bind_filter(filter, pattern.as_deref(), sqlx::query_as(&sql));
        query
            .bind(pager.limit)
            .bind(pager.offset)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn count(&self, filter: &TaskFilter) -> Result<i64, sqlx::Error> {
        let mut sql = "SELECT COUNT(*) FROM scheduler".to_string();
        sql += &Self::build_where(filter);
        sql += ";";

        let pattern = Self::like_pattern(filter);
        let query = Self::bind_filter(filter, pattern.as_deref(), sqlx::query_as(&sql));
        let row: (i64,) = query.fetch_one(&self.pool).await?;
        Ok(row.0)
    }

    fn build_where(filter: &TaskFilter) -> String {
        match filter {
            TaskFilter::All => String::new(),
            TaskFilter::Date(_) => " WHERE date = ? ".to_string(),
            TaskFilter::Search(_) => {
                " WHERE title LIKE ? ESCAPE '\\' OR comment LIKE ? ESCAPE '\\' ".to_string()
            }
        }
    }

    fn like_pattern(filter: &TaskFilter) -> Option<String> {
        match filter {
            TaskFilter::Search(text) => {
                let escaped = text
                    .replace('\\', "\\\\")
                    .replace('%', "\\%")
                    .replace('_', "\\_");
                Some(format!("%{escaped}%"))
            }
            _ => None,
        }
    }

    fn bind_filter<'a, O>(
        filter: &'a TaskFilter,
        pattern: Option<&'a str>,
        mut query: QueryAs<'a, Sqlite, O, SqliteArguments<'a>>,
    ) -> QueryAs<'a, Sqlite, O, SqliteArguments<'a>> {
        match filter {
            TaskFilter::All => {}
            TaskFilter::Date(date) => query = query.bind(date.format_stable()),
            TaskFilter::Search(_) => {
                let pattern = pattern.unwrap_or_default();
                query = query.bind(pattern).bind(pattern);
            }
        }
        query
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskRecord {
    id: i64,
    date: String,
    title: String,
    comment: Option<String>,
    repeat: Option<String>,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            date: task.date.format_stable(),
            title: task.title.clone(),
            comment: Some(task.comment.clone()),
            repeat: Some(task.repeat.as_ref().map(|a| a.to_string()).unwrap_or_default()),
        }
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = sqlx::Error;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let date = TaskDate::parse_stable(&record.date).map_err(|e| sqlx::Error::Decode(e.into()))?;
        let repeat = parse_optional_rule(record.repeat.as_deref().unwrap_or_default())
            .map_err(|e| sqlx::Error::Decode(e.into()))?;

        Ok(Task {
            id: record.id,
            date,
            title: record.title,
            comment: record.comment.unwrap_or_default(),
            repeat,
        })
    }
}
