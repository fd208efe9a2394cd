// SPDX-FileCopyrightText: 2025-2026 Cadence Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use tokio::fs;

use crate::localdb::LocalDb;
use crate::task::{MAX_REPEAT_LEN, parse_optional_rule};
use crate::{
    Config, Pager, RepeatRule, Task, TaskDate, TaskDraft, TaskFilter, TaskPatch, TaskStore,
};

/// What happened to a task marked as done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The task repeats and was moved to its next occurrence.
    Rescheduled(Task),

    /// The task was a one-time task and has been removed.
    Deleted(Task),
}

/// Recurring task scheduler, applying the scheduling policy on top of a store.
#[derive(Debug, Clone)]
pub struct Scheduler<S = LocalDb> {
    today: TaskDate,
    list_limit: i64,
    store: S,
}

impl Scheduler<LocalDb> {
    /// Creates a new scheduler backed by the database named in the configuration.
    pub async fn new(mut config: Config) -> Result<Self, Box<dyn Error>> {
        config.normalize()?;
        prepare(&config).await?;

        let path = config.db_path()?;
        let db = LocalDb::open(Some(&path))
            .await
            .map_err(|e| format!("Failed to initialize db: {e}"))?;

        Ok(Self::with_store(db, TaskDate::today(), config.list_limit))
    }

    /// Close the scheduler, releasing the database.
    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        self.store.close().await
    }
}

impl<S: TaskStore> Scheduler<S> {
    /// Creates a scheduler on top of any store, with a fixed current day.
    pub fn with_store(store: S, today: TaskDate, list_limit: i64) -> Self {
        Self {
            today,
            list_limit,
            store,
        }
    }

    /// The current day of the scheduler.
    pub fn today(&self) -> TaskDate {
        self.today
    }

    /// Refresh the current day to today.
    pub fn refresh_today(&mut self) {
        self.today = TaskDate::today();
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add a new task from the given draft, returning its id.
    ///
    /// A missing date means today. A repeating task dated in the past is moved
    /// to its next occurrence, a one-time task keeps its date.
    pub async fn add_task(&self, draft: TaskDraft) -> Result<i64, Box<dyn Error>> {
        if draft.title.trim().is_empty() {
            return Err("Title is required".into());
        }

        let mut date = match draft.date.as_deref().map(str::trim) {
            None | Some("") => self.today,
            Some(s) => TaskDate::parse_stable(s)?,
        };

        let repeat = validate_repeat(draft.repeat.as_deref().unwrap_or_default())?;
        if let Some(rule) = &repeat {
            let next = rule.next_occurrence(self.today, date)?;
            if date < self.today {
                tracing::debug!(%date, %next, "moving past repeating task to next occurrence");
                date = next.max(self.today);
            }
        }

        let task = Task {
            id: 0,
            date,
            title: draft.title,
            comment: draft.comment.unwrap_or_default(),
            repeat,
        };
        let id = self.store.store(&task).await?;
        tracing::debug!(id, %date, "task added");
        Ok(id)
    }

    /// Get a task by id.
    pub async fn get_task(&self, id: i64) -> Result<Task, Box<dyn Error>> {
        self.store
            .load(id)
            .await?
            .ok_or_else(|| format!("Task not found: {id}").into())
    }

    /// List tasks, optionally searching by `DD.MM.YYYY` day or by text.
    pub async fn list_tasks(&self, search: Option<&str>) -> Result<Vec<Task>, Box<dyn Error>> {
        let filter = TaskFilter::parse(search);
        let pager: Pager = (self.list_limit, 0).into();
        tracing::debug!(?filter, ?pager, "listing tasks");
        let tasks = self.store.query(&filter, &pager).await?;
        Ok(tasks)
    }

    /// Count tasks matching the search, ignoring the page size.
    pub async fn count_tasks(&self, search: Option<&str>) -> Result<i64, Box<dyn Error>> {
        let filter = TaskFilter::parse(search);
        let count = self.store.count(&filter).await?;
        Ok(count)
    }

    /// Overwrite a stored task. The date is kept as given.
    pub async fn update_task(&self, task: Task) -> Result<Task, Box<dyn Error>> {
        if task.id <= 0 {
            return Err(format!("Invalid task id: {}", task.id).into());
        }
        if task.title.trim().is_empty() {
            return Err("Title is required".into());
        }
        if let Some(rule) = &task.repeat {
            check_rule_len(&rule.to_string())?;
            rule.next_occurrence(self.today, task.date)?;
        }

        let id = task.id;
        let task = self
            .store
            .update(&task)
            .await?
            .ok_or_else(|| format!("Task not found: {id}"))?;

        tracing::debug!(id, "task updated");
        Ok(task)
    }

    /// Apply a patch to a stored task.
    pub async fn edit_task(&self, id: i64, patch: TaskPatch) -> Result<Task, Box<dyn Error>> {
        let mut task = self.get_task(id).await?;
        if let Some(repeat) = &patch.repeat {
            check_rule_len(repeat)?;
        }
        patch.apply_to(&mut task)?;
        self.update_task(task).await
    }

    /// Mark a task as done: repeating tasks move to their next occurrence
    /// after today, one-time tasks are deleted.
    #[tracing::instrument(skip(self))]
    pub async fn done_task(&self, id: i64) -> Result<Completion, Box<dyn Error>> {
        let mut task = self.get_task(id).await?;
        match task.repeat.clone() {
            Some(rule) => {
                task.date = rule.next_occurrence(self.today, task.date)?;
                let task = self
                    .store
                    .update(&task)
                    .await?
                    .ok_or_else(|| format!("Task not found: {id}"))?;

                tracing::debug!(date = %task.date, "task rescheduled");
                Ok(Completion::Rescheduled(task))
            }
            None => {
                if !self.store.delete(id).await? {
                    return Err(format!("Task not found: {id}").into());
                }

                tracing::debug!("one-time task deleted");
                Ok(Completion::Deleted(task))
            }
        }
    }

    /// Delete a task by id.
    pub async fn delete_task(&self, id: i64) -> Result<(), Box<dyn Error>> {
        match self.store.delete(id).await? {
            true => Ok(()),
            false => Err(format!("Task not found: {id}").into()),
        }
    }
}

fn validate_repeat(rule: &str) -> Result<Option<RepeatRule>, Box<dyn Error>> {
    check_rule_len(rule)?;
    Ok(parse_optional_rule(rule)?)
}

fn check_rule_len(rule: &str) -> Result<(), Box<dyn Error>> {
    match rule.len() > MAX_REPEAT_LEN {
        true => Err(format!("Repeat rule is longer than {MAX_REPEAT_LEN} characters").into()),
        false => Ok(()),
    }
}

async fn prepare(config: &Config) -> Result<(), Box<dyn Error>> {
    if let Some(state_dir) = &config.state_dir {
        tracing::info!(path = %state_dir.display(), "ensuring state directory exists");
        fs::create_dir_all(state_dir).await?;
    }

    let path = config.db_path()?;
    if let Some(parent) = path.parent().filter(|a| !a.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    Ok(())
}
