// SPDX-FileCopyrightText: 2025-2026 Cadence Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use cadence_core::{Task, TaskDate};
use colored::Color;

use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::ArgOutputFormat;

#[derive(Debug)]
pub struct TaskFormatter {
    columns: Vec<TaskColumn>,
    format: ArgOutputFormat,
}

impl TaskFormatter {
    pub fn new(today: TaskDate) -> Self {
        Self {
            columns: vec![
                TaskColumn::Id,
                TaskColumn::Date(TaskColumnDate { today }),
                TaskColumn::Repeat,
                TaskColumn::Title,
                TaskColumn::Comment,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, tasks: &'a [Task]) -> Display<'a> {
        Display {
            tasks,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    tasks: &'a [Task],
    formatter: &'a TaskFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            ArgOutputFormat::Json => {
                let json = serde_json::json!({ "tasks": self.tasks });
                let s = serde_json::to_string_pretty(&json).map_err(|_| fmt::Error)?;
                write!(f, "{s}")
            }
            ArgOutputFormat::Table => {
                write!(f, "{}", Table::new(&self.formatter.columns, self.tasks))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum TaskColumn {
    Id,
    Date(TaskColumnDate),
    Repeat,
    Title,
    Comment,
}

impl TableColumn<Task> for TaskColumn {
    fn format<'a>(&self, task: &'a Task) -> Cow<'a, str> {
        match self {
            TaskColumn::Id => format!("#{}", task.id).into(),
            TaskColumn::Date(_) => task.date.format_stable().into(),
            TaskColumn::Repeat => match &task.repeat {
                Some(rule) => format!("({rule})").into(),
                None => "".into(),
            },
            TaskColumn::Title => task.title.as_str().into(),
            TaskColumn::Comment => task.comment.as_str().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            TaskColumn::Id => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, task: &Task) -> Option<Color> {
        match self {
            TaskColumn::Date(a) => a.get_color(task),
            TaskColumn::Repeat => Some(Color::Cyan),
            TaskColumn::Comment => Some(Color::BrightBlack),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskColumnDate {
    today: TaskDate,
}

impl TaskColumnDate {
    fn get_color(&self, task: &Task) -> Option<Color> {
        const COLOR_OVERDUE: Option<Color> = Some(Color::Red);
        const COLOR_TODAY: Option<Color> = Some(Color::Yellow);

        match task.date.cmp(&self.today) {
            std::cmp::Ordering::Less => COLOR_OVERDUE,
            std::cmp::Ordering::Equal => COLOR_TODAY,
            std::cmp::Ordering::Greater => None,
        }
    }
}
