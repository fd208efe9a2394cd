// SPDX-FileCopyrightText: 2025-2026 Cadence Developers
//
// SPDX-License-Identifier: Apache-2.0

use crate::{RepeatError, RepeatRule, TaskDate};

/// Longest accepted repeat rule text, the width of the storage column.
pub const MAX_REPEAT_LEN: usize = 128;

/// A scheduled task.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Task {
    /// Identifier assigned by the store.
    #[serde(with = "id_as_string")]
    pub id: i64,

    /// The day the task is due.
    pub date: TaskDate,

    /// The title of the task, never empty.
    pub title: String,

    /// Free-form comment, may be empty.
    #[serde(default)]
    pub comment: String,

    /// The repeat rule, `None` for a one-time task.
    #[serde(default, with = "repeat_as_text")]
    pub repeat: Option<RepeatRule>,
}

impl Task {
    /// Whether the task comes back after being done.
    pub fn is_repeating(&self) -> bool {
        self.repeat.is_some()
    }
}

/// Input for a new task, as typed by a user.
#[derive(Debug, Default, Clone)]
pub struct TaskDraft {
    /// The title of the task.
    pub title: String,

    /// The due date as `YYYYMMDD`, today when absent or empty.
    pub date: Option<String>,

    /// The comment of the task.
    pub comment: Option<String>,

    /// The repeat rule text, a one-time task when absent or empty.
    pub repeat: Option<String>,
}

/// Partial update of a task. Empty strings clear the comment and the repeat rule.
#[derive(Debug, Default, Clone)]
pub struct TaskPatch {
    /// The new title, if any.
    pub title: Option<String>,

    /// The new due date as `YYYYMMDD`, if any.
    pub date: Option<String>,

    /// The new comment, if any.
    pub comment: Option<String>,

    /// The new repeat rule text, if any.
    pub repeat: Option<String>,
}

impl TaskPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.comment.is_none()
            && self.repeat.is_none()
    }

    /// Applies the patch to a task, modifying it in place.
    pub fn apply_to<'a>(&self, t: &'a mut Task) -> Result<&'a mut Task, RepeatError> {
        if let Some(title) = &self.title {
            t.title = title.clone();
        }

        if let Some(date) = &self.date {
            t.date = TaskDate::parse_stable(date)?;
        }

        if let Some(comment) = &self.comment {
            t.comment = comment.clone();
        }

        if let Some(repeat) = &self.repeat {
            t.repeat = parse_optional_rule(repeat)?;
        }

        Ok(t)
    }
}

/// Which tasks a query returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    /// Every task.
    All,

    /// Tasks due on the given day.
    Date(TaskDate),

    /// Tasks whose title or comment contains the text.
    Search(String),
}

impl TaskFilter {
    /// Builds a filter from search text: a `DD.MM.YYYY` day searches by date,
    /// anything else searches titles and comments.
    pub fn parse(search: Option<&str>) -> Self {
        match search.map(str::trim) {
            None | Some("") => TaskFilter::All,
            Some(text) => match TaskDate::parse_search(text) {
                Some(date) => TaskFilter::Date(date),
                None => TaskFilter::Search(text.to_string()),
            },
        }
    }
}

/// Pagination with a limit and an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    /// The maximum number of items to return.
    pub limit: i64,

    /// The number of items to skip before starting to collect the result set.
    pub offset: i64,
}

impl From<(i64, i64)> for Pager {
    fn from((limit, offset): (i64, i64)) -> Self {
        Pager { limit, offset }
    }
}

/// Parses rule text where an empty string means no rule.
pub(crate) fn parse_optional_rule(s: &str) -> Result<Option<RepeatRule>, RepeatError> {
    match s.is_empty() {
        true => Ok(None),
        false => s.parse().map(Some),
    }
}

mod id_as_string {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(id: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

mod repeat_as_text {
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::RepeatRule;

    pub fn serialize<S: Serializer>(
        rule: &Option<RepeatRule>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match rule {
            Some(rule) => serializer.collect_str(rule),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<RepeatRule>, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_optional_rule(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> Task {
        Task {
            id: 7,
            date: TaskDate::parse_stable("20240208").unwrap(),
            title: "Pay rent".to_string(),
            comment: String::new(),
            repeat: Some(RepeatRule::DayInterval(30)),
        }
    }

    #[test]
    fn patch_empty() {
        assert!(TaskPatch::default().is_empty());
        let patch = TaskPatch {
            comment: Some(String::new()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn patch_applies_fields() {
        let mut t = task();
        let patch = TaskPatch {
            title: Some("Pay the rent".to_string()),
            date: Some("20240301".to_string()),
            comment: Some("bank transfer".to_string()),
            repeat: Some("w 1,5".to_string()),
        };
        patch.apply_to(&mut t).unwrap();
        assert_eq!(t.title, "Pay the rent");
        assert_eq!(t.date, TaskDate::parse_stable("20240301").unwrap());
        assert_eq!(t.comment, "bank transfer");
        assert_eq!(t.repeat, Some(RepeatRule::WeeklyOnDays(vec![1, 5])));
        assert_eq!(t.id, 7);
    }

    #[test]
    fn patch_clears_repeat_with_empty_string() {
        let mut t = task();
        let patch = TaskPatch {
            repeat: Some(String::new()),
            ..Default::default()
        };
        patch.apply_to(&mut t).unwrap();
        assert!(!t.is_repeating());
    }

    #[test]
    fn patch_rejects_invalid_values() {
        let patch = TaskPatch {
            date: Some("2024-03-01".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            patch.apply_to(&mut task()),
            Err(RepeatError::DateMalformed(_))
        ));

        let patch = TaskPatch {
            repeat: Some("d 401".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            patch.apply_to(&mut task()),
            Err(RepeatError::RuleOutOfRange(_))
        ));
    }

    #[test]
    fn filter_from_search_text() {
        assert_eq!(TaskFilter::parse(None), TaskFilter::All);
        assert_eq!(TaskFilter::parse(Some("  ")), TaskFilter::All);
        assert_eq!(
            TaskFilter::parse(Some("08.02.2024")),
            TaskFilter::Date(TaskDate::parse_stable("20240208").unwrap())
        );
        assert_eq!(
            TaskFilter::parse(Some("rent")),
            TaskFilter::Search("rent".to_string())
        );
        assert_eq!(
            TaskFilter::parse(Some("32.02.2024")),
            TaskFilter::Search("32.02.2024".to_string())
        );
    }

    #[test]
    fn task_json_shape() {
        let json = serde_json::to_value(task()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "7",
                "date": "20240208",
                "title": "Pay rent",
                "comment": "",
                "repeat": "d 30",
            })
        );

        let one_time: Task = serde_json::from_value(serde_json::json!({
            "id": "3",
            "date": "20240208",
            "title": "Call mom",
            "repeat": "",
        }))
        .unwrap();
        assert_eq!(one_time.id, 3);
        assert_eq!(one_time.comment, "");
        assert_eq!(one_time.repeat, None);
    }
}
