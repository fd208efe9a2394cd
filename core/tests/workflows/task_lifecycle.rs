// SPDX-FileCopyrightText: 2025-2026 Cadence Developers
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end task lifecycle workflow tests.
//!
//! These tests follow tasks from creation through edits and completion on a
//! file-backed database, reopening it to check what was persisted.

use cadence_core::{Completion, RepeatRule, TaskDraft, TaskPatch};

use crate::common::{date, open_scheduler, setup_temp_dirs, test_task_draft};

#[tokio::test]
async fn task_lifecycle_repeating_task_survives_completion() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let path = temp_dirs.db_file("tasks.db");
    let scheduler = open_scheduler(&path, "20240105").await;
    let draft = TaskDraft {
        title: "Team sync".to_string(),
        date: Some("20240105".to_string()),
        comment: Some("room 4".to_string()),
        repeat: Some("w 1,3".to_string()),
    };
    let id = scheduler.add_task(draft).await.unwrap();

    // Act - Friday anchor wraps to Monday, then moves on to Wednesday
    let first = scheduler.done_task(id).await.unwrap();
    let second = scheduler.done_task(id).await.unwrap();

    // Assert
    let Completion::Rescheduled(first) = first else {
        panic!("Repeating task should be rescheduled");
    };
    let Completion::Rescheduled(second) = second else {
        panic!("Repeating task should be rescheduled");
    };
    assert_eq!(first.date, date("20240108"));
    assert_eq!(second.date, date("20240110"));

    scheduler.close().await.unwrap();
    let reopened = open_scheduler(&path, "20240105").await;
    let task = reopened.get_task(id).await.unwrap();
    assert_eq!(task.date, date("20240110"));
    assert_eq!(task.comment, "room 4");
    assert_eq!(task.repeat, Some(RepeatRule::WeeklyOnDays(vec![1, 3])));
}

#[tokio::test]
async fn task_lifecycle_one_time_task_is_removed_when_done() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let scheduler = open_scheduler(&temp_dirs.db_file("tasks.db"), "20240208").await;
    let id = scheduler
        .add_task(test_task_draft("Renew passport"))
        .await
        .unwrap();

    // Act
    let completion = scheduler.done_task(id).await.unwrap();

    // Assert
    assert!(matches!(completion, Completion::Deleted(_)));
    assert!(scheduler.list_tasks(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn task_lifecycle_edit_turns_repeating_task_into_one_time() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let scheduler = open_scheduler(&temp_dirs.db_file("tasks.db"), "20240208").await;
    let draft = TaskDraft {
        title: "Pay rent".to_string(),
        repeat: Some("d 30".to_string()),
        ..Default::default()
    };
    let id = scheduler.add_task(draft).await.unwrap();

    // Act
    let patch = TaskPatch {
        repeat: Some(String::new()),
        comment: Some("last month".to_string()),
        ..Default::default()
    };
    let task = scheduler.edit_task(id, patch).await.unwrap();
    let completion = scheduler.done_task(id).await.unwrap();

    // Assert
    assert!(!task.is_repeating());
    assert_eq!(task.comment, "last month");
    assert!(matches!(completion, Completion::Deleted(_)));
}

#[tokio::test]
async fn task_lifecycle_create_policy() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let scheduler = open_scheduler(&temp_dirs.db_file("tasks.db"), "20250615").await;

    // Act
    let yearly = scheduler
        .add_task(TaskDraft {
            title: "New year".to_string(),
            date: Some("20230101".to_string()),
            repeat: Some("y".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let one_time = scheduler
        .add_task(TaskDraft {
            title: "Missed".to_string(),
            date: Some("20230101".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let today = scheduler
        .add_task(test_task_draft("Today"))
        .await
        .unwrap();

    // Assert
    assert_eq!(
        scheduler.get_task(yearly).await.unwrap().date,
        date("20260101")
    );
    assert_eq!(
        scheduler.get_task(one_time).await.unwrap().date,
        date("20230101")
    );
    assert_eq!(
        scheduler.get_task(today).await.unwrap().date,
        date("20250615")
    );
}

#[tokio::test]
async fn task_lifecycle_search() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let scheduler = open_scheduler(&temp_dirs.db_file("tasks.db"), "20240101").await;
    for (title, day, comment) in [
        ("Dentist", "20240208", ""),
        ("Groceries", "20240209", "eggs, milk"),
        ("Buy milk", "20240208", ""),
    ] {
        let draft = TaskDraft {
            title: title.to_string(),
            date: Some(day.to_string()),
            comment: Some(comment.to_string()),
            repeat: None,
        };
        scheduler.add_task(draft).await.unwrap();
    }

    // Act
    let by_date = scheduler.list_tasks(Some("08.02.2024")).await.unwrap();
    let by_text = scheduler.list_tasks(Some("milk")).await.unwrap();
    let all = scheduler.list_tasks(Some("")).await.unwrap();

    // Assert
    let titles = |tasks: &[cadence_core::Task]| {
        tasks.iter().map(|a| a.title.clone()).collect::<Vec<_>>()
    };
    assert_eq!(titles(&by_date), vec!["Dentist", "Buy milk"]);
    assert_eq!(titles(&by_text), vec!["Buy milk", "Groceries"]);
    assert_eq!(all.len(), 3);
    assert_eq!(scheduler.count_tasks(Some("milk")).await.unwrap(), 2);
}
