// SPDX-FileCopyrightText: 2025-2026 Cadence Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Workflows driven by the configuration: state directory creation, database
//! location and listing limits.

use cadence_core::{Config, Scheduler};

use crate::common::{setup_temp_dirs, test_config, test_task_draft};

#[tokio::test]
async fn config_driven_creates_database_in_state_dir() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let state_dir = temp_dirs.state_dir.join("nested");
    let config = test_config(&state_dir);

    // Act
    let scheduler = Scheduler::new(config.clone()).await.unwrap();
    let id = scheduler
        .add_task(test_task_draft("Persisted"))
        .await
        .unwrap();
    scheduler.close().await.unwrap();

    // Assert
    assert!(state_dir.join("scheduler.db").exists());
    let reopened = Scheduler::new(config).await.unwrap();
    let task = reopened.get_task(id).await.unwrap();
    assert_eq!(task.title, "Persisted");
    assert_eq!(task.date, reopened.today());
}

#[tokio::test]
async fn config_driven_list_limit() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = Config {
        list_limit: 3,
        ..test_config(&temp_dirs.state_dir)
    };
    let scheduler = Scheduler::new(config).await.unwrap();
    for i in 0..5 {
        let title = format!("Task {i}");
        scheduler.add_task(test_task_draft(&title)).await.unwrap();
    }

    // Act
    let tasks = scheduler.list_tasks(None).await.unwrap();

    // Assert
    assert_eq!(tasks.len(), 3);
    assert_eq!(scheduler.count_tasks(None).await.unwrap(), 5);
}

#[tokio::test]
async fn config_driven_rejects_invalid_limit() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = Config {
        list_limit: -1,
        ..test_config(&temp_dirs.state_dir)
    };
    assert!(Scheduler::new(config).await.is_err());
}
