// SPDX-FileCopyrightText: 2025-2026 Cadence Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use cadence_core::{Completion, Scheduler, Task, TaskDraft, TaskPatch};
use clap::{Arg, ArgMatches, Command, arg, value_parser};
use colored::Colorize;

use crate::task_formatter::TaskFormatter;
use crate::util::ArgOutputFormat;

#[derive(Debug, Clone)]
pub struct CmdTaskList {
    pub search: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdTaskList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List tasks, ordered by date")
            .arg(arg!(-s --search <TEXT> "Search by DD.MM.YYYY day, or by title and comment"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            search: matches.get_one::<String>("search").cloned(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub fn new() -> Self {
        Self {
            search: None,
            output_format: ArgOutputFormat::Table,
        }
    }

    pub async fn run(self, scheduler: &mut Scheduler) -> Result<(), Box<dyn Error>> {
        tracing::debug!(search = ?self.search, "listing tasks...");
        let search = self.search.as_deref();
        let tasks = scheduler.list_tasks(search).await?;

        if self.output_format == ArgOutputFormat::Table {
            if tasks.is_empty() {
                println!("{}", "No tasks found".italic());
                return Ok(());
            }

            let total = scheduler.count_tasks(search).await?;
            if total > tasks.len() as i64 {
                println!("Displaying the {}/{total} tasks", tasks.len());
            }
        }

        print_tasks(scheduler, &tasks, self.output_format);
        Ok(())
    }
}

impl Default for CmdTaskList {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct CmdTaskAdd {
    pub title: String,
    pub date: Option<String>,
    pub comment: Option<String>,
    pub repeat: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdTaskAdd {
    pub const NAME: &str = "add";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("new")
            .about("Add a new task")
            .arg(arg!(title: <TITLE> "Title of the task"))
            .arg(arg_date())
            .arg(arg_comment())
            .arg(arg_repeat())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            title: get_string(matches, "title").unwrap_or_default(),
            date: get_string(matches, "date"),
            comment: get_string(matches, "comment"),
            repeat: get_string(matches, "repeat"),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, scheduler: &mut Scheduler) -> Result<(), Box<dyn Error>> {
        tracing::debug!(title = %self.title, "adding new task...");
        let draft = TaskDraft {
            title: self.title,
            date: self.date,
            comment: self.comment,
            repeat: self.repeat,
        };
        let id = scheduler.add_task(draft).await?;
        let task = scheduler.get_task(id).await?;
        print_tasks(scheduler, &[task], self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTaskShow {
    pub id: i64,
    pub output_format: ArgOutputFormat,
}

impl CmdTaskShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show a task")
            .arg(arg_id())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, scheduler: &mut Scheduler) -> Result<(), Box<dyn Error>> {
        tracing::debug!(id = self.id, "showing task...");
        let task = scheduler.get_task(self.id).await?;
        print_tasks(scheduler, &[task], self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTaskEdit {
    pub id: i64,
    pub title: Option<String>,
    pub date: Option<String>,
    pub comment: Option<String>,
    pub repeat: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdTaskEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit a task, an empty comment or repeat rule clears it")
            .arg(arg_id())
            .arg(arg!(-t --title <TITLE> "Title of the task"))
            .arg(arg_date())
            .arg(arg_comment())
            .arg(arg_repeat())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: get_id(matches),
            title: get_string(matches, "title"),
            date: get_string(matches, "date"),
            comment: get_string(matches, "comment"),
            repeat: get_string(matches, "repeat"),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, scheduler: &mut Scheduler) -> Result<(), Box<dyn Error>> {
        let patch = TaskPatch {
            title: self.title,
            date: self.date,
            comment: self.comment,
            repeat: self.repeat,
        };
        if patch.is_empty() {
            return Err("Nothing to edit, specify at least one field".into());
        }

        tracing::debug!(id = self.id, "editing task...");
        let task = scheduler.edit_task(self.id, patch).await?;
        print_tasks(scheduler, &[task], self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTaskDone {
    pub ids: Vec<i64>,
    pub output_format: ArgOutputFormat,
}

impl CmdTaskDone {
    pub const NAME: &str = "done";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Mark tasks as done, repeating tasks move to their next date")
            .arg(arg_ids())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: get_ids(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, scheduler: &mut Scheduler) -> Result<(), Box<dyn Error>> {
        let mut rescheduled = Vec::new();
        let result = self.complete(scheduler, &mut rescheduled).await;

        // tasks rescheduled before a failure are already saved
        let empty_json = result.is_ok() && self.output_format == ArgOutputFormat::Json;
        if !rescheduled.is_empty() || empty_json {
            print_tasks(scheduler, &rescheduled, self.output_format);
        }
        result
    }

    async fn complete(
        &self,
        scheduler: &Scheduler,
        rescheduled: &mut Vec<Task>,
    ) -> Result<(), Box<dyn Error>> {
        for &id in &self.ids {
            tracing::debug!(id, "marking task as done");
            match scheduler.done_task(id).await? {
                Completion::Rescheduled(task) => rescheduled.push(task),
                Completion::Deleted(task) => {
                    if self.output_format == ArgOutputFormat::Table {
                        println!("{} #{} {}", "Done:".green(), task.id, task.title);
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTaskDelete {
    pub ids: Vec<i64>,
}

impl CmdTaskDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete tasks")
            .arg(arg_ids())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: get_ids(matches),
        }
    }

    pub async fn run(self, scheduler: &mut Scheduler) -> Result<(), Box<dyn Error>> {
        for id in self.ids {
            tracing::debug!(id, "deleting task");
            scheduler.delete_task(id).await?;
            println!("{} #{id}", "Deleted:".yellow());
        }
        Ok(())
    }
}

fn print_tasks(scheduler: &Scheduler, tasks: &[Task], output_format: ArgOutputFormat) {
    let formatter = TaskFormatter::new(scheduler.today()).with_output_format(output_format);
    println!("{}", formatter.format(tasks));
}

fn arg_id() -> Arg {
    arg!(id: <ID> "The id of the task").value_parser(value_parser!(i64))
}

fn get_id(matches: &ArgMatches) -> i64 {
    matches.get_one::<i64>("id").copied().unwrap_or_default()
}

fn arg_ids() -> Arg {
    arg!(id: <ID> "The ids of the tasks")
        .value_parser(value_parser!(i64))
        .num_args(1..)
}

fn get_ids(matches: &ArgMatches) -> Vec<i64> {
    matches
        .get_many::<i64>("id")
        .map(|ids| ids.copied().collect())
        .unwrap_or_default()
}

fn arg_date() -> Arg {
    arg!(-d --date <DATE> "Due date of the task as YYYYMMDD, defaults to today")
}

fn arg_comment() -> Arg {
    arg!(-m --comment <COMMENT> "Comment of the task")
}

fn arg_repeat() -> Arg {
    arg!(-r --repeat <RULE> "Repeat rule: \"d N\" (1-400 days), \"y\" or \"w 1,..,7\"")
}

fn get_string(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}
