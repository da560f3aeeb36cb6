//! User-facing message catalog.
//!
//! The engine returns typed results; every string the shell prints is
//! assembled here so wording and casing live in one place. Cascade messages
//! speak in subtasks, so the count shown is one less than the number of
//! tasks the operation touched.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::model::{Priority, TaskId};

pub const ERROR_PREFIX: &str = "Error, ";
pub const NO_MATCHES: &str = "No tasks found.";
pub const NO_DUPLICATES: &str = "Found no duplicates.";

pub fn added_task(id: TaskId, name: &str) -> String {
    format!("added {}: {}", id, name)
}

pub fn added_list(name: &str) -> String {
    format!("added list {}", name)
}

pub fn tagged(name: &str, tag: &str) -> String {
    format!("tagged {} with {}", name, tag)
}

pub fn assigned_to_task(child: &str, parent: &str) -> String {
    format!("assigned {} to {}", child, parent)
}

pub fn assigned_to_list(task: &str, list: &str) -> String {
    format!("assigned {} to list {}", task, list)
}

pub fn toggled(name: &str, touched: usize) -> String {
    format!("toggled {} and {} subtasks", name, subtask_count(touched))
}

pub fn deleted(name: &str, touched: usize) -> String {
    format!("deleted {} and {} subtasks", name, subtask_count(touched))
}

pub fn restored(name: &str, touched: usize) -> String {
    format!("restored {} and {} subtasks", name, subtask_count(touched))
}

pub fn changed_date(name: &str, date: NaiveDate) -> String {
    format!("changed {} to {}", name, date)
}

pub fn changed_priority(name: &str, priority: Option<Priority>) -> String {
    match priority {
        Some(priority) => format!("changed {} to {}", name, priority),
        None => format!("removed priority from {}", name),
    }
}

pub fn duplicates_found(ids: &BTreeSet<TaskId>) -> String {
    let joined = ids
        .iter()
        .map(TaskId::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("Found {} duplicates: {}", ids.len(), joined)
}

pub fn empty_list(name: &str) -> String {
    format!("List {} is empty.", name)
}

fn subtask_count(touched: usize) -> usize {
    touched.saturating_sub(1)
}
