use std::io::{self, BufRead, Write};

use chrono::Days;
use log::debug;

use crate::cli::commands::{self, Command};
use crate::cli::output;
use crate::error::EngineError;
use crate::model::{Registry, TaskId};
use crate::ops::{duplicates, queries, task_ops};

// Window width of `upcoming`: the given day plus the following six.
const UPCOMING_DAYS: u64 = 6;

/// Execute one parsed command against the registry.
///
/// On success the returned string is exactly what the shell prints. Errors
/// carry no output; the caller decorates and prints them.
pub fn execute(registry: &mut Registry, command: Command) -> Result<String, EngineError> {
    match command {
        Command::Add {
            name,
            priority,
            deadline,
        } => {
            let id = registry.add_task(&name, priority, deadline);
            Ok(output::added_task(id, &name))
        }
        Command::AddList { name } => {
            registry.create_list(&name)?;
            Ok(output::added_list(&name))
        }
        Command::TagTask { id, tag } => {
            task_ops::add_tag(registry, id, &tag)?;
            Ok(output::tagged(&task_name(registry, id)?, &tag))
        }
        Command::TagList { list, tag } => {
            let entry = registry
                .list_mut(&list)
                .ok_or_else(|| EngineError::ListNotFound(list.clone()))?;
            entry.add_tag(&tag)?;
            Ok(output::tagged(&list, &tag))
        }
        Command::AssignToTask { child, parent } => {
            task_ops::assign_subtask(registry, parent, child)?;
            Ok(output::assigned_to_task(
                &task_name(registry, child)?,
                &task_name(registry, parent)?,
            ))
        }
        Command::AssignToList { id, list } => {
            let name = task_name(registry, id)?;
            let entry = registry
                .list_mut(&list)
                .ok_or_else(|| EngineError::ListNotFound(list.clone()))?;
            entry.add_task(id)?;
            Ok(output::assigned_to_list(&name, &list))
        }
        Command::Toggle { id } => {
            let touched = task_ops::toggle_done(registry, id)?;
            Ok(output::toggled(&task_name(registry, id)?, touched))
        }
        Command::ChangeDate { id, date } => {
            task_ops::set_deadline(registry, id, Some(date))?;
            Ok(output::changed_date(&task_name(registry, id)?, date))
        }
        Command::ChangePriority { id, priority } => {
            task_ops::set_priority(registry, id, priority)?;
            Ok(output::changed_priority(&task_name(registry, id)?, priority))
        }
        Command::Delete { id } => {
            let touched = task_ops::delete_task(registry, id)?;
            Ok(output::deleted(&task_name(registry, id)?, touched))
        }
        Command::Restore { id } => {
            let touched = task_ops::restore_task(registry, id)?;
            Ok(output::restored(&task_name(registry, id)?, touched))
        }
        Command::Show { id: None } => Ok(tree_or_empty(queries::show(registry))),
        Command::Show { id: Some(id) } => Ok(tree_or_empty(queries::show_task(registry, id)?)),
        Command::Todo => Ok(tree_or_empty(queries::todo(registry))),
        Command::Find { text } => Ok(tree_or_empty(queries::find(registry, &text))),
        Command::TaggedWith { tag } => Ok(tree_or_empty(queries::tagged_with(registry, &tag))),
        Command::Upcoming { start } => {
            let end = start
                .checked_add_days(Days::new(UPCOMING_DAYS))
                .unwrap_or(chrono::NaiveDate::MAX);
            Ok(tree_or_empty(queries::due_matching(registry, |due| {
                start <= due && due <= end
            })))
        }
        Command::Before { end } => Ok(tree_or_empty(queries::due_matching(registry, |due| {
            due <= end
        }))),
        Command::Between { start, end } => {
            Ok(tree_or_empty(queries::due_matching(registry, |due| {
                start <= due && due <= end
            })))
        }
        Command::ShowList { name } => match queries::show_list(registry, &name)? {
            Some(lines) => Ok(lines.join("\n")),
            None => Ok(output::empty_list(&name)),
        },
        Command::Duplicates => {
            let ids = duplicates::duplicate_ids(registry);
            if ids.is_empty() {
                Ok(output::NO_DUPLICATES.to_string())
            } else {
                Ok(output::duplicates_found(&ids))
            }
        }
        // The loop intercepts quit; executing it directly is a no-op.
        Command::Quit => Ok(String::new()),
    }
}

fn task_name(registry: &Registry, id: TaskId) -> Result<String, EngineError> {
    registry
        .task(id)
        .map(|task| task.name.clone())
        .ok_or(EngineError::TaskNotFound(id))
}

fn tree_or_empty(lines: Option<Vec<String>>) -> String {
    match lines {
        Some(lines) => lines.join("\n"),
        None => output::NO_MATCHES.to_string(),
    }
}

/// Drive the shell over a line source: parse, execute, print, repeat.
///
/// Failed lines print an `Error, `-prefixed message and the loop carries on
/// with the registry unchanged. `quit` or end of input stops it; nothing is
/// printed for quit itself.
pub fn run<R, W>(registry: &mut Registry, input: R, mut out: W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match commands::parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                debug!("dispatching {:?}", command);
                match execute(registry, command) {
                    Ok(message) => writeln!(out, "{}", message)?,
                    Err(error) => writeln!(out, "{}{}", output::ERROR_PREFIX, error)?,
                }
            }
            Err(error) => writeln!(out, "{}{}", output::ERROR_PREFIX, error)?,
        }
    }
    Ok(())
}
