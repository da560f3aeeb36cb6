use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use crate::error::EngineError;

/// Identifier of a task in the registry arena.
///
/// Ids are assigned monotonically starting at 1 and are never reused, so a
/// deleted task keeps its id for later restoration.
pub type TaskId = u32;

/// Task priority, highest first. Unranked tasks sort after all ranked ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// The token used on the command line and in rendered output.
    pub fn token(self) -> &'static str {
        match self {
            Priority::High => "HI",
            Priority::Medium => "MD",
            Priority::Low => "LO",
        }
    }

    /// Parse a command-line token. Tokens are case-sensitive.
    pub fn from_token(token: &str) -> Option<Priority> {
        match token {
            "HI" => Some(Priority::High),
            "MD" => Some(Priority::Medium),
            "LO" => Some(Priority::Low),
            _ => None,
        }
    }

    /// Sort rank for sibling ordering; lower ranks render first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A node in the task forest.
///
/// Tasks live in the registry's arena and refer to each other by id: `parent`
/// is the owning node (none for roots) and `children` keeps insertion order.
/// Deletion is a tombstone flag, not removal, so ids stay resolvable.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub priority: Option<Priority>,
    pub deadline: Option<NaiveDate>,
    /// Tags in sorted order, as rendered.
    pub tags: BTreeSet<String>,
    pub done: bool,
    pub deleted: bool,
    pub parent: Option<TaskId>,
    pub children: Vec<TaskId>,
}

impl Task {
    pub fn new(id: TaskId, name: String) -> Self {
        Task {
            id,
            name,
            priority: None,
            deadline: None,
            tags: BTreeSet::new(),
            done: false,
            deleted: false,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Substring match on the name, as used by `find`.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.contains(needle)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Attach a tag, rejecting one the task already carries.
    pub fn add_tag(&mut self, tag: &str) -> Result<(), EngineError> {
        if !self.tags.insert(tag.to_string()) {
            return Err(EngineError::DuplicateTag(tag.to_string()));
        }
        Ok(())
    }

    /// Fail with `InactiveTask` when the task is soft-deleted.
    pub fn ensure_active(&self) -> Result<(), EngineError> {
        if self.deleted {
            return Err(EngineError::InactiveTask(self.id));
        }
        Ok(())
    }
}
