use std::collections::BTreeSet;

use crate::error::EngineError;
use crate::model::task::TaskId;

/// A named, ordered collection of task references.
///
/// Lists index tasks, they never own them: membership survives deletion of
/// the task, so restoring the task surfaces it in the list again.
#[derive(Debug, Clone)]
pub struct TaskList {
    pub name: String,
    /// Member ids in assignment order; restores move a member to the end.
    pub tasks: Vec<TaskId>,
    pub tags: BTreeSet<String>,
}

impl TaskList {
    pub fn new(name: String) -> Self {
        TaskList {
            name,
            tasks: Vec::new(),
            tags: BTreeSet::new(),
        }
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.contains(&id)
    }

    /// Append a task reference, rejecting ids already present.
    pub fn add_task(&mut self, id: TaskId) -> Result<(), EngineError> {
        if self.contains(id) {
            return Err(EngineError::AlreadyInList {
                task: id,
                list: self.name.clone(),
            });
        }
        self.tasks.push(id);
        Ok(())
    }

    /// Attach a tag, rejecting one the list already carries.
    pub fn add_tag(&mut self, tag: &str) -> Result<(), EngineError> {
        if !self.tags.insert(tag.to_string()) {
            return Err(EngineError::DuplicateTag(tag.to_string()));
        }
        Ok(())
    }

    /// Move a member to the end of the assignment order. No-op for ids the
    /// list does not hold.
    pub fn move_to_end(&mut self, id: TaskId) {
        if let Some(pos) = self.tasks.iter().position(|member| *member == id) {
            self.tasks.remove(pos);
            self.tasks.push(id);
        }
    }
}
