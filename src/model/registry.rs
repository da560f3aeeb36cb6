use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::error::EngineError;
use crate::model::list::TaskList;
use crate::model::task::{Priority, Task, TaskId};

/// Owner of the whole task forest and every named list.
///
/// Tasks are stored in an id-keyed arena that only ever grows: deleting a
/// task sets a tombstone flag instead of removing the entry, and ids are
/// never reused. Iteration order is creation order.
#[derive(Debug)]
pub struct Registry {
    tasks: IndexMap<TaskId, Task>,
    lists: IndexMap<String, TaskList>,
    next_id: TaskId,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            tasks: IndexMap::new(),
            lists: IndexMap::new(),
            next_id: 1,
        }
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    /// Create a root task and hand back its id.
    pub fn add_task(
        &mut self,
        name: &str,
        priority: Option<Priority>,
        deadline: Option<NaiveDate>,
    ) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        let mut task = Task::new(id, name.to_string());
        task.priority = priority;
        task.deadline = deadline;
        self.tasks.insert(id, task);
        id
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.get_mut(&id)
    }

    /// All tasks in creation order, tombstones included.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.values()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Walk the parent chain of `id`; true when `ancestor` appears on it.
    /// A task is not its own ancestor.
    pub fn is_ancestor(&self, ancestor: TaskId, id: TaskId) -> bool {
        let mut current = self.task(id).and_then(|task| task.parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.task(parent).and_then(|task| task.parent);
        }
        false
    }

    // -----------------------------------------------------------------------
    // Lists
    // -----------------------------------------------------------------------

    /// Create an empty list under a unique name.
    pub fn create_list(&mut self, name: &str) -> Result<(), EngineError> {
        if self.lists.contains_key(name) {
            return Err(EngineError::DuplicateList(name.to_string()));
        }
        self.lists
            .insert(name.to_string(), TaskList::new(name.to_string()));
        Ok(())
    }

    pub fn list(&self, name: &str) -> Option<&TaskList> {
        self.lists.get(name)
    }

    pub fn list_mut(&mut self, name: &str) -> Option<&mut TaskList> {
        self.lists.get_mut(name)
    }

    pub fn lists_mut(&mut self) -> impl Iterator<Item = &mut TaskList> + '_ {
        self.lists.values_mut()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}
