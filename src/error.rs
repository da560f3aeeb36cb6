use crate::model::task::TaskId;

/// Error type for engine operations.
///
/// Every failure aborts the single operation that raised it without partial
/// mutation; the registry stays valid and usable afterwards.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("task with ID {0} does not exist")]
    TaskNotFound(TaskId),
    #[error("list {0} does not exist")]
    ListNotFound(String),
    #[error("task with ID {0} is deleted")]
    InactiveTask(TaskId),
    #[error("assigning task {child} under task {parent} would create a cycle")]
    CycleDetected { child: TaskId, parent: TaskId },
    #[error("tag {0} is already present")]
    DuplicateTag(String),
    #[error("list {0} already exists")]
    DuplicateList(String),
    #[error("task with ID {task} is already in list {list}")]
    AlreadyInList { task: TaskId, list: String },
    #[error("task with ID {0} is not deleted")]
    AlreadyActive(TaskId),
}
