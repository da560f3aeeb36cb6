use chrono::NaiveDate;
use log::debug;

use crate::error::EngineError;
use crate::model::{Priority, Registry, TaskId};

// ---------------------------------------------------------------------------
// Hierarchy
// ---------------------------------------------------------------------------

/// Re-parent `child` under `parent`.
///
/// Checks run in order: both ids must resolve, the link must not close a
/// cycle (including `parent == child`), and both tasks must be active. On
/// success the child is detached from any previous parent and appended to the
/// new parent's children, so it becomes the youngest sibling.
pub fn assign_subtask(
    registry: &mut Registry,
    parent: TaskId,
    child: TaskId,
) -> Result<(), EngineError> {
    let parent_task = registry
        .task(parent)
        .ok_or(EngineError::TaskNotFound(parent))?;
    let child_task = registry
        .task(child)
        .ok_or(EngineError::TaskNotFound(child))?;
    if parent == child || registry.is_ancestor(child, parent) {
        return Err(EngineError::CycleDetected { child, parent });
    }
    parent_task.ensure_active()?;
    child_task.ensure_active()?;

    detach_from_parent(registry, child);
    if let Some(task) = registry.task_mut(parent) {
        task.children.push(child);
    }
    if let Some(task) = registry.task_mut(child) {
        task.parent = Some(parent);
    }
    debug!("assigned task {} under task {}", child, parent);
    Ok(())
}

/// Remove `id` from its parent's child order, making it a root. No-op for
/// tasks that already are roots.
fn detach_from_parent(registry: &mut Registry, id: TaskId) {
    let Some(parent) = registry.task(id).and_then(|task| task.parent) else {
        return;
    };
    if let Some(parent_task) = registry.task_mut(parent) {
        parent_task.children.retain(|child| *child != id);
    }
    if let Some(task) = registry.task_mut(id) {
        task.parent = None;
    }
}

// ---------------------------------------------------------------------------
// Done cascade
// ---------------------------------------------------------------------------

/// Flip `done` on a task and push the new value down its live subtree.
///
/// The flip is computed once at the target and then applied absolutely, so
/// descendants end up aligned with the target no matter what state they were
/// in. Deleted branches are left untouched. Returns the number of tasks
/// visited, the target included.
pub fn toggle_done(registry: &mut Registry, id: TaskId) -> Result<usize, EngineError> {
    let task = registry.task(id).ok_or(EngineError::TaskNotFound(id))?;
    task.ensure_active()?;
    let target = !task.done;
    let count = apply_done(registry, id, target);
    debug!("toggled task {} to done={} ({} tasks)", id, target, count);
    Ok(count)
}

fn apply_done(registry: &mut Registry, id: TaskId, target: bool) -> usize {
    let children = match registry.task_mut(id) {
        Some(task) if !task.deleted => {
            task.done = target;
            task.children.clone()
        }
        _ => return 0,
    };
    let mut count = 1;
    for child in children {
        count += apply_done(registry, child, target);
    }
    count
}

// ---------------------------------------------------------------------------
// Delete / restore cascade
// ---------------------------------------------------------------------------

/// Soft-delete a subtree. Returns how many tasks actually changed state;
/// deleting an already-deleted task is a no-op reporting 0.
pub fn delete_task(registry: &mut Registry, id: TaskId) -> Result<usize, EngineError> {
    if registry.task(id).is_none() {
        return Err(EngineError::TaskNotFound(id));
    }
    let count = set_deleted(registry, id, true);
    debug!("deleted task {} ({} tasks changed)", id, count);
    Ok(count)
}

/// Bring a deleted subtree back.
///
/// A restored task cannot hang under a parent that is still deleted, so it is
/// detached and becomes a root. Under an active parent it keeps the link but
/// moves to the end of the sibling order. Either way it moves to the end of
/// every list holding it. Returns how many tasks changed state.
pub fn restore_task(registry: &mut Registry, id: TaskId) -> Result<usize, EngineError> {
    let task = registry.task(id).ok_or(EngineError::TaskNotFound(id))?;
    if !task.deleted {
        return Err(EngineError::AlreadyActive(id));
    }
    let parent = task.parent;
    let count = set_deleted(registry, id, false);

    match parent {
        Some(parent) if registry.task(parent).is_some_and(|task| task.deleted) => {
            detach_from_parent(registry, id);
        }
        Some(parent) => {
            if let Some(parent_task) = registry.task_mut(parent) {
                parent_task.children.retain(|child| *child != id);
                parent_task.children.push(id);
            }
        }
        None => {}
    }
    for list in registry.lists_mut() {
        list.move_to_end(id);
    }
    debug!("restored task {} ({} tasks changed)", id, count);
    Ok(count)
}

/// Drive a subtree toward `deleted == target`, counting only the tasks that
/// actually flip. A branch already in the target state is not entered, which
/// keeps repeated deletes idempotent and keeps a restore from resurrecting
/// more than the matching delete buried.
fn set_deleted(registry: &mut Registry, id: TaskId, target: bool) -> usize {
    let children = match registry.task_mut(id) {
        Some(task) if task.deleted != target => {
            task.deleted = target;
            task.children.clone()
        }
        _ => return 0,
    };
    let mut count = 1;
    for child in children {
        count += set_deleted(registry, child, target);
    }
    count
}

// ---------------------------------------------------------------------------
// Attribute edits
// ---------------------------------------------------------------------------

/// Attach a tag to an active task.
pub fn add_tag(registry: &mut Registry, id: TaskId, tag: &str) -> Result<(), EngineError> {
    let task = registry.task_mut(id).ok_or(EngineError::TaskNotFound(id))?;
    task.ensure_active()?;
    task.add_tag(tag)
}

/// Set or clear the deadline of an active task.
pub fn set_deadline(
    registry: &mut Registry,
    id: TaskId,
    deadline: Option<NaiveDate>,
) -> Result<(), EngineError> {
    let task = registry.task_mut(id).ok_or(EngineError::TaskNotFound(id))?;
    task.ensure_active()?;
    task.deadline = deadline;
    Ok(())
}

/// Set or clear the priority of an active task.
pub fn set_priority(
    registry: &mut Registry,
    id: TaskId,
    priority: Option<Priority>,
) -> Result<(), EngineError> {
    let task = registry.task_mut(id).ok_or(EngineError::TaskNotFound(id))?;
    task.ensure_active()?;
    task.priority = priority;
    Ok(())
}
