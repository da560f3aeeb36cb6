use std::collections::HashSet;

use crate::model::{Registry, Task, TaskId};

/// How a query turns its direct matches into a visible forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Done branches stay collapsed: a match under a done parent is dropped,
    /// and a match that is itself done does not pull in its subtree.
    Strict,
    /// Every match pulls in its full live subtree regardless of done state.
    Lax,
}

/// Mark-and-expand visibility pass.
///
/// First pass marks direct matches: tasks that are not deleted and satisfy
/// `criteria` (in `Strict` mode a match whose parent is done is discarded).
/// Each surviving match then expands by marking its non-deleted descendants,
/// unless `Strict` mode suppresses expansion of a done match. The result is a
/// membership set; ordering is the renderer's problem.
pub fn visible_set<F>(registry: &Registry, criteria: F, mode: SearchMode) -> HashSet<TaskId>
where
    F: Fn(&Task) -> bool,
{
    let mut visible = HashSet::new();
    for task in registry.tasks() {
        if task.deleted || !criteria(task) {
            continue;
        }
        if mode == SearchMode::Strict && parent_is_done(registry, task) {
            continue;
        }
        visible.insert(task.id);
        let expand = match mode {
            SearchMode::Lax => true,
            SearchMode::Strict => !task.done,
        };
        if expand {
            mark_descendants(registry, task.id, &mut visible);
        }
    }
    visible
}

fn parent_is_done(registry: &Registry, task: &Task) -> bool {
    task.parent
        .and_then(|parent| registry.task(parent))
        .is_some_and(|parent| parent.done)
}

fn mark_descendants(registry: &Registry, id: TaskId, visible: &mut HashSet<TaskId>) {
    let Some(task) = registry.task(id) else {
        return;
    };
    for &child in &task.children {
        if registry.task(child).is_some_and(|task| !task.deleted) {
            visible.insert(child);
            mark_descendants(registry, child, visible);
        }
    }
}

/// The top-level entries of a rendered result: visible tasks with no visible
/// ancestor. Promoting these keeps an expanded subtree under its match while
/// unrelated matches surface side by side.
pub fn visual_roots(registry: &Registry, visible: &HashSet<TaskId>) -> Vec<TaskId> {
    visible
        .iter()
        .copied()
        .filter(|&id| !has_visible_ancestor(registry, id, visible))
        .collect()
}

fn has_visible_ancestor(registry: &Registry, id: TaskId, visible: &HashSet<TaskId>) -> bool {
    let mut current = registry.task(id).and_then(|task| task.parent);
    while let Some(parent) = current {
        if visible.contains(&parent) {
            return true;
        }
        current = registry.task(parent).and_then(|task| task.parent);
    }
    false
}

/// True when some non-deleted descendant of `id` is still open. Used to keep
/// a done parent on the todo view while unfinished work hides below it.
pub fn has_active_descendant(registry: &Registry, id: TaskId) -> bool {
    let Some(task) = registry.task(id) else {
        return false;
    };
    task.children.iter().any(|&child| {
        registry.task(child).is_some_and(|task| {
            !task.deleted && (!task.done || has_active_descendant(registry, child))
        })
    })
}
