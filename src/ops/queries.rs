use chrono::NaiveDate;

use crate::error::EngineError;
use crate::model::{Registry, Task, TaskId};
use crate::ops::search::{self, SearchMode};
use crate::render;

/// Run the visibility pass for `criteria`, then render the surviving forest.
/// `None` means nothing matched.
fn filtered_tree<F>(registry: &Registry, criteria: F, mode: SearchMode) -> Option<Vec<String>>
where
    F: Fn(&Task) -> bool,
{
    let visible = search::visible_set(registry, criteria, mode);
    if visible.is_empty() {
        return None;
    }
    let roots = search::visual_roots(registry, &visible);
    Some(render::render_tree(registry, &roots, |task| {
        visible.contains(&task.id)
    }))
}

/// Every live root with its full live subtree.
pub fn show(registry: &Registry) -> Option<Vec<String>> {
    filtered_tree(registry, |task| task.parent.is_none(), SearchMode::Lax)
}

/// A single task's subtree. Unknown ids are an error; a deleted target is
/// just an empty result.
pub fn show_task(registry: &Registry, id: TaskId) -> Result<Option<Vec<String>>, EngineError> {
    if registry.task(id).is_none() {
        return Err(EngineError::TaskNotFound(id));
    }
    Ok(filtered_tree(registry, |task| task.id == id, SearchMode::Lax))
}

/// Everything still open, plus done ancestors sheltering open work below.
pub fn todo(registry: &Registry) -> Option<Vec<String>> {
    filtered_tree(
        registry,
        |task| !task.done || search::has_active_descendant(registry, task.id),
        SearchMode::Lax,
    )
}

/// Substring search over names. Done branches stay collapsed.
pub fn find(registry: &Registry, needle: &str) -> Option<Vec<String>> {
    filtered_tree(
        registry,
        |task| task.name_contains(needle),
        SearchMode::Strict,
    )
}

/// All tasks carrying `tag`, each with its subtree.
pub fn tagged_with(registry: &Registry, tag: &str) -> Option<Vec<String>> {
    filtered_tree(registry, |task| task.has_tag(tag), SearchMode::Lax)
}

/// Deadline-window queries. Tasks without a deadline never match.
pub fn due_matching<F>(registry: &Registry, matches: F) -> Option<Vec<String>>
where
    F: Fn(NaiveDate) -> bool,
{
    filtered_tree(
        registry,
        |task| task.deadline.is_some_and(|deadline| matches(deadline)),
        SearchMode::Lax,
    )
}

/// Render a list's live members as trees rooted inside the list.
///
/// A member counts as an in-list root when no other live member sits on its
/// ancestor chain; descendants of a member render below it whether or not
/// they are members themselves. `Ok(None)` means the list exists but has
/// nothing to show.
pub fn show_list(registry: &Registry, name: &str) -> Result<Option<Vec<String>>, EngineError> {
    let list = registry
        .list(name)
        .ok_or_else(|| EngineError::ListNotFound(name.to_string()))?;
    let members: Vec<TaskId> = list
        .tasks
        .iter()
        .copied()
        .filter(|&id| registry.task(id).is_some_and(|task| !task.deleted))
        .collect();
    let roots: Vec<TaskId> = members
        .iter()
        .copied()
        .filter(|&id| !has_live_member_ancestor(registry, id, &members))
        .collect();
    if roots.is_empty() {
        return Ok(None);
    }
    Ok(Some(render::render_tree(registry, &roots, |_| true)))
}

fn has_live_member_ancestor(registry: &Registry, id: TaskId, members: &[TaskId]) -> bool {
    let mut current = registry.task(id).and_then(|task| task.parent);
    while let Some(parent) = current {
        if members.contains(&parent) {
            return true;
        }
        current = registry.task(parent).and_then(|task| task.parent);
    }
    false
}
