//! Indented checkbox rendering of task forests.
//!
//! Every query ends here: a set of visual roots plus a membership test goes
//! in, lines like `  - [ ] Draft [HI]: (uni) --> 2024-05-01` come out.

use crate::model::{Priority, Registry, Task, TaskId};

const INDENT: &str = "  ";
const CHECKBOX_DONE: &str = "- [x] ";
const CHECKBOX_OPEN: &str = "- [ ] ";
const DEADLINE_ARROW: &str = " --> ";

/// Render the forest rooted at `roots`, recursing only into children that
/// are live and pass `include`. Siblings (and the roots themselves) are
/// ordered by priority rank, ties broken by id.
pub fn render_tree<F>(registry: &Registry, roots: &[TaskId], include: F) -> Vec<String>
where
    F: Fn(&Task) -> bool,
{
    let mut ordered = roots.to_vec();
    sort_siblings(registry, &mut ordered);
    let mut lines = Vec::new();
    for id in ordered {
        append_subtree(registry, id, 0, &include, &mut lines);
    }
    lines
}

fn append_subtree<F>(
    registry: &Registry,
    id: TaskId,
    depth: usize,
    include: &F,
    lines: &mut Vec<String>,
) where
    F: Fn(&Task) -> bool,
{
    let Some(task) = registry.task(id) else {
        return;
    };
    lines.push(format_task_line(task, depth));
    let mut children = task.children.clone();
    sort_siblings(registry, &mut children);
    for child in children {
        if registry
            .task(child)
            .is_some_and(|task| !task.deleted && include(task))
        {
            append_subtree(registry, child, depth + 1, include, lines);
        }
    }
}

/// Priority rank first (unranked last), then id. The key is total, so equal
/// trees always render identically.
fn sort_siblings(registry: &Registry, ids: &mut [TaskId]) {
    ids.sort_by_key(|&id| {
        let rank = registry
            .task(id)
            .and_then(|task| task.priority)
            .map_or(3, Priority::rank);
        (rank, id)
    });
}

/// One rendered line: indentation, checkbox, name, then the optional
/// `[priority]`, `(tags)` and `--> deadline` suffixes. The `:` separator
/// appears exactly when tags or a deadline follow.
pub fn format_task_line(task: &Task, depth: usize) -> String {
    let mut line = INDENT.repeat(depth);
    line.push_str(if task.done { CHECKBOX_DONE } else { CHECKBOX_OPEN });
    line.push_str(&task.name);
    if let Some(priority) = task.priority {
        line.push_str(&format!(" [{}]", priority));
    }
    if !task.tags.is_empty() || task.deadline.is_some() {
        line.push(':');
    }
    if !task.tags.is_empty() {
        let tags: Vec<&str> = task.tags.iter().map(String::as_str).collect();
        line.push_str(&format!(" ({})", tags.join(", ")));
    }
    if let Some(deadline) = task.deadline {
        line.push_str(DEADLINE_ARROW);
        line.push_str(&deadline.to_string());
    }
    line
}
