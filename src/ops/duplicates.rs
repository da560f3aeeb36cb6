use std::collections::BTreeSet;

use crate::model::{Registry, Task, TaskId};

/// Ids of every task that takes part in at least one near-duplicate pair,
/// in ascending order.
///
/// The scan runs over the whole arena, tombstones included: a deleted task
/// still collides with a freshly added twin, which is exactly the situation
/// the report exists to surface.
pub fn duplicate_ids(registry: &Registry) -> BTreeSet<TaskId> {
    let tasks: Vec<&Task> = registry.tasks().collect();
    let mut ids = BTreeSet::new();
    for (index, task) in tasks.iter().enumerate() {
        for other in &tasks[index + 1..] {
            if is_duplicate(task, other) {
                ids.insert(task.id);
                ids.insert(other.id);
            }
        }
    }
    ids
}

/// Two tasks are near-duplicates when the names are identical and the
/// deadlines do not contradict: a missing deadline matches anything, two
/// present deadlines must be equal.
fn is_duplicate(a: &Task, b: &Task) -> bool {
    if a.name != b.name {
        return false;
    }
    match (a.deadline, b.deadline) {
        (Some(first), Some(second)) => first == second,
        _ => true,
    }
}
