pub mod duplicates;
pub mod queries;
pub mod search;
pub mod task_ops;
