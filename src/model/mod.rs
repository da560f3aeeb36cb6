pub mod list;
pub mod registry;
pub mod task;

pub use list::TaskList;
pub use registry::Registry;
pub use task::{Priority, Task, TaskId};
