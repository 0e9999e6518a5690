//! Messages the board broadcasts to its tasks

/// Process-unique handle of a task.
pub type TaskId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Select `task`, deselect everyone else. `None` clears.
    Select { task: Option<TaskId> },
    Deselect,
    DoubleClick,
    TaskOpen,
    TaskClose { task: TaskId },
    Dropped { task: TaskId },
    SelectionRectangle,
}
