//! Background work for the GUI.

pub mod background_task;

// Re-export commonly used types
pub use background_task::{BackgroundTask, TaskEvent, TaskOptions};
