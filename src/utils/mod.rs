//! Utility modules for the GUI.

pub mod formatting;

pub use formatting::{format_memory_mb, get_current_memory_mb};
