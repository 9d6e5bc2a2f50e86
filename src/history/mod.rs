//! Undo/redo history.

pub mod manager;

pub use manager::{HistoryManager, Snapshot};
