// File: ./src/model/mod.rs
// Aggregates the split model files
pub mod date;
pub mod item;

pub use date::DateValue;
pub use item::{Task, TaskKind};
