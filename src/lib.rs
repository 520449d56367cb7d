pub mod cli;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod session;
pub mod storage;
pub mod store;

pub use error::{TaskError, TaskResult};
