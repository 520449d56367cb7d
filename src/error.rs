// Error taxonomy shared by the interpreter, the store and the storage layer
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Error: Unknown command")]
    UnknownCommand,

    /// Carries the command-specific message, e.g. "Todo task cannot be empty".
    #[error("Error: {0}")]
    EmptyTask(String),

    #[error("Error: Date format not accepted ({0}). Use YYYY-MM-DD.")]
    InvalidDateFormat(String),

    #[error("Error: There is no task number {index} (the list has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Error: `{0}` is not a task number")]
    InvalidReference(String),

    #[error("No matches found for `{0}`")]
    EmptyResult(String),

    #[error("OOPS, the saved task list is corrupted: {0}")]
    CorruptData(String),

    #[error("Error: Could not save your tasks: {0}")]
    Io(#[from] std::io::Error),
}

pub type TaskResult<T> = std::result::Result<T, TaskError>;
