// Task data model and its one-line rendering
use crate::error::{TaskError, TaskResult};
use crate::model::date::DateValue;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskKind {
    Todo,
    Deadline { by: DateValue },
    Event { at: DateValue },
}

impl TaskKind {
    pub fn marker(&self) -> char {
        match self {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }

    pub fn date(&self) -> Option<&DateValue> {
        match self {
            TaskKind::Todo => None,
            TaskKind::Deadline { by } => Some(by),
            TaskKind::Event { at } => Some(at),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TaskKind::Todo => "Todo task",
            TaskKind::Deadline { .. } => "Deadline task",
            TaskKind::Event { .. } => "Event task",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    pub kind: TaskKind,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn todo(description: &str) -> TaskResult<Self> {
        Self::with_kind(description, TaskKind::Todo)
    }

    pub fn deadline(description: &str, by: &str) -> TaskResult<Self> {
        let by = DateValue::parse(by)?;
        Self::with_kind(description, TaskKind::Deadline { by })
    }

    pub fn event(description: &str, at: &str) -> TaskResult<Self> {
        let at = DateValue::parse(at)?;
        Self::with_kind(description, TaskKind::Event { at })
    }

    fn with_kind(description: &str, kind: TaskKind) -> TaskResult<Self> {
        let task = Self {
            description: description.trim().to_string(),
            kind,
            completed: false,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks the invariants serde cannot express (records read back from disk).
    pub fn validate(&self) -> TaskResult<()> {
        if self.description.trim().is_empty() {
            return Err(TaskError::EmptyTask(format!(
                "{} cannot be empty",
                self.kind.label()
            )));
        }
        Ok(())
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
    }

    pub fn date(&self) -> Option<&DateValue> {
        self.kind.date()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.completed { 'X' } else { ' ' };
        write!(f, "[{}][{}] {}", self.kind.marker(), check, self.description)?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {})", by),
            TaskKind::Event { at } => write!(f, " (at: {})", at),
        }
    }
}
