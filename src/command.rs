//! Turns one line of user text into a validated [`Operation`].
//!
//! Keywords are matched case-insensitively anywhere in the line, in a fixed
//! priority order. The first keyword (in that order) that occurs wins, so
//! `"done with todo 2"` is a `done` command. Everything after the keyword's
//! first occurrence is the argument.

use crate::error::{TaskError, TaskResult};
use crate::model::Task;
use std::fmt;

/// Priority order used when a line contains more than one keyword.
pub const KEYWORDS: [Keyword; 7] = [
    Keyword::List,
    Keyword::Done,
    Keyword::Todo,
    Keyword::Event,
    Keyword::Deadline,
    Keyword::Delete,
    Keyword::Find,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    List,
    Done,
    Todo,
    Event,
    Deadline,
    Delete,
    Find,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::List => "list",
            Keyword::Done => "done",
            Keyword::Todo => "todo",
            Keyword::Event => "event",
            Keyword::Deadline => "deadline",
            Keyword::Delete => "delete",
            Keyword::Find => "find",
        }
    }
}

/// Raw trailing text of a `done`/`delete` command, resolved to a position later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference(String);

impl Reference {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves the token to a single 1-based position.
    ///
    /// A number too large for `usize` saturates, so the store reports it as
    /// out of range like any other position past the end.
    pub fn index(&self) -> TaskResult<usize> {
        let token = self.0.trim();
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TaskError::InvalidReference(self.0.clone()));
        }
        Ok(token.parse::<usize>().unwrap_or(usize::MAX))
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    List,
    Add(Task),
    Complete(Reference),
    Delete(Reference),
    Find(String),
}

pub fn interpret(line: &str) -> TaskResult<Operation> {
    let lowered = line.to_ascii_lowercase();
    let (keyword, start) = KEYWORDS
        .iter()
        .find_map(|k| lowered.find(k.as_str()).map(|pos| (*k, pos)))
        .ok_or(TaskError::UnknownCommand)?;
    // ASCII lowercasing keeps byte offsets aligned with the original line.
    let rest = line[start + keyword.as_str().len()..].trim();

    match keyword {
        Keyword::List => Ok(Operation::List),
        Keyword::Todo => {
            require(rest, "Todo task cannot be empty")?;
            Ok(Operation::Add(Task::todo(rest)?))
        }
        Keyword::Deadline => {
            require(rest, "Deadline tasks cannot be empty")?;
            let (description, by) = split_dated(rest, "/by")?;
            Ok(Operation::Add(Task::deadline(description, by)?))
        }
        Keyword::Event => {
            require(rest, "Event task cannot be empty")?;
            let (description, at) = split_dated(rest, "/at")?;
            Ok(Operation::Add(Task::event(description, at)?))
        }
        Keyword::Done => {
            require(rest, "Done task cannot be empty")?;
            Ok(Operation::Complete(Reference(rest.to_string())))
        }
        Keyword::Delete => {
            require(rest, "Task to be deleted cannot be empty")?;
            Ok(Operation::Delete(Reference(rest.to_string())))
        }
        Keyword::Find => {
            require(rest, "Empty field for find: keyword")?;
            Ok(Operation::Find(rest.to_string()))
        }
    }
}

/// Free-form sentence parsing ("I have a meeting on Monday") is not supported.
pub fn parse_natural_language(_line: &str) -> Option<Operation> {
    None
}

fn require(rest: &str, message: &str) -> TaskResult<()> {
    if rest.is_empty() {
        return Err(TaskError::EmptyTask(message.to_string()));
    }
    Ok(())
}

/// Description is the text before the first separator, the date the segment
/// after it up to any further separator.
fn split_dated<'a>(rest: &'a str, separator: &str) -> TaskResult<(&'a str, &'a str)> {
    let mut parts = rest.split(separator);
    let description = parts.next().unwrap_or_default();
    let date = parts
        .next()
        .ok_or_else(|| TaskError::InvalidDateFormat(format!("missing {separator} <date>")))?;
    Ok((description.trim(), date.trim()))
}
