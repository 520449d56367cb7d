//! Conversation layer sitting between a text front end and the dispatcher.
//!
//! Owns the whole runtime context for one run: the dispatcher, which owns the
//! store, which owns the storage handle. Nothing here is global.

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::TaskError;
use crate::store::TaskStore;

/// Whole-input, case-sensitive words that end the session.
pub const EXIT_KEYWORDS: [&str; 7] = ["end", "ciao", "bye", "close", "exit", "nights", "shutdown"];

const DEFAULT_GREETING: &str = "Hello, I'm Taskmate\nWhat can I do for you?";
const FAREWELL: &str = "See yall around!!!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Set when the front end should stop reading input.
    pub exit: bool,
}

impl Reply {
    fn say(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            exit: false,
        }
    }
}

pub struct Session {
    dispatcher: Dispatcher,
    greeting: String,
    startup_notice: Option<String>,
}

impl Session {
    pub fn open(config: &Config) -> Self {
        let (store, notice) = TaskStore::open(config.storage());
        let startup_notice = notice.map(|e| {
            if matches!(e, TaskError::CorruptData(_)) {
                format!("{e}\nInitialising a new list for you...")
            } else {
                format!("{e}\nChanges will not be saved until this is fixed.")
            }
        });
        Self {
            dispatcher: Dispatcher::new(store),
            greeting: config
                .greeting
                .clone()
                .unwrap_or_else(|| DEFAULT_GREETING.to_string()),
            startup_notice,
        }
    }

    /// Set when the saved list was reset or the task file could not be created.
    pub fn startup_notice(&self) -> Option<&str> {
        self.startup_notice.as_deref()
    }

    pub fn greeting(&self) -> String {
        let store = self.dispatcher.store();
        let summary = match store.len() {
            0 => "Your list is empty.".to_string(),
            n => format!(
                "You have {} task{} ({} done, {} to go).",
                n,
                if n == 1 { "" } else { "s" },
                store.count_completed(),
                store.count_incomplete()
            ),
        };
        format!("{}\n{}", self.greeting, summary)
    }

    pub fn respond(&mut self, line: &str) -> Reply {
        let trimmed = line.trim();
        if is_exit(trimmed) {
            return Reply {
                text: FAREWELL.to_string(),
                exit: true,
            };
        }
        if trimmed == "hi" {
            return Reply::say(self.greeting());
        }
        Reply::say(self.dispatcher.dispatch(trimmed))
    }
}

pub fn is_exit(input: &str) -> bool {
    EXIT_KEYWORDS.iter().any(|k| *k == input)
}
