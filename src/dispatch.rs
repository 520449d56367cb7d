// Routes interpreted operations to the task store
use crate::command::{self, Operation};
use crate::error::TaskResult;
use crate::store::TaskStore;
use tracing::debug;

pub struct Dispatcher {
    store: TaskStore,
}

impl Dispatcher {
    pub fn new(store: TaskStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Interprets and runs one line. Errors come back as their message text.
    pub fn dispatch(&mut self, line: &str) -> String {
        match command::interpret(line).and_then(|op| self.execute(op)) {
            Ok(reply) => reply,
            Err(e) => {
                debug!(error = %e, "command rejected");
                e.to_string()
            }
        }
    }

    pub fn execute(&mut self, op: Operation) -> TaskResult<String> {
        debug!(?op, "dispatching");
        match op {
            Operation::List => Ok(self.store.list()),
            Operation::Add(task) => self.store.add(task),
            Operation::Complete(reference) => {
                let index = reference.index()?;
                self.store.complete(&[index])
            }
            Operation::Delete(reference) => {
                let index = reference.index()?;
                self.store.delete(index)
            }
            Operation::Find(keyword) => self.store.find(&keyword),
        }
    }
}
