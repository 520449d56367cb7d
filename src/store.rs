// In-memory task list with write-through persistence
use crate::error::{TaskError, TaskResult};
use crate::model::Task;
use crate::storage::Storage;
use tracing::{info, warn};

pub const EMPTY_LIST_MESSAGE: &str = "There's nothing here!\nTry adding something to your list?";
pub const LIST_FOOTER: &str = "So stop procrastinating!";

pub struct TaskStore {
    tasks: Vec<Task>,
    storage: Storage,
}

impl TaskStore {
    /// Loads the snapshot behind `storage`, creating it when missing.
    ///
    /// A corrupt snapshot is discarded and replaced by an empty one; the
    /// returned error describes what was lost so the caller can report it.
    pub fn open(storage: Storage) -> (Self, Option<TaskError>) {
        if !storage.exists() {
            let notice = storage.initialize_empty().err();
            if let Some(e) = &notice {
                warn!(path = %storage.path().display(), error = %e, "could not create task file");
            }
            return (Self::with_tasks(storage, vec![]), notice);
        }

        match storage.load_all() {
            Ok(tasks) => {
                info!(path = %storage.path().display(), count = tasks.len(), "task list loaded");
                (Self::with_tasks(storage, tasks), None)
            }
            Err(e) => {
                warn!(path = %storage.path().display(), error = %e, "discarding corrupt task list");
                if let Err(save_err) = storage.save_all(&[]) {
                    warn!(error = %save_err, "could not reset corrupt task file");
                }
                (Self::with_tasks(storage, vec![]), Some(e))
            }
        }
    }

    pub fn with_tasks(storage: Storage, tasks: Vec<Task>) -> Self {
        Self { tasks, storage }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn add(&mut self, task: Task) -> TaskResult<String> {
        let rendered = task.render();
        self.tasks.push(task);
        self.persist()?;
        Ok(rendered)
    }

    /// Marks each 1-based index in the given order.
    ///
    /// Stops at the first index out of range; tasks marked before it stay
    /// completed and are saved.
    pub fn complete(&mut self, indices: &[usize]) -> TaskResult<String> {
        let mut lines = Vec::with_capacity(indices.len());
        let mut failure = None;
        for &index in indices {
            match self.position(index) {
                Ok(pos) => {
                    let task = &mut self.tasks[pos];
                    task.mark_completed();
                    lines.push(task.render());
                }
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        if let Some(e) = failure {
            if !lines.is_empty()
                && let Err(save_err) = self.persist()
            {
                warn!(error = %save_err, "could not save partially completed batch");
            }
            return Err(e);
        }
        self.persist()?;
        Ok(lines.join("\n"))
    }

    pub fn delete(&mut self, index: usize) -> TaskResult<String> {
        let pos = self.position(index)?;
        let removed = self.tasks.remove(pos);
        self.persist()?;
        Ok(removed.render())
    }

    /// Case-sensitive substring search over the rendered tasks, numbered by match.
    pub fn find(&self, keyword: &str) -> TaskResult<String> {
        let lines: Vec<String> = self
            .tasks
            .iter()
            .map(Task::render)
            .filter(|rendered| rendered.contains(keyword))
            .enumerate()
            .map(|(i, rendered)| format!("{}. {}", i + 1, rendered))
            .collect();
        if lines.is_empty() {
            return Err(TaskError::EmptyResult(keyword.to_string()));
        }
        Ok(lines.join("\n"))
    }

    pub fn list(&self) -> String {
        if self.tasks.is_empty() {
            return EMPTY_LIST_MESSAGE.to_string();
        }
        let mut out: Vec<String> = self
            .tasks
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{}. {}", i + 1, t))
            .collect();
        out.push(LIST_FOOTER.to_string());
        out.join("\n")
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn count_completed(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn count_incomplete(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    fn position(&self, index: usize) -> TaskResult<usize> {
        if index == 0 || index > self.tasks.len() {
            return Err(TaskError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(index - 1)
    }

    fn persist(&self) -> TaskResult<()> {
        self.storage.save_all(&self.tasks).inspect_err(|e| {
            warn!(path = %self.storage.path().display(), error = %e, "save failed");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> TaskStore {
        let (store, notice) = TaskStore::open(Storage::new(dir.path().join("tasks.json")));
        assert!(notice.is_none());
        store
    }

    #[test]
    fn empty_list_invites_adding() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let out = s.list();
        assert!(out.contains("nothing"));
        assert!(out.contains("adding"));
    }

    #[test]
    fn add_appends_and_lists_in_order() {
        let dir = TempDir::new().unwrap();
        let mut s = store(&dir);
        let reply = s.add(Task::todo("buy milk").unwrap()).unwrap();
        assert!(reply.contains("buy milk"));
        s.add(Task::deadline("submit report", "2024-12-01").unwrap())
            .unwrap();

        let out = s.list();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "1. [T][ ] buy milk");
        assert!(lines[1].starts_with("2. [D][ ] submit report"));
        assert_eq!(lines[2], LIST_FOOTER);
    }

    #[test]
    fn complete_is_idempotent_and_counts() {
        let dir = TempDir::new().unwrap();
        let mut s = store(&dir);
        s.add(Task::todo("a").unwrap()).unwrap();
        s.add(Task::todo("b").unwrap()).unwrap();

        s.complete(&[1]).unwrap();
        let again = s.complete(&[1]).unwrap();
        assert_eq!(again, "[T][X] a");
        assert_eq!(s.count_completed(), 1);
        assert_eq!(s.count_incomplete(), 1);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn complete_batch_keeps_caller_order() {
        let dir = TempDir::new().unwrap();
        let mut s = store(&dir);
        for d in ["a", "b", "c"] {
            s.add(Task::todo(d).unwrap()).unwrap();
        }
        let reply = s.complete(&[3, 1]).unwrap();
        assert_eq!(reply, "[T][X] c\n[T][X] a");
    }

    #[test]
    fn complete_stops_at_first_bad_index_without_rollback() {
        let dir = TempDir::new().unwrap();
        let mut s = store(&dir);
        s.add(Task::todo("a").unwrap()).unwrap();
        s.add(Task::todo("b").unwrap()).unwrap();

        let err = s.complete(&[1, 5, 2]).unwrap_err();
        assert!(matches!(err, TaskError::IndexOutOfRange { index: 5, len: 2 }));
        assert!(s.tasks()[0].completed);
        assert!(!s.tasks()[1].completed);

        let reloaded = store(&dir);
        assert!(reloaded.tasks()[0].completed);
        assert!(!reloaded.tasks()[1].completed);
    }

    #[test]
    fn delete_renumbers() {
        let dir = TempDir::new().unwrap();
        let mut s = store(&dir);
        for d in ["a", "b", "c"] {
            s.add(Task::todo(d).unwrap()).unwrap();
        }
        assert_eq!(s.delete(2).unwrap(), "[T][ ] b");
        let out = s.list();
        assert!(out.contains("1. [T][ ] a"));
        assert!(out.contains("2. [T][ ] c"));
        assert!(matches!(
            s.delete(0),
            Err(TaskError::IndexOutOfRange { index: 0, .. })
        ));
        assert!(matches!(s.delete(3), Err(TaskError::IndexOutOfRange { .. })));
    }

    #[test]
    fn find_numbers_matches_and_guards_empty_result() {
        let dir = TempDir::new().unwrap();
        let mut s = store(&dir);
        s.add(Task::todo("read book").unwrap()).unwrap();
        s.add(Task::todo("buy milk").unwrap()).unwrap();
        s.add(Task::todo("return book").unwrap()).unwrap();

        assert_eq!(
            s.find("book").unwrap(),
            "1. [T][ ] read book\n2. [T][ ] return book"
        );
        // Case-sensitive
        assert!(matches!(s.find("Book"), Err(TaskError::EmptyResult(_))));
        assert!(matches!(s.find("nonexistent"), Err(TaskError::EmptyResult(_))));
    }

    #[test]
    fn failed_save_is_reported_without_rollback() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "a file where the data dir should be").unwrap();

        let (mut s, notice) = TaskStore::open(Storage::new(blocker.join("tasks.json")));
        assert!(matches!(notice, Some(TaskError::Io(_))));

        let err = s.add(Task::todo("a").unwrap()).unwrap_err();
        assert!(matches!(err, TaskError::Io(_)));
        assert!(err.to_string().starts_with("Error: Could not save your tasks"));
        assert_eq!(s.len(), 1);
        assert_eq!(s.tasks()[0].description, "a");

        assert!(matches!(s.complete(&[1]), Err(TaskError::Io(_))));
        assert!(s.tasks()[0].completed);
    }

    #[test]
    fn corrupt_file_starts_empty_and_reports() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "{{{{").unwrap();

        let (s, notice) = TaskStore::open(Storage::new(&path));
        assert!(s.is_empty());
        assert!(matches!(notice, Some(TaskError::CorruptData(_))));
        // The unreadable contents were replaced by an empty snapshot.
        assert!(Storage::new(&path).load_all().unwrap().is_empty());
    }
}
