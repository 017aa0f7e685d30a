//! A board bound to persistence, saving after every change

use crate::models::{ColumnKey, ProjectId};
use crate::storage::board::Board;
use crate::storage::persistence::{KeyValueStore, Persistence};

/// Owns the board for the lifetime of a session and auto-saves it
#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    board: Board,
    persistence: Persistence<S>,
}

impl<S: KeyValueStore> Session<S> {
    /// Load saved state, falling back to a fresh board
    pub fn open(persistence: Persistence<S>) -> Self {
        let board = match persistence.load() {
            Some(snapshot) => Board::from_snapshot(snapshot),
            None => Board::new(),
        };
        Session { board, persistence }
    }

    /// Read access to the board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Read access to the persistence adapter
    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn set_active_project(&mut self, id: &str) -> bool {
        self.board.set_active_project(id)
    }

    pub fn add_project(&mut self, name: &str) -> Option<ProjectId> {
        let id = self.board.add_project(name);
        self.save_if(id.is_some());
        id
    }

    pub fn delete_project(&mut self, id: &str) -> bool {
        let changed = self.board.delete_project(id);
        self.save_if(changed)
    }

    pub fn add_task(&mut self, project_id: &str, column: ColumnKey, text: &str) -> Option<u64> {
        let id = self.board.add_task(project_id, column, text);
        self.save_if(id.is_some());
        id
    }

    pub fn move_task(
        &mut self,
        project_id: &str,
        task_id: u64,
        from: ColumnKey,
        to: ColumnKey,
    ) -> bool {
        let changed = self.board.move_task(project_id, task_id, from, to);
        self.save_if(changed)
    }

    pub fn delete_task(&mut self, project_id: &str, column: ColumnKey, task_id: u64) -> bool {
        let changed = self.board.delete_task(project_id, column, task_id);
        self.save_if(changed)
    }

    // A failed save leaves the in-memory board authoritative.
    fn save_if(&mut self, changed: bool) -> bool {
        if changed {
            self.persistence.save(self.board.snapshot());
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_PROJECT_ID;
    use crate::storage::persistence::{KeyValueStore, MemoryKeyValueStore, STORAGE_KEY};

    fn fresh_session() -> Session<MemoryKeyValueStore> {
        Session::open(Persistence::new(MemoryKeyValueStore::new()))
    }

    #[test]
    fn test_open_empty_store() {
        let session = fresh_session();
        assert_eq!(session.board().projects().count(), 1);
        assert_eq!(session.board().active_project_id(), DEFAULT_PROJECT_ID);
    }

    #[test]
    fn test_mutation_saves() {
        let mut session = fresh_session();
        let id = session.add_project("Launch").unwrap();

        let saved = session.persistence().load().unwrap();
        assert!(saved.contains_key(&id));
    }

    #[test]
    fn test_noop_does_not_save() {
        let mut session = fresh_session();
        assert!(session.add_task(DEFAULT_PROJECT_ID, ColumnKey::Todo, "  ").is_none());
        assert!(!session.delete_project(DEFAULT_PROJECT_ID));
        assert!(session.persistence().store().raw(STORAGE_KEY).is_none());
    }

    #[test]
    fn test_reopen_restores_state() {
        let mut session = fresh_session();
        let project = session.add_project("Launch").unwrap();
        let task = session
            .add_task(&project, ColumnKey::Todo, "Write spec")
            .unwrap();
        session.move_task(&project, task, ColumnKey::Todo, ColumnKey::Done);

        let store = session.persistence().store().clone();
        let reopened = Session::open(Persistence::new(store));
        assert_eq!(reopened.board().snapshot(), session.board().snapshot());
        assert_eq!(reopened.board().active_project_id(), DEFAULT_PROJECT_ID);
    }

    #[test]
    fn test_save_failure_keeps_memory_state() {
        let mut session = Session::open(Persistence::new(MemoryKeyValueStore::with_quota(8)));
        let id = session
            .add_task(DEFAULT_PROJECT_ID, ColumnKey::Todo, "Too big to save")
            .unwrap();

        assert!(session.board().find_task(DEFAULT_PROJECT_ID, id).is_some());
        assert!(session.persistence().load().is_none());
        assert!(session.delete_task(DEFAULT_PROJECT_ID, ColumnKey::Todo, id));
    }

    #[test]
    fn test_saved_max_task_id_blocks_new_tasks() {
        let mut store = MemoryKeyValueStore::new();
        store
            .set(
                STORAGE_KEY,
                r#"{"default": {"name": "Main Project", "columns": {"todo": {"title": "To Do", "tasks": [
                    {"id": 18446744073709551615, "text": "Last", "createdAt": "2024-06-03T09:00:00Z", "completed": false}
                ]}}}}"#,
            )
            .unwrap();
        let mut session = Session::open(Persistence::new(store));
        let saved = session.persistence().store().raw(STORAGE_KEY).map(str::to_string);

        assert!(session.add_task(DEFAULT_PROJECT_ID, ColumnKey::Todo, "next").is_none());
        assert_eq!(session.board().task_count(DEFAULT_PROJECT_ID), 1);
        assert_eq!(session.persistence().store().raw(STORAGE_KEY).map(str::to_string), saved);
    }
}
