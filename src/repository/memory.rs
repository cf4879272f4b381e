use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex, MutexGuard,
    },
};

use anyhow::anyhow;

use super::TodoRepository;
use crate::{
    error::AppError,
    models::{Todo, TodoDocument, TodoId},
};

/// Process-local store, selected with `DB_URI=memory:`. Nothing survives a
/// restart.
#[derive(Debug, Default)]
pub struct InMemoryTodoRepository {
    documents: Mutex<BTreeMap<TodoId, TodoDocument>>,
    counter: AtomicU64,
}
impl InMemoryTodoRepository {
    fn documents(&self) -> Result<MutexGuard<'_, BTreeMap<TodoId, TodoDocument>>, AppError> {
        self.documents
            .lock()
            .map_err(|_| AppError::StorageFailure(anyhow!("in-memory store poisoned")))
    }
}

impl TodoRepository for InMemoryTodoRepository {
    fn find_all(&self) -> Result<Vec<Todo>, AppError> {
        let documents = self.documents()?;
        Ok(documents
            .iter()
            .map(|(id, document)| document.clone().into_todo(*id))
            .collect())
    }

    fn insert(&self, document: TodoDocument) -> Result<Todo, AppError> {
        let id = TodoId::generate(self.counter.fetch_add(1, Ordering::Relaxed));
        self.documents()?.insert(id, document.clone());
        Ok(document.into_todo(id))
    }

    fn mark_completed(&self, id: TodoId) -> Result<(), AppError> {
        let mut documents = self.documents()?;
        let document = documents.get_mut(&id).ok_or(AppError::NotFoundIgnored)?;
        document.completed = true;
        Ok(())
    }

    fn delete(&self, id: TodoId) -> Result<(), AppError> {
        self.documents()?
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::NotFoundIgnored)
    }

    fn ping(&self) -> Result<(), AppError> {
        self.documents().map(|_| ())
    }

    fn flush(&self) -> Result<(), AppError> {
        Ok(())
    }
}
