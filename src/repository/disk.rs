use anyhow::Result;

use super::TodoRepository;
use crate::{
    db::driver::Db,
    error::AppError,
    models::{Todo, TodoDocument, TodoId, KEY_PREFIX},
};

/// Todos persisted in an on-disk sled store.
#[derive(Debug)]
pub struct SledTodoRepository {
    db: Db,
}
impl SledTodoRepository {
    pub fn open(path: &str) -> Result<Self> {
        Ok(Self { db: Db::open(path)? })
    }
}

impl TodoRepository for SledTodoRepository {
    fn find_all(&self) -> Result<Vec<Todo>, AppError> {
        let todos = self
            .db
            .iter_prefix::<TodoDocument>(KEY_PREFIX)?
            .map(|item| -> Result<Todo> {
                let (key, document) = item?;
                let id = TodoId::from_storage_key(&key)?;
                Ok(document.into_todo(id))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(todos)
    }

    fn insert(&self, document: TodoDocument) -> Result<Todo, AppError> {
        let id = TodoId::generate(self.db.next_id()?);
        self.db.insert(id.storage_key(), &document)?;
        Ok(document.into_todo(id))
    }

    fn mark_completed(&self, id: TodoId) -> Result<(), AppError> {
        let matched = self
            .db
            .update::<TodoDocument, _, _>(id.storage_key(), |document| {
                document.completed = true;
            })?;
        if !matched {
            return Err(AppError::NotFoundIgnored);
        }
        Ok(())
    }

    fn delete(&self, id: TodoId) -> Result<(), AppError> {
        if !self.db.remove(id.storage_key())? {
            return Err(AppError::NotFoundIgnored);
        }
        Ok(())
    }

    fn ping(&self) -> Result<(), AppError> {
        Ok(self.db.ping()?)
    }

    fn flush(&self) -> Result<(), AppError> {
        Ok(self.db.flush()?)
    }
}
