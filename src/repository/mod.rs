mod disk;
mod memory;

use std::sync::Arc;

use anyhow::Result;

pub use disk::SledTodoRepository;
pub use memory::InMemoryTodoRepository;

use crate::{
    config::Storage,
    error::AppError,
    models::{Todo, TodoDocument, TodoId},
};

/// Single-collection document store holding the todos.
///
/// Every method is one round trip to the backend. Writes to a single
/// document are atomic; nothing spans more than one document.
pub trait TodoRepository: Send + Sync + std::fmt::Debug {
    /// Every stored todo, in whatever order the backend scans them.
    fn find_all(&self) -> Result<Vec<Todo>, AppError>;
    /// Stores a new document under a freshly assigned id.
    fn insert(&self, document: TodoDocument) -> Result<Todo, AppError>;
    /// Sets `completed` to true. `NotFoundIgnored` when nothing matched.
    fn mark_completed(&self, id: TodoId) -> Result<(), AppError>;
    /// `NotFoundIgnored` when nothing matched.
    fn delete(&self, id: TodoId) -> Result<(), AppError>;

    fn ping(&self) -> Result<(), AppError>;
    fn flush(&self) -> Result<(), AppError>;
}

pub type DynTodoRepository = Arc<dyn TodoRepository>;

/// Opens the backend named by the configured storage URI.
pub fn connect(storage: &Storage) -> Result<DynTodoRepository> {
    let repository: DynTodoRepository = match storage {
        Storage::Memory => Arc::new(InMemoryTodoRepository::default()),
        Storage::Sled(path) => Arc::new(SledTodoRepository::open(path)?),
    };
    repository.ping()?;
    Ok(repository)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_to_memory() -> Result<()> {
        let repository = connect(&Storage::Memory)?;
        assert!(repository.find_all()?.is_empty());
        Ok(())
    }
}
