use crate::{
    error::{AppError, EMPTY_BODY},
    models::{CreateTodo, Todo, TodoDocument, TodoId},
    repository::DynTodoRepository,
};

/// The four todo operations, one repository call each.
///
/// Knows nothing about HTTP; the repository is handed in at startup so any
/// backend can sit behind it.
#[derive(Debug, Clone)]
pub struct TodoService {
    repository: DynTodoRepository,
}

impl TodoService {
    pub fn new(repository: DynTodoRepository) -> Self {
        Self { repository }
    }

    pub fn list(&self) -> Result<Vec<Todo>, AppError> {
        self.repository.find_all()
    }

    pub fn create(&self, input: CreateTodo) -> Result<Todo, AppError> {
        let body = match input.body {
            Some(body) if !body.is_empty() => body,
            _ => return Err(AppError::InvalidInput(EMPTY_BODY)),
        };
        let todo = self.repository.insert(TodoDocument::new(body))?;
        tracing::info!(id = %todo.id, "todo created");
        Ok(todo)
    }

    /// Marking an unknown todo still succeeds.
    pub fn complete(&self, id: &str) -> Result<(), AppError> {
        let id: TodoId = id.parse()?;
        ignore_missing(self.repository.mark_completed(id))
    }

    /// Deleting an unknown todo still succeeds.
    pub fn delete(&self, id: &str) -> Result<(), AppError> {
        let id: TodoId = id.parse()?;
        ignore_missing(self.repository.delete(id))
    }

    pub fn flush(&self) -> Result<(), AppError> {
        self.repository.flush()
    }
}

fn ignore_missing(result: Result<(), AppError>) -> Result<(), AppError> {
    match result {
        Err(AppError::NotFoundIgnored) => {
            tracing::debug!("no todo matched, nothing to do");
            Ok(())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::repository::InMemoryTodoRepository;

    fn service() -> TodoService {
        TodoService::new(Arc::new(InMemoryTodoRepository::default()))
    }

    fn create(service: &TodoService, body: &str) -> Todo {
        service
            .create(CreateTodo {
                body: Some(body.to_string()),
            })
            .unwrap()
    }

    #[test]
    fn create_then_list() {
        let service = service();
        let created = create(&service, "buy milk");
        let todos = service.list().unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, created.id);
        assert_eq!(todos[0].body, "buy milk");
        assert!(!todos[0].completed);
    }

    #[test]
    fn empty_or_absent_body_is_rejected_and_not_stored() {
        let service = service();
        for input in [CreateTodo { body: Some(String::new()) }, CreateTodo::default()] {
            let err = service.create(input).unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(EMPTY_BODY)));
        }
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn complete_is_idempotent() {
        let service = service();
        let created = create(&service, "buy milk");
        let id = created.id.to_string();
        service.complete(&id).unwrap();
        service.complete(&id).unwrap();
        assert!(service.list().unwrap()[0].completed);
    }

    #[test]
    fn unknown_ids_succeed_without_side_effects() {
        let service = service();
        let created = create(&service, "buy milk");
        let unknown = TodoId::new(0, u64::MAX).to_string();
        service.complete(&unknown).unwrap();
        service.delete(&unknown).unwrap();
        assert_eq!(service.list().unwrap(), vec![created]);
    }

    #[test]
    fn malformed_ids_are_client_errors() {
        let service = service();
        assert!(matches!(
            service.complete("not-an-id"),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            service.delete("not-an-id"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn delete_then_list() {
        let service = service();
        let created = create(&service, "buy milk");
        service.delete(&created.id.to_string()).unwrap();
        service.delete(&created.id.to_string()).unwrap();
        assert!(service.list().unwrap().is_empty());
    }
}
