mod id;

use serde::{Deserialize, Serialize};

pub use id::{InvalidTodoId, TodoId, KEY_PREFIX};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub completed: bool,
    pub body: String,
}

/// What the store keeps for a todo; the id lives in the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDocument {
    pub completed: bool,
    pub body: String,
}
impl TodoDocument {
    pub fn new(body: String) -> Self {
        Self {
            body,
            completed: false,
        }
    }

    pub fn into_todo(self, id: TodoId) -> Todo {
        Todo {
            id,
            completed: self.completed,
            body: self.body,
        }
    }
}

/// Create payload. Any `id` or `completed` sent by the client is dropped.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_ignores_client_id_and_completed() {
        let input: CreateTodo = serde_json::from_str(
            r#"{"id":"000000010000000000000002","completed":true,"body":"buy milk"}"#,
        )
        .unwrap();
        assert_eq!(input.body.as_deref(), Some("buy milk"));
    }

    #[test]
    fn create_payload_without_body() {
        let input: CreateTodo = serde_json::from_str("{}").unwrap();
        assert!(input.body.is_none());
    }

    #[test]
    fn todo_json_shape() {
        let todo = TodoDocument::new("buy milk".to_string()).into_todo(TodoId::new(1, 2));
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "000000010000000000000002",
                "completed": false,
                "body": "buy milk",
            })
        );
    }
}
