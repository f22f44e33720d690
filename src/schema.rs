use chrono::{DateTime, Utc};

use crate::model::{Todo, TodoState, User};

// Struct representing the request body for registering a user
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct SignupSchema {
    pub username: String,
    pub email: String,
    pub password: String,
}

// Struct representing the form body for the token endpoint
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct LoginSchema {
    pub username: String,
    pub password: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct TokenSchema {
    pub access_token: String,
    pub token_type: String,
}

// Struct representing the request body for creating a new Todo
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CreateTodoSchema {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub state: TodoState,
}

// Struct representing the request body for partially updating a Todo.
// Absent fields keep their stored value.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateTodoSchema {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<TodoState>,
}

// Query parameters accepted by the Todo list endpoint. Filters are
// AND-combined; offset/limit paginate the scoped result set.
#[derive(Debug, serde::Deserialize)]
pub struct FilterTodoSchema {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<TodoState>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, serde::Deserialize)]
pub struct FilterUserSchema {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct MessageSchema {
    pub message: String,
}

// Public projection of a user record, without the password hash.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct UserPublic {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct UserListSchema {
    pub users: Vec<UserPublic>,
}

// Public projection of a Todo, without the owner column.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct TodoPublic {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub state: TodoState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoPublic {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            state: todo.state,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct TodoListSchema {
    pub todos: Vec<TodoPublic>,
}
