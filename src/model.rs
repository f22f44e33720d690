use chrono::{DateTime, Utc};

// Lifecycle states a task moves through. Stored as lowercase text in SQLite.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TodoState {
    #[default]
    Draft,
    Todo,
    Doing,
    Done,
    Trash,
}

// Data model representing a Todo item
#[derive(Debug, sqlx::FromRow, serde::Serialize, serde::Deserialize)]
pub struct Todo {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) state: TodoState,
    pub(crate) user_id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

// Data model representing a registered account. The password hash never
// leaves this type; responses go through schema::UserPublic.
#[derive(Debug, sqlx::FromRow, serde::Serialize, serde::Deserialize)]
pub struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password_hash: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

// Authenticated caller, resolved by the auth middleware and attached to the
// request as an extension.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CurrentUser {
    pub(crate) id: i64,
    pub(crate) username: String,
}
