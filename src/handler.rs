use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Form, Json,
};
use chrono::Utc;
use sqlx::{query, query_as, QueryBuilder, Sqlite};

use crate::{
    error::ApiError,
    model::{CurrentUser, Todo, User},
    schema::{
        CreateTodoSchema, FilterTodoSchema, FilterUserSchema, LoginSchema, MessageSchema,
        SignupSchema, TodoListSchema, TodoPublic, TokenSchema, UpdateTodoSchema, UserListSchema,
        UserPublic,
    },
    security, AppState,
};

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";
const TODO_COLUMNS: &str = "id, title, description, state, user_id, created_at, updated_at";

// Default page size for list endpoints when the caller doesn't pass one.
const DEFAULT_PAGE_LIMIT: i64 = 100;

// Handler for the health checker route
pub async fn health_checker_handler() -> impl IntoResponse {
    const MESSAGE: &str = "Multi-tenant task API with Rust, SQLX, SQLite, and Axum";

    let json_response = serde_json::json!({
        "status": "success",
        "message": MESSAGE
    });

    Json(json_response)
}

// Handler for exchanging credentials for a bearer token. The `username`
// form field may carry either the username or the email; both failure
// modes return the same 400 so the caller can't probe which part was wrong.
pub async fn login(
    State(data): State<Arc<AppState>>,
    Form(body): Form<LoginSchema>,
) -> Result<impl IntoResponse, ApiError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ? OR email = ?");
    let user = query_as::<_, User>(&sql)
        .bind(&body.username)
        .bind(&body.username)
        .fetch_optional(&data.db)
        .await?
        .ok_or(ApiError::BadCredentials)?;

    if !security::verify_password(&body.password, &user.password_hash) {
        return Err(ApiError::BadCredentials);
    }

    let access_token = security::create_access_token(
        user.id,
        &data.config.jwt_secret,
        data.config.token_expire_minutes,
    )?;

    Ok(Json(TokenSchema {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

// Handler for re-issuing a token on an already-authenticated request
pub async fn refresh_token(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    let access_token = security::create_access_token(
        user.id,
        &data.config.jwt_secret,
        data.config.token_expire_minutes,
    )?;

    Ok(Json(TokenSchema {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

// Handler for registering a new user
pub async fn create_user(
    State(data): State<Arc<AppState>>,
    Json(body): Json<SignupSchema>,
) -> Result<impl IntoResponse, ApiError> {
    let existing: Option<(String, String)> =
        query_as("SELECT username, email FROM users WHERE username = ? OR email = ?")
            .bind(&body.username)
            .bind(&body.email)
            .fetch_optional(&data.db)
            .await?;

    if let Some((username, _)) = existing {
        if username == body.username {
            return Err(ApiError::Conflict("Username already exists"));
        }
        return Err(ApiError::Conflict("Email already exists"));
    }

    let password_hash = security::get_password_hash(&body.password)?;
    let now = Utc::now();

    let sql = format!(
        "INSERT INTO users (username, email, password_hash, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
    );
    let user = query_as::<_, User>(&sql)
        .bind(&body.username)
        .bind(&body.email)
        .bind(&password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(&data.db)
        .await?;

    Ok((StatusCode::CREATED, Json(UserPublic::from(user))))
}

// Handler for listing registered users
pub async fn list_users(
    State(data): State<Arc<AppState>>,
    Query(params): Query<FilterUserSchema>,
) -> Result<impl IntoResponse, ApiError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id ASC LIMIT ? OFFSET ?");
    let users = query_as::<_, User>(&sql)
        .bind(params.limit.unwrap_or(DEFAULT_PAGE_LIMIT))
        .bind(params.offset.unwrap_or(0))
        .fetch_all(&data.db)
        .await?;

    Ok(Json(UserListSchema {
        users: users.into_iter().map(UserPublic::from).collect(),
    }))
}

// Handler for replacing the caller's own account data
pub async fn update_user(
    Path(id): Path<i64>,
    State(data): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(body): Json<SignupSchema>,
) -> Result<impl IntoResponse, ApiError> {
    if id != current_user.id {
        return Err(ApiError::PermissionDenied);
    }

    let taken: Option<(String, String)> =
        query_as("SELECT username, email FROM users WHERE (username = ? OR email = ?) AND id != ?")
            .bind(&body.username)
            .bind(&body.email)
            .bind(id)
            .fetch_optional(&data.db)
            .await?;

    if let Some((username, _)) = taken {
        if username == body.username {
            return Err(ApiError::Conflict("Username already exists"));
        }
        return Err(ApiError::Conflict("Email already exists"));
    }

    let password_hash = security::get_password_hash(&body.password)?;

    let sql = format!(
        "UPDATE users SET username = ?, email = ?, password_hash = ?, updated_at = ? \
         WHERE id = ? RETURNING {USER_COLUMNS}"
    );
    let user = query_as::<_, User>(&sql)
        .bind(&body.username)
        .bind(&body.email)
        .bind(&password_hash)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&data.db)
        .await?;

    Ok(Json(UserPublic::from(user)))
}

// Handler for deleting the caller's own account. Owned todos go with it
// via the foreign key cascade.
pub async fn delete_user(
    Path(id): Path<i64>,
    State(data): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    if id != current_user.id {
        return Err(ApiError::PermissionDenied);
    }

    query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(&data.db)
        .await?;

    Ok(Json(MessageSchema {
        message: "User deleted".to_string(),
    }))
}

// Handler for creating a new Todo
pub async fn create_todo(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<CreateTodoSchema>,
) -> Result<impl IntoResponse, ApiError> {
    let now = Utc::now();

    let sql = format!(
        "INSERT INTO todos (title, description, state, user_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING {TODO_COLUMNS}"
    );
    let todo = query_as::<_, Todo>(&sql)
        .bind(&body.title)
        .bind(&body.description)
        .bind(body.state)
        .bind(user.id)
        .bind(now)
        .bind(now)
        .fetch_one(&data.db)
        .await?;

    Ok((StatusCode::CREATED, Json(TodoPublic::from(todo))))
}

// Handler for listing the caller's Todo items with optional filters.
// Every branch keeps the owner predicate; ordering by id keeps pagination
// stable across calls.
pub async fn list_todos(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<FilterTodoSchema>,
) -> Result<impl IntoResponse, ApiError> {
    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {TODO_COLUMNS} FROM todos WHERE user_id = "));
    builder.push_bind(user.id);

    if let Some(title) = &params.title {
        builder.push(" AND title LIKE ");
        builder.push_bind(format!("%{title}%"));
    }
    if let Some(description) = &params.description {
        builder.push(" AND description LIKE ");
        builder.push_bind(format!("%{description}%"));
    }
    if let Some(state) = params.state {
        builder.push(" AND state = ");
        builder.push_bind(state);
    }

    builder.push(" ORDER BY id ASC LIMIT ");
    builder.push_bind(params.limit.unwrap_or(DEFAULT_PAGE_LIMIT));
    builder.push(" OFFSET ");
    builder.push_bind(params.offset.unwrap_or(0));

    let todos = builder
        .build_query_as::<Todo>()
        .fetch_all(&data.db)
        .await?;

    Ok(Json(TodoListSchema {
        todos: todos.into_iter().map(TodoPublic::from).collect(),
    }))
}

// Handler for partially updating a Todo by ID
pub async fn update_todo(
    Path(id): Path<i64>,
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<UpdateTodoSchema>,
) -> Result<impl IntoResponse, ApiError> {
    let sql = format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ? AND user_id = ?");
    let todo = query_as::<_, Todo>(&sql)
        .bind(id)
        .bind(user.id)
        .fetch_optional(&data.db)
        .await?
        .ok_or(ApiError::NotFound("Task not found."))?;

    let title = body.title.unwrap_or(todo.title);
    let description = body.description.unwrap_or(todo.description);
    let state = body.state.unwrap_or(todo.state);

    let sql = format!(
        "UPDATE todos SET title = ?, description = ?, state = ?, updated_at = ? \
         WHERE id = ? AND user_id = ? RETURNING {TODO_COLUMNS}"
    );
    let updated = query_as::<_, Todo>(&sql)
        .bind(&title)
        .bind(&description)
        .bind(state)
        .bind(Utc::now())
        .bind(id)
        .bind(user.id)
        .fetch_one(&data.db)
        .await?;

    Ok(Json(TodoPublic::from(updated)))
}

// Handler for deleting a Todo by ID
pub async fn delete_todo(
    Path(id): Path<i64>,
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    let rows_affected = query("DELETE FROM todos WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user.id)
        .execute(&data.db)
        .await?
        .rows_affected();

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Task not found."));
    }

    Ok(Json(MessageSchema {
        message: "Task has been deleted successfully.".to_string(),
    }))
}
