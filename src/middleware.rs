use std::sync::Arc;

use axum::{
    extract::State,
    http::{self, Request},
    middleware::Next,
    response::Response,
};

use crate::{error::ApiError, model::CurrentUser, security, AppState};

pub async fn mw_require_auth<B>(
    State(data): State<Arc<AppState>>,
    mut request: Request<B>,
    next: Next<B>,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::InvalidToken)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::InvalidToken)?;

    let user_id = security::decode_access_token(token, &data.config.jwt_secret)?;

    // A valid signature is not enough: the subject must still resolve to a
    // live account.
    let user = sqlx::query_as::<_, CurrentUser>("SELECT id, username FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(&data.db)
        .await?
        .ok_or(ApiError::InvalidToken)?;

    tracing::debug!(username = %user.username, "authenticated request");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
