use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::error::ApiError;

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

pub fn get_password_hash(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| ApiError::PasswordHash)
}

// A hash string that doesn't parse counts as a failed verification, the
// same as a wrong password.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

pub fn create_access_token(
    user_id: i64,
    secret: &str,
    expire_minutes: i64,
) -> Result<String, ApiError> {
    create_access_token_at(user_id, Utc::now(), secret, expire_minutes)
}

fn create_access_token_at(
    user_id: i64,
    now: DateTime<Utc>,
    secret: &str,
    expire_minutes: i64,
) -> Result<String, ApiError> {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (now + Duration::minutes(expire_minutes)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| ApiError::TokenCreation)
}

/// Checks the HS256 signature and expiry, then returns the subject user id.
/// Any malformed, tampered or expired token comes back as `InvalidToken`;
/// whether the subject still exists is the middleware's problem.
pub fn decode_access_token(token: &str, secret: &str) -> Result<i64, ApiError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| ApiError::InvalidToken)?;

    data.claims.sub.parse().map_err(|_| ApiError::InvalidToken)
}
