use std::env;
use std::net::SocketAddr;

/// Process-wide settings, read once at startup from the environment
/// (`.env` is loaded first by main).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub jwt_secret: String,
    pub token_expire_minutes: i64,
    pub cors_origin: String,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://todo.db".to_string());
        let listen_addr = env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
            .parse()
            .expect("LISTEN_ADDR must be a host:port pair");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        let token_expire_minutes = env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(30);
        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Self {
            database_url,
            listen_addr,
            jwt_secret,
            token_expire_minutes,
            cors_origin,
        }
    }
}
