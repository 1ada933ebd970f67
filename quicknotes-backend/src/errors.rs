//! Service error taxonomy and its single mapping to HTTP responses.
//!
//! Everything below the controllers returns `ServiceError`; the controllers
//! recover every variant here so nothing past this boundary can leak a
//! stack trace or query fragment to a client.

use actix_web::HttpResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or malformed input (empty signup fields, etc.)
    #[error("{0}")]
    Validation(String),

    /// Registration attempted with an email that already has an account
    #[error("Email already in use")]
    EmailInUse,

    /// Login failed. Deliberately the same whether the email was unknown or
    /// the password was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Session token missing, malformed, bad signature, or expired
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Note absent, or owned by a different user. The two cases are never
    /// distinguished.
    #[error("Note not found")]
    NotFound,

    /// Any underlying persistence failure
    #[error("database error: {0}")]
    Store(#[from] rusqlite::Error),

    /// Non-store internal failure (e.g. the password hasher)
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Map to the wire response. Store failures are logged server-side and
    /// surfaced as a generic 500 with no internal detail.
    pub fn to_response(&self) -> HttpResponse {
        match self {
            ServiceError::Validation(_)
            | ServiceError::EmailInUse
            | ServiceError::InvalidCredentials => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "message": self.to_string()
                }))
            }
            ServiceError::InvalidToken => {
                HttpResponse::Unauthorized().json(serde_json::json!({
                    "message": self.to_string()
                }))
            }
            ServiceError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
                "message": self.to_string()
            })),
            ServiceError::Store(_) | ServiceError::Internal(_) => {
                log::error!("{}", self);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "message": "Internal server error"
                }))
            }
        }
    }
}
