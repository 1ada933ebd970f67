//! Auth service - registration, login, and session token lifecycle.

pub mod password;
pub mod token;

use std::sync::Arc;

use crate::db::Database;
use crate::errors::ServiceError;
use crate::models::PublicUser;

pub use token::TokenSigner;

pub struct AuthService {
    db: Arc<Database>,
    signer: TokenSigner,
}

impl AuthService {
    pub fn new(db: Arc<Database>, signer: TokenSigner) -> Self {
        Self { db, signer }
    }

    /// Register a new user and issue a session token.
    ///
    /// Emails are lowercased before any store call so uniqueness is
    /// case-insensitive, and the same normalization applies at login.
    pub fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(PublicUser, String), ServiceError> {
        let name = name.trim();
        let email = normalize_email(email);
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ServiceError::Validation(
                "Name, email and password are required".to_string(),
            ));
        }

        let password_hash = password::hash_password(password)?;

        let user = match self.db.insert_user(name, &email, &password_hash) {
            Ok(user) => user,
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(ServiceError::EmailInUse);
            }
            Err(e) => return Err(e.into()),
        };

        let token = self.signer.issue(&user.id)?;
        Ok((PublicUser::from(&user), token))
    }

    /// Verify credentials and issue a session token.
    ///
    /// Unknown email and wrong password return the identical error so the
    /// response never reveals which factor failed.
    pub fn login(&self, email: &str, password: &str) -> Result<(PublicUser, String), ServiceError> {
        let email = normalize_email(email);

        let user = self
            .db
            .find_user_by_email(&email)?
            .ok_or(ServiceError::InvalidCredentials)?;

        if !password::verify_password(password, &user.password_hash) {
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.signer.issue(&user.id)?;
        Ok((PublicUser::from(&user), token))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
