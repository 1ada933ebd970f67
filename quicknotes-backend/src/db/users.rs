//! User (credential) store operations

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Result as SqliteResult};
use uuid::Uuid;

use super::Database;
use crate::models::User;

impl Database {
    /// Insert a new user. The UNIQUE constraint on `email` rejects
    /// duplicates atomically; callers see a `ConstraintViolation`.
    pub fn insert_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> SqliteResult<User> {
        let conn = self.conn.lock().unwrap();
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now();

        conn.execute(
            "INSERT INTO users (id, name, email, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, name, email, password_hash, created_at.to_rfc3339()],
        )?;

        Ok(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at,
        })
    }

    pub fn find_user_by_email(&self, email: &str) -> SqliteResult<Option<User>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = ?1",
        )?;

        // Only a no-rows result maps to None; real query failures propagate
        // so they surface as a server error, never as bad credentials.
        let user = stmt
            .query_row(params![email], |row| {
                let created_at_str: String = row.get(4)?;
                Ok(User {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    password_hash: row.get(3)?,
                    created_at: chrono::DateTime::parse_from_rfc3339(&created_at_str)
                        .unwrap()
                        .with_timezone(&Utc),
                })
            })
            .optional()?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_find_user() {
        let db = Database::open_in_memory().unwrap();

        let user = db
            .insert_user("Ada", "ada@example.com", "$2b$12$hash")
            .expect("Failed to insert user");

        let found = db
            .find_user_by_email("ada@example.com")
            .expect("Failed to query")
            .expect("User should exist");

        assert_eq!(found.id, user.id);
        assert_eq!(found.name, "Ada");
        assert_eq!(found.password_hash, "$2b$12$hash");
    }

    #[test]
    fn test_find_unknown_email_returns_none() {
        let db = Database::open_in_memory().unwrap();
        let found = db.find_user_by_email("nobody@example.com").unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_duplicate_email_is_rejected() {
        let db = Database::open_in_memory().unwrap();

        db.insert_user("Ada", "ada@example.com", "$2b$12$a").unwrap();
        let err = db
            .insert_user("Imposter", "ada@example.com", "$2b$12$b")
            .expect_err("second insert should fail");

        match err {
            rusqlite::Error::SqliteFailure(e, _) => {
                assert_eq!(e.code, rusqlite::ErrorCode::ConstraintViolation);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        // First registration is unaffected
        let found = db.find_user_by_email("ada@example.com").unwrap().unwrap();
        assert_eq!(found.name, "Ada");
    }

    #[test]
    fn test_unreadable_row_is_an_error_not_absence() {
        let db = Database::open_in_memory().unwrap();

        // A row the mapper cannot read (integer where created_at text
        // belongs) must surface as a store error, not as "no such user"
        {
            let conn = db.conn.lock().unwrap();
            conn.execute(
                "INSERT INTO users (id, name, email, password_hash, created_at)
                 VALUES ('u1', 'X', 'x@example.com', 'h', 123)",
                [],
            )
            .unwrap();
        }

        assert!(db.find_user_by_email("x@example.com").is_err());
    }
}
