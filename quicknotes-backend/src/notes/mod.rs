//! Note service - ownership-scoped CRUD.
//!
//! Every operation takes an owner id the request layer has already verified
//! from the session token; the service trusts it and never re-checks the
//! token. A note that does not exist and a note owned by someone else are
//! both `NotFound` - callers cannot probe for other users' records.

use std::sync::Arc;

use crate::db::Database;
use crate::errors::ServiceError;
use crate::models::Note;

pub struct NoteService {
    db: Arc<Database>,
}

impl NoteService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// All of the owner's notes, newest first.
    pub fn list(&self, owner_id: &str) -> Result<Vec<Note>, ServiceError> {
        Ok(self.db.list_notes_for_owner(owner_id)?)
    }

    /// Title and content are stored as given; the client enforces non-empty.
    pub fn create(&self, owner_id: &str, title: &str, content: &str) -> Result<Note, ServiceError> {
        Ok(self.db.insert_note(owner_id, title, content)?)
    }

    pub fn update(
        &self,
        owner_id: &str,
        id: &str,
        title: &str,
        content: &str,
    ) -> Result<Note, ServiceError> {
        self.db
            .update_note(id, owner_id, title, content)?
            .ok_or(ServiceError::NotFound)
    }

    pub fn delete(&self, owner_id: &str, id: &str) -> Result<(), ServiceError> {
        if self.db.delete_note(id, owner_id)? {
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }
}
