//! Note store operations
//!
//! Every read, update, and delete filters by both note id and owner id, so a
//! note is invisible and unmodifiable to any identity other than its owner
//! even when the id is known.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Result as SqliteResult, Row};
use uuid::Uuid;

use super::Database;
use crate::models::Note;

fn note_from_row(row: &Row) -> rusqlite::Result<Note> {
    let created_at_str: String = row.get(4)?;
    let updated_at_str: String = row.get(5)?;

    Ok(Note {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .unwrap()
            .with_timezone(&Utc),
        updated_at: DateTime::parse_from_rfc3339(&updated_at_str)
            .unwrap()
            .with_timezone(&Utc),
    })
}

impl Database {
    pub fn insert_note(&self, owner_id: &str, title: &str, content: &str) -> SqliteResult<Note> {
        let conn = self.conn.lock().unwrap();
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let now_str = now.to_rfc3339();

        conn.execute(
            "INSERT INTO notes (id, owner_id, title, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![id, owner_id, title, content, now_str],
        )?;

        Ok(Note {
            id,
            owner_id: owner_id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// All notes for one owner, newest first. Rowid breaks ties between
    /// notes created in the same instant.
    pub fn list_notes_for_owner(&self, owner_id: &str) -> SqliteResult<Vec<Note>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            "SELECT id, owner_id, title, content, created_at, updated_at
             FROM notes WHERE owner_id = ?1
             ORDER BY created_at DESC, rowid DESC",
        )?;

        let notes = stmt
            .query_map(params![owner_id], |row| note_from_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(notes)
    }

    pub fn find_note(&self, id: &str, owner_id: &str) -> SqliteResult<Option<Note>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            "SELECT id, owner_id, title, content, created_at, updated_at
             FROM notes WHERE id = ?1 AND owner_id = ?2",
        )?;

        // Only a no-rows result maps to None; real query failures propagate
        let note = stmt
            .query_row(params![id, owner_id], |row| note_from_row(row))
            .optional()?;

        Ok(note)
    }

    /// Update title and content; refreshes `updated_at`. Returns `None`
    /// when no note matches both id and owner.
    pub fn update_note(
        &self,
        id: &str,
        owner_id: &str,
        title: &str,
        content: &str,
    ) -> SqliteResult<Option<Note>> {
        let conn = self.conn.lock().unwrap();
        let now_str = Utc::now().to_rfc3339();

        let rows_affected = conn.execute(
            "UPDATE notes SET title = ?1, content = ?2, updated_at = ?3
             WHERE id = ?4 AND owner_id = ?5",
            params![title, content, now_str, id, owner_id],
        )?;

        if rows_affected == 0 {
            return Ok(None);
        }

        // Re-read under the same lock so the returned note is exactly the
        // row just written; a concurrent delete cannot slip between the
        // two statements.
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, title, content, created_at, updated_at
             FROM notes WHERE id = ?1 AND owner_id = ?2",
        )?;
        let note = stmt.query_row(params![id, owner_id], |row| note_from_row(row))?;

        Ok(Some(note))
    }

    /// Returns true if a note was removed.
    pub fn delete_note(&self, id: &str, owner_id: &str) -> SqliteResult<bool> {
        let conn = self.conn.lock().unwrap();
        let rows_affected = conn.execute(
            "DELETE FROM notes WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_list_newest_first() {
        let db = Database::open_in_memory().unwrap();

        let first = db.insert_note("owner-a", "first", "1").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = db.insert_note("owner-a", "second", "2").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let third = db.insert_note("owner-a", "third", "3").unwrap();

        let notes = db.list_notes_for_owner("owner-a").unwrap();
        assert_eq!(notes.len(), 3);
        assert_eq!(notes[0].id, third.id);
        assert_eq!(notes[1].id, second.id);
        assert_eq!(notes[2].id, first.id);
    }

    #[test]
    fn test_owner_scoping_hides_foreign_notes() {
        let db = Database::open_in_memory().unwrap();

        let note = db.insert_note("owner-a", "private", "secret").unwrap();

        assert!(db.list_notes_for_owner("owner-b").unwrap().is_empty());
        assert!(db.find_note(&note.id, "owner-b").unwrap().is_none());
        assert!(db
            .update_note(&note.id, "owner-b", "stolen", "x")
            .unwrap()
            .is_none());
        assert!(!db.delete_note(&note.id, "owner-b").unwrap());

        // Untouched for the real owner
        let found = db.find_note(&note.id, "owner-a").unwrap().unwrap();
        assert_eq!(found.title, "private");
    }

    #[test]
    fn test_update_refreshes_updated_at_only() {
        let db = Database::open_in_memory().unwrap();

        let note = db.insert_note("owner-a", "t", "c").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));

        let updated = db
            .update_note(&note.id, "owner-a", "t2", "c2")
            .unwrap()
            .expect("note should exist");

        assert_eq!(updated.id, note.id);
        assert_eq!(updated.title, "t2");
        assert_eq!(updated.content, "c2");
        assert_eq!(updated.created_at, note.created_at);
        assert!(updated.updated_at > note.updated_at);
    }

    #[test]
    fn test_unreadable_row_is_an_error_not_absence() {
        let db = Database::open_in_memory().unwrap();

        // A row the mapper cannot read must surface as a store error, not
        // as a missing note (which callers would report as NotFound)
        {
            let conn = db.conn.lock().unwrap();
            conn.execute(
                "INSERT INTO notes (id, owner_id, title, content, created_at, updated_at)
                 VALUES ('n1', 'owner-a', 't', 'c', 123, 456)",
                [],
            )
            .unwrap();
        }

        assert!(db.find_note("n1", "owner-a").is_err());
    }

    #[test]
    fn test_update_returns_the_written_row_under_contention() {
        use std::sync::Arc;

        // An update that modified a row must report that row even when a
        // delete lands immediately afterwards: either the update wins and
        // returns Some, or the delete got there first and the update
        // touched nothing
        for _ in 0..20 {
            let db = Arc::new(Database::open_in_memory().unwrap());
            let note = db.insert_note("owner-a", "t", "c").unwrap();

            let deleter = {
                let db = Arc::clone(&db);
                let id = note.id.clone();
                std::thread::spawn(move || db.delete_note(&id, "owner-a").unwrap())
            };

            let updated = db.update_note(&note.id, "owner-a", "t2", "c2").unwrap();
            deleter.join().unwrap();

            match updated {
                Some(n) => {
                    assert_eq!(n.id, note.id);
                    assert_eq!(n.title, "t2");
                    assert_eq!(n.created_at, note.created_at);
                }
                // Delete ran first; the note must be gone untouched
                None => assert!(db.find_note(&note.id, "owner-a").unwrap().is_none()),
            }
        }
    }

    #[test]
    fn test_delete_then_update_misses() {
        let db = Database::open_in_memory().unwrap();

        let note = db.insert_note("owner-a", "t", "c").unwrap();
        assert!(db.delete_note(&note.id, "owner-a").unwrap());

        assert!(db
            .update_note(&note.id, "owner-a", "t2", "c2")
            .unwrap()
            .is_none());
        assert!(!db.delete_note(&note.id, "owner-a").unwrap());
    }
}
