//! SQLite database handle and schema.
//!
//! Holds a single connection behind a mutex; SQLite serializes writes, which
//! gives each insert/update/delete the per-record atomicity the services
//! rely on (in particular the UNIQUE email check happens inside the INSERT).

use rusqlite::{Connection, Result as SqliteResult};
use std::sync::Mutex;

pub struct Database {
    pub(super) conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database file and run the schema.
    pub fn open(db_path: &str) -> SqliteResult<Self> {
        let conn = Connection::open(db_path)?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> SqliteResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> SqliteResult<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS notes (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        // Every note query filters by owner
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_notes_owner ON notes (owner_id)",
            [],
        )?;

        Ok(())
    }
}
