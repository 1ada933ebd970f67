pub mod notes;
pub mod sqlite;
pub mod users;

pub use sqlite::Database;
