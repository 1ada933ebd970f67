use std::env;
use std::path::Path;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Secret used to sign session tokens. Required; the server refuses to
    /// start without it so tokens are never signed with a guessable default.
    pub const JWT_SECRET: &str = "JWT_SECRET";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 10000;
    pub const DATABASE_URL: &str = "./.db/quicknotes.db";
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var(env_vars::PORT)
                .unwrap_or_else(|_| defaults::PORT.to_string())
                .parse()
                .expect("PORT must be a valid number"),
            database_url: env::var(env_vars::DATABASE_URL)
                .unwrap_or_else(|_| defaults::DATABASE_URL.to_string()),
            jwt_secret: env::var(env_vars::JWT_SECRET)
                .expect("JWT_SECRET must be set"),
        }
    }
}

/// Ensure the parent directory of the database file exists so a fresh
/// checkout can boot with the default `./.db/...` path.
pub fn ensure_db_dir(database_url: &str) {
    if let Some(parent) = Path::new(database_url).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).ok();
        }
    }
}
