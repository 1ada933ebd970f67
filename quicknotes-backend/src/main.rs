use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod auth;
mod config;
mod controllers;
mod db;
mod errors;
mod models;
mod notes;

use auth::{AuthService, TokenSigner};
use config::Config;
use db::Database;
use notes::NoteService;

pub struct AppState {
    pub auth: AuthService,
    pub notes: NoteService,
    pub signer: TokenSigner,
}

impl AppState {
    pub fn new(db: Arc<Database>, jwt_secret: &str) -> Self {
        let signer = TokenSigner::new(jwt_secret);
        Self {
            auth: AuthService::new(Arc::clone(&db), signer.clone()),
            notes: NoteService::new(db),
            signer,
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let port = config.port;

    config::ensure_db_dir(&config.database_url);
    let db = Arc::new(Database::open(&config.database_url).unwrap_or_else(|e| {
        log::error!("Failed to open database at {}: {}", config.database_url, e);
        std::process::exit(1);
    }));
    log::info!("Database ready at {}", config.database_url);

    let jwt_secret = config.jwt_secret.clone();

    let server = HttpServer::new(move || {
        // The frontend is hosted separately; keep CORS open like the
        // original deployment
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(AppState::new(Arc::clone(&db), &jwt_secret)))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config)
            .configure(controllers::auth::config)
            .configure(controllers::notes::config)
    })
    .bind(("0.0.0.0", port))?
    .run();

    log::info!("Server running on http://localhost:{}", port);
    server.await
}
