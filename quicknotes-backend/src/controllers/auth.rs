//! Auth REST API - signup and login.

use actix_web::{web, HttpResponse, Responder};

use crate::models::{AuthResponse, LoginRequest, SignupRequest};
use crate::AppState;

async fn signup(data: web::Data<AppState>, body: web::Json<SignupRequest>) -> impl Responder {
    match data.auth.register(&body.name, &body.email, &body.password) {
        Ok((user, token)) => HttpResponse::Created().json(AuthResponse { user, token }),
        Err(e) => e.to_response(),
    }
}

async fn login(data: web::Data<AppState>, body: web::Json<LoginRequest>) -> impl Responder {
    match data.auth.login(&body.email, &body.password) {
        Ok((user, token)) => HttpResponse::Ok().json(AuthResponse { user, token }),
        Err(e) => e.to_response(),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login)),
    );
}
