//! Notes REST API - authenticated, owner-scoped CRUD.

use actix_web::{web, HttpRequest, HttpResponse, Responder};

use crate::models::NotePayload;
use crate::AppState;

/// Extract and verify the bearer token from a request; returns the owner id.
fn authenticate(state: &web::Data<AppState>, req: &HttpRequest) -> Result<String, HttpResponse> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.trim_start_matches("Bearer ").to_string());

    let token = match token {
        Some(t) => t,
        None => {
            return Err(HttpResponse::Unauthorized().json(serde_json::json!({
                "message": "No authorization token provided"
            })));
        }
    };

    state.signer.verify(&token).map_err(|e| e.to_response())
}

async fn list_notes(data: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let owner_id = match authenticate(&data, &req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match data.notes.list(&owner_id) {
        Ok(notes) => HttpResponse::Ok().json(notes),
        Err(e) => e.to_response(),
    }
}

async fn create_note(
    data: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<NotePayload>,
) -> impl Responder {
    let owner_id = match authenticate(&data, &req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match data.notes.create(&owner_id, &body.title, &body.content) {
        Ok(note) => HttpResponse::Created().json(note),
        Err(e) => e.to_response(),
    }
}

async fn update_note(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<NotePayload>,
) -> impl Responder {
    let owner_id = match authenticate(&data, &req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let note_id = path.into_inner();

    match data.notes.update(&owner_id, &note_id, &body.title, &body.content) {
        Ok(note) => HttpResponse::Ok().json(note),
        Err(e) => e.to_response(),
    }
}

async fn delete_note(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    let owner_id = match authenticate(&data, &req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let note_id = path.into_inner();

    match data.notes.delete(&owner_id, &note_id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Note deleted"
        })),
        Err(e) => e.to_response(),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/notes")
            .route("", web::get().to(list_notes))
            .route("", web::post().to(create_note))
            .route("/{id}", web::put().to(update_note))
            .route("/{id}", web::delete().to(delete_note)),
    );
}
