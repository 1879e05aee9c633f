//! # pb-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the core
//! `BoardRepo` port.

use actix_web::{web, HttpResponse, Responder};
use pb_core::error::AppError;
use pb_core::models::BoardState;
use pb_core::traits::BoardRepo;
use serde_json::{json, Value};

/// State shared across all actix-web workers.
pub struct AppState {
    pub repo: Box<dyn BoardRepo>,
}

/// Returns the stored board, or the empty default when none exists yet.
///
/// "No board" is a valid state for a single-user app, never a 404.
pub async fn get_board(data: web::Data<AppState>) -> impl Responder {
    match data.repo.load().await {
        Ok(Some(state)) => HttpResponse::Ok().json(state),
        Ok(None) => HttpResponse::Ok().json(BoardState::default()),
        Err(err) => {
            log::error!("board load failed: {err:#}");
            HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }))
        }
    }
}

/// Validates and stores a whole board document (UPSERT for the single
/// fixed owner). Rejections happen before any write — no partial state.
pub async fn put_board(data: web::Data<AppState>, body: web::Json<Value>) -> impl Responder {
    let state = match decode_board_document(&body.into_inner()) {
        Ok(state) => state,
        Err(err) => {
            log::warn!("rejected board document: {err}");
            return HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
        }
    };

    match data.repo.save(&state).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "success": true })),
        Err(err) => {
            log::error!("board save failed: {err:#}");
            HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }))
        }
    }
}

/// Liveness + storage probe, handy when wiring up a new backend.
pub async fn health(data: web::Data<AppState>) -> impl Responder {
    match data.repo.load().await {
        Ok(state) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "cards": state.map(|s| s.cards.len()).unwrap_or(0),
        })),
        Err(err) => {
            log::error!("storage probe failed: {err:#}");
            HttpResponse::InternalServerError()
                .json(json!({ "status": "error", "message": err.to_string() }))
        }
    }
}

/// Structural validation first — stable error messages for the common
/// client mistakes — then the typed decode.
fn decode_board_document(value: &Value) -> pb_core::Result<BoardState> {
    let Some(object) = value.as_object() else {
        return Err(AppError::Validation("board state must be an object".to_string()));
    };
    if !object.get("cards").is_some_and(Value::is_array) {
        return Err(AppError::Validation("cards must be an array".to_string()));
    }
    for key in ["zoom", "offsetX", "offsetY"] {
        if !object.get(key).is_some_and(Value::is_number) {
            return Err(AppError::Validation(
                "zoom, offsetX, offsetY must be numbers".to_string(),
            ));
        }
    }
    serde_json::from_value(value.clone())
        .map_err(|err| AppError::Validation(format!("malformed card entry: {err}")))
}
