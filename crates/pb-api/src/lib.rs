//! # pb-api
//!
//! The web routing layer for the board persistence API.

pub mod handlers;
pub mod middleware;

use actix_web::web;

/// Configures the persistence API routes.
///
/// # Developer Note
/// We use a scoped configuration to allow the main binary to mount
/// the API under different paths if needed (e.g., /api/v1/).
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // The whole-document board endpoint
            .route("/board", web::get().to(handlers::get_board))
            .route("/board", web::put().to(handlers::put_board))
            // Liveness + storage probe
            .route("/health", web::get().to(handlers::health)),
    );
}
