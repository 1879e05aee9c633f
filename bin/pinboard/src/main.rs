//! # Pinboard Binary
//!
//! The entry point that assembles the persistence API based on
//! compile-time storage features.

use actix_web::{web, App, HttpServer};
use pb_api::handlers::AppState;
use pb_api::middleware;
use pb_core::traits::BoardRepo;

#[cfg(feature = "db-sqlite")]
use pb_db_sqlite::SqliteBoardRepo;

#[cfg(feature = "store-file")]
use pb_store_file::FileBoardRepo;

#[cfg(not(any(feature = "db-sqlite", feature = "store-file")))]
compile_error!("enable a storage backend: db-sqlite or store-file");

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let addr = std::env::var("PINBOARD_ADDR").unwrap_or_else(|_| "127.0.0.1:3001".to_string());

    // 1. Initialize the storage backend (db-sqlite wins when both are on)
    #[cfg(feature = "db-sqlite")]
    let repo: Box<dyn BoardRepo> = {
        let db_url = std::env::var("PINBOARD_DB").unwrap_or_else(|_| "sqlite:pinboard.db".to_string());
        Box::new(
            SqliteBoardRepo::new(&db_url)
                .await
                .expect("Failed to init SQLite"),
        )
    };

    #[cfg(all(feature = "store-file", not(feature = "db-sqlite")))]
    let repo: Box<dyn BoardRepo> = {
        let data_path =
            std::env::var("PINBOARD_DATA").unwrap_or_else(|_| "./data/board.json".to_string());
        Box::new(FileBoardRepo::new(data_path.into()))
    };

    // 2. Wrap in AppState (dynamic dispatch so handlers stay backend-agnostic)
    let state = web::Data::new(AppState { repo });

    log::info!("pinboard starting on http://{addr}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::standard_middleware())
            .wrap(middleware::cors_policy())
            .configure(pb_api::configure_routes)
    })
    .bind(&addr)?
    .run()
    .await
}
