//! pinboard/crates/pb-core/src/lib.rs
//!
//! The central domain logic for Pinboard: models, the pure state engine
//! (history, reducers, transform, factory), and the port definitions
//! implemented by storage/transport plugins.

pub mod error;
pub mod factory;
pub mod history;
pub mod models;
pub mod reducers;
pub mod traits;
pub mod transform;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;

pub use factory::CardInit;
pub use history::HistoryState;
pub use reducers::CardPatch;
