//! # Gamedex
//!
//! A small game-catalog HTTP service, usable both as a standalone binary and
//! as a library.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gamedex::config::ServerConfig;
//! use gamedex::ingest::SourceClient;
//! use gamedex::server::{AppState, create_router};
//! use gamedex::store::{SqliteStore, Store};
//!
//! let config = ServerConfig::default();
//! let store = SqliteStore::new(&config.db_path).unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState {
//!     store: Arc::new(store),
//!     sources: SourceClient::new(config.android_url, config.ios_url).unwrap(),
//! });
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes the CLI binary. Disable with `default-features = false`.

pub mod config;
pub mod error;
pub mod ingest;
pub mod server;
pub mod store;
pub mod types;
