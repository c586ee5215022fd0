//! PDF Parser API
//!
//! An HTTP service that accepts an uploaded PDF and returns its text and
//! document info as JSON. The server binary is in main.rs; the library
//! exposes the router and its pieces for integration tests.
//!
//! # Modules
//!
//! - `config`: environment-driven configuration
//! - `extract`: PDF text/info extraction behind the `PdfExtractor` trait
//! - `routes`: HTTP handlers and router assembly
//! - `error`: mapping of upload failures to HTTP responses

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
