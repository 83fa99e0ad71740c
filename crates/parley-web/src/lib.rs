//! parley-web
//!
//! The web layer: an axum router serving the HTMX chat UI, the journal
//! page, the chat and feedback APIs, and static assets. Served through
//! `lambda_http` in production and a plain TCP listener locally.

pub mod app;
pub mod error;
pub mod journal;
pub mod markdown;
pub mod middleware;
pub mod routes;
pub mod state;
