//! Axum-based HTTP server implementation for the gardener gateway.
//!
//! This module sets up the HTTP server the chat widget talks to. API routes
//! screen and forward chat and image requests to the upstream AI proxy; every
//! other request is intercepted and answered cache-first from the versioned
//! asset cache.
//!
//! # Components
//!
//! - `handlers`: Implementation of individual endpoints (chat, image, assets, health, metrics).
//! - `middleware`: Custom tower/axum middleware for request ID tracking.
//! - `routes`: The main router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
