//! Upstream AI proxy client for chat and image analysis.
//!
//! The proxy is an external collaborator with a fixed contract: it takes a
//! POST with a JSON `messages` array and answers with `reply` (chat), with
//! `choices[0].message.content` (image analysis), or with an `error` field
//! on failure.
//!
//! # Submodules
//!
//! - `models`: Request/response structures and image payload validation.
//! - `client`: The reqwest-based client.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod client;
pub mod models;

pub use client::AssistantClient;
pub use models::{ImageFormat, MAX_IMAGE_SIZE_BYTES};
