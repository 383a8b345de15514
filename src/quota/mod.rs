//! Daily image upload quota.
//!
//! Tracks how many image analyses the user has performed in the current
//! calendar day, persisted as a single JSON record in a narrow key-value
//! store. The chat endpoints consult the gate before forwarding an image
//! and record the upload after a successful analysis.
//!
//! # Submodules
//!
//! - `models`: The persisted upload record.
//! - `store`: The key-value store interface plus file and in-memory backends.
//! - `gate`: The check/record operations.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod gate;
pub mod models;
pub mod store;

pub use gate::{UploadGate, UPLOAD_RECORD_KEY};
pub use models::UploadRecord;
pub use store::{FileStore, KeyValueStore, MemoryStore};
