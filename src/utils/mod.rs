//! Utility functions and helpers for the gardener gateway.
//!
//! This module provides cross-cutting concerns like structured logging and
//! API key sanitization.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
