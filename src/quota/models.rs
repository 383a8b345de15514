//! The persisted upload record.

// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// One day's upload bookkeeping: the calendar day it belongs to and how
/// many image analyses have completed on that day.
///
/// The record is overwritten on day rollover, never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    /// Local calendar day the count applies to (`%Y-%m-%d`).
    pub date: String,
    /// Completed image analyses on that day.
    pub count: u32,
}

impl UploadRecord {
    /// A zero-count record for `date`.
    pub fn fresh(date: String) -> Self {
        Self { date, count: 0 }
    }
}
