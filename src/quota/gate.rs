// Upload gate - daily image analysis quota
// Author: kelexine (https://github.com/kelexine)

use crate::error::Result;
use crate::quota::models::UploadRecord;
use crate::quota::store::KeyValueStore;
use tracing::debug;

/// Fixed storage key for the upload record.
pub const UPLOAD_RECORD_KEY: &str = "imageUploads";

/// Gate enforcing "at most N image analyses per calendar day" from local
/// persisted state only.
///
/// `check_limit` followed later by `record_upload` is a read-modify-write
/// pair with a network round trip in between. Concurrent processes over the
/// same store can each read a stale count and both write `count + 1`,
/// under-counting. The store offers no cross-process locking; single-device
/// sequential use is the supported mode.
pub struct UploadGate<S> {
    store: S,
    max_per_day: u32,
}

impl<S: KeyValueStore> UploadGate<S> {
    pub fn new(store: S, max_per_day: u32) -> Self {
        Self { store, max_per_day }
    }

    /// Report whether image analysis is currently blocked.
    ///
    /// A missing, unreadable, or malformed record, and any record from a
    /// different calendar day, is replaced by a zero-count record for today
    /// and the check reports not blocked: a new day always grants a fresh
    /// quota, whatever the old count was. Otherwise blocked iff
    /// `count >= max_per_day`.
    pub fn check_limit(&self) -> Result<bool> {
        let today = today();
        match self.current_record() {
            Some(record) if record.date == today => Ok(record.count >= self.max_per_day),
            _ => {
                self.write_record(&UploadRecord::fresh(today))?;
                Ok(false)
            }
        }
    }

    /// Count one completed image analysis.
    ///
    /// Callers run `check_limit` first in the same turn, so the record is
    /// expected to exist and to be for today; a vanished record is replaced
    /// by a fresh one before counting.
    pub fn record_upload(&self) -> Result<()> {
        let mut record = self
            .current_record()
            .unwrap_or_else(|| UploadRecord::fresh(today()));
        record.count += 1;
        self.write_record(&record)
    }

    /// Maximum analyses per day this gate enforces.
    pub fn max_per_day(&self) -> u32 {
        self.max_per_day
    }

    /// The persisted record as currently stored, if it parses.
    ///
    /// Read failures and malformed values come back as `None`: the quota is
    /// renewed early rather than the user locked out by a broken record.
    pub fn current_record(&self) -> Option<UploadRecord> {
        let raw = match self.store.load(UPLOAD_RECORD_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                debug!("Upload record unreadable, treating as absent: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Upload record malformed, treating as absent: {}", e);
                None
            }
        }
    }

    fn write_record(&self, record: &UploadRecord) -> Result<()> {
        let raw = serde_json::to_string(record)?;
        self.store.save(UPLOAD_RECORD_KEY, &raw)
    }
}

/// Current local calendar-day identifier.
///
/// The day boundary is the local date string, not a rolling 24-hour window:
/// activity at 23:59 and 00:01 spans two quota days.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quota::store::MemoryStore;

    #[test]
    fn test_missing_record_is_not_blocked_and_resets() {
        let gate = UploadGate::new(MemoryStore::new(), 3);
        assert!(!gate.check_limit().unwrap());

        let record = gate.current_record().unwrap();
        assert_eq!(record, UploadRecord::fresh(today()));
    }

    #[test]
    fn test_record_upload_increments_by_one() {
        let gate = UploadGate::new(MemoryStore::new(), 3);
        gate.check_limit().unwrap();
        gate.record_upload().unwrap();
        gate.record_upload().unwrap();
        assert_eq!(gate.current_record().unwrap().count, 2);
    }

    #[test]
    fn test_record_upload_without_prior_record() {
        let gate = UploadGate::new(MemoryStore::new(), 3);
        gate.record_upload().unwrap();
        let record = gate.current_record().unwrap();
        assert_eq!(record.count, 1);
        assert_eq!(record.date, today());
    }
}
