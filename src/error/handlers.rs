//! Error handlers
//!
//! Collapses typed results into the boolean / optional contract some callers expect.

use crate::error::types::StorageError;
use log::{error, warn};

/// Log a storage error raised by `op`
pub fn handle_error(op: &str, err: &StorageError) {
    match err {
        StorageError::Unmounted => warn!("{op}: {err}"),
        _ => error!("{op} failed ({}): {err}", err.kind()),
    }
}

/// Returns `true` on success, logging and returning `false` otherwise.
pub fn succeeded<T>(op: &str, result: Result<T, StorageError>) -> bool {
    ok_or_log(op, result).is_some()
}

/// Returns the value on success, logging and returning `None` otherwise.
pub fn ok_or_log<T>(op: &str, result: Result<T, StorageError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            handle_error(op, &e);
            None
        }
    }
}
