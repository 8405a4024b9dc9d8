//! Storage result types
//!
//! Defines result structures returned by storage operations.

use crate::codec::ImageEncoding;
use crate::platform::BlockStats;

/// Capacity of the volume in megabytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpaceReport {
    pub total_mb: u64,
    /// Includes blocks reserved for the superuser
    pub free_mb: u64,
    pub available_mb: u64,
}

impl From<BlockStats> for SpaceReport {
    fn from(stats: BlockStats) -> Self {
        Self {
            total_mb: stats.total_mb(),
            free_mb: stats.free_mb(),
            available_mb: stats.available_mb(),
        }
    }
}

/// Outcome of saving an image whose encoding is chosen by filename
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageWrite {
    Encoded(ImageEncoding),
    /// The suffix matched no encoding; the file was created empty.
    Unsupported,
}
