//! External storage access
//!
//! [`SdCard`] guards every volume-relative operation behind the mount check and
//! resolves paths against the volume root afresh on each call.

pub mod capacity;
pub mod filesystem;
pub mod operations;
pub mod results;
pub mod validation;

use std::path::PathBuf;

use crate::config::{DEFAULT_TRANSFER_BUFFER_SIZE, StorageConfig};
use crate::error::{StorageError, StorageResult};
use crate::platform::{DirectoryVolume, FsStats, StatVfs, Volume};

pub use filesystem::ensure_directory;
pub use operations::{read_file, save_bitmap_file, save_bitmap_to_sd};
pub use results::{ImageWrite, SpaceReport};
pub use validation::{join_relative, resolve_within};

/// Helpers over one external storage volume.
pub struct SdCard {
    volume: Box<dyn Volume>,
    stats: Box<dyn FsStats>,
    transfer_buffer_size: usize,
    enforce_containment: bool,
}

impl SdCard {
    /// Build a card over `volume`, reading capacity through `stats`
    pub fn new(volume: impl Volume + 'static, stats: impl FsStats + 'static) -> Self {
        Self {
            volume: Box::new(volume),
            stats: Box::new(stats),
            transfer_buffer_size: DEFAULT_TRANSFER_BUFFER_SIZE,
            enforce_containment: true,
        }
    }

    /// A directory-backed volume at `config.root` with `statvfs` statistics
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(DirectoryVolume::new(config.root_path()), StatVfs)
            .with_transfer_buffer_size(config.transfer_buffer_size)
            .with_containment(config.enforce_containment)
    }

    /// Chunk size for reads; zero is raised to one byte
    pub fn with_transfer_buffer_size(mut self, size: usize) -> Self {
        self.transfer_buffer_size = size.max(1);
        self
    }

    /// Toggle rejection of relative paths that climb out of their base
    pub fn with_containment(mut self, enforce: bool) -> Self {
        self.enforce_containment = enforce;
        self
    }

    fn mounted_root(&self) -> StorageResult<PathBuf> {
        if self.volume.state().is_mounted() {
            Ok(self.volume.root())
        } else {
            Err(StorageError::Unmounted)
        }
    }
}
