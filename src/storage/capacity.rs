//! Mount and capacity queries

use log::error;
use std::path::PathBuf;

use super::SdCard;
use super::results::SpaceReport;
use crate::error::{StorageError, StorageResult};
use crate::platform::{BlockStats, MountState};

impl SdCard {
    /// True iff the volume is mounted read-write
    pub fn is_mounted(&self) -> bool {
        self.mount_state().is_mounted()
    }

    /// Raw state reported by the volume provider
    pub fn mount_state(&self) -> MountState {
        self.volume.state()
    }

    /// Absolute root of the volume, or `None` when unmounted
    pub fn root_path(&self) -> Option<PathBuf> {
        self.mounted_root().ok()
    }

    /// Total, free and available space from a single statistics call
    pub fn space_report(&self) -> StorageResult<SpaceReport> {
        self.block_stats().map(SpaceReport::from)
    }

    /// Total capacity in MB; 0 when unmounted or unreadable
    pub fn total_space_mb(&self) -> u64 {
        self.stats_or_zero(|stats| stats.total_mb())
    }

    /// Free space in MB, counting blocks reserved for the superuser
    pub fn free_space_mb(&self) -> u64 {
        self.stats_or_zero(|stats| stats.free_mb())
    }

    /// Space in MB usable by the application
    pub fn available_space_mb(&self) -> u64 {
        self.stats_or_zero(|stats| stats.available_mb())
    }

    fn block_stats(&self) -> StorageResult<BlockStats> {
        let root = self.mounted_root()?;
        self.stats
            .block_stats(&root)
            .map_err(|e| StorageError::io(&root, e))
    }

    fn stats_or_zero(&self, pick: impl FnOnce(&BlockStats) -> u64) -> u64 {
        match self.block_stats() {
            Ok(stats) => pick(&stats),
            Err(StorageError::Unmounted) => 0,
            Err(e) => {
                error!("Failed to read filesystem statistics: {e}");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{FixedVolume, FsStats};
    use std::io;
    use std::path::Path;

    struct FakeStats(BlockStats);

    impl FsStats for FakeStats {
        fn block_stats(&self, _path: &Path) -> io::Result<BlockStats> {
            Ok(self.0)
        }
    }

    struct BrokenStats;

    impl FsStats for BrokenStats {
        fn block_stats(&self, _path: &Path) -> io::Result<BlockStats> {
            Err(io::Error::new(io::ErrorKind::Other, "stat failed"))
        }
    }

    fn stats() -> BlockStats {
        BlockStats {
            block_count: 4 * 256 * 1024,
            block_size: 4096,
            free_blocks: 2 * 256 * 1024,
            available_blocks: 256 * 1024,
        }
    }

    #[test]
    fn test_capacity_when_mounted() {
        let card = SdCard::new(FixedVolume::new("/sd", MountState::Mounted), FakeStats(stats()));
        assert_eq!(card.total_space_mb(), 4096);
        assert_eq!(card.free_space_mb(), 2048);
        assert_eq!(card.available_space_mb(), 1024);
        assert_eq!(
            card.space_report().unwrap(),
            SpaceReport {
                total_mb: 4096,
                free_mb: 2048,
                available_mb: 1024,
            }
        );
    }

    #[test]
    fn test_capacity_zero_when_unmounted() {
        let card = SdCard::new(FixedVolume::new("/sd", MountState::Unmounted), FakeStats(stats()));
        assert!(!card.is_mounted());
        assert_eq!(card.root_path(), None);
        assert_eq!(card.total_space_mb(), 0);
        assert_eq!(card.free_space_mb(), 0);
        assert_eq!(card.available_space_mb(), 0);
        assert!(matches!(card.space_report(), Err(StorageError::Unmounted)));
    }

    #[test]
    fn test_read_only_mount_is_not_mounted() {
        let card = SdCard::new(
            FixedVolume::new("/sd", MountState::MountedReadOnly),
            FakeStats(stats()),
        );
        assert_eq!(card.mount_state(), MountState::MountedReadOnly);
        assert!(!card.is_mounted());
        assert_eq!(card.total_space_mb(), 0);
    }

    #[test]
    fn test_stats_failure_reads_as_zero() {
        let card = SdCard::new(FixedVolume::new("/sd", MountState::Mounted), BrokenStats);
        assert_eq!(card.total_space_mb(), 0);
        assert!(matches!(card.space_report(), Err(StorageError::Io { .. })));
    }

    #[test]
    fn test_root_path_when_mounted() {
        let card = SdCard::new(FixedVolume::new("/sd", MountState::Mounted), FakeStats(stats()));
        assert_eq!(card.root_path(), Some(PathBuf::from("/sd")));
    }
}
