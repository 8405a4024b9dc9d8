//! Filesystem statistics providers

use std::io;
use std::path::Path;

/// Bytes per reported megabyte
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Block statistics for the filesystem holding a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockStats {
    pub block_count: u64,
    pub block_size: u64,
    /// Free blocks, including those reserved for the superuser
    pub free_blocks: u64,
    /// Free blocks usable by unprivileged processes
    pub available_blocks: u64,
}

impl BlockStats {
    /// Capacity in whole megabytes
    pub fn total_mb(&self) -> u64 {
        blocks_to_mb(self.block_count, self.block_size)
    }

    /// Free space in whole megabytes, reserved blocks included
    pub fn free_mb(&self) -> u64 {
        blocks_to_mb(self.free_blocks, self.block_size)
    }

    /// Unprivileged free space in whole megabytes
    pub fn available_mb(&self) -> u64 {
        blocks_to_mb(self.available_blocks, self.block_size)
    }
}

fn blocks_to_mb(blocks: u64, block_size: u64) -> u64 {
    let mb = (u128::from(blocks) * u128::from(block_size)) / u128::from(BYTES_PER_MB);
    u64::try_from(mb).unwrap_or(u64::MAX)
}

/// Platform filesystem-stats provider
pub trait FsStats: Send + Sync {
    /// Statistics for the filesystem that holds `path`.
    fn block_stats(&self, path: &Path) -> io::Result<BlockStats>;
}

/// Statistics read through `statvfs(3)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatVfs;

#[cfg(unix)]
impl FsStats for StatVfs {
    fn block_stats(&self, path: &Path) -> io::Result<BlockStats> {
        let stat = nix::sys::statvfs::statvfs(path).map_err(io::Error::from)?;
        Ok(BlockStats {
            block_count: stat.blocks() as u64,
            // f_blocks and friends are counted in fragment-size units
            block_size: stat.fragment_size() as u64,
            free_blocks: stat.blocks_free() as u64,
            available_blocks: stat.blocks_available() as u64,
        })
    }
}

#[cfg(not(unix))]
impl FsStats for StatVfs {
    fn block_stats(&self, _path: &Path) -> io::Result<BlockStats> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "statvfs is not available on this platform",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mb_conversion() {
        let stats = BlockStats {
            block_count: 2048,
            block_size: 4096,
            free_blocks: 1024,
            available_blocks: 768,
        };
        assert_eq!(stats.total_mb(), 8);
        assert_eq!(stats.free_mb(), 4);
        assert_eq!(stats.available_mb(), 3);
    }

    #[test]
    fn test_mb_conversion_truncates() {
        let stats = BlockStats {
            block_count: 255,
            block_size: 4096,
            ..Default::default()
        };
        assert_eq!(stats.total_mb(), 0);
    }

    #[test]
    fn test_mb_conversion_does_not_overflow() {
        let stats = BlockStats {
            block_count: u64::MAX,
            block_size: 4096,
            ..Default::default()
        };
        assert_eq!(stats.total_mb(), u64::MAX / 256);
    }

    #[test]
    fn test_mb_conversion_saturates() {
        let stats = BlockStats {
            block_count: u64::MAX,
            block_size: 4 * BYTES_PER_MB,
            free_blocks: u64::MAX / 2,
            available_blocks: 3,
        };
        assert_eq!(stats.total_mb(), u64::MAX);
        assert_eq!(stats.free_mb(), u64::MAX);
        assert_eq!(stats.available_mb(), 12);
    }

    #[cfg(unix)]
    #[test]
    fn test_statvfs_on_tempdir() {
        let dir = tempfile::tempdir().unwrap();
        let stats = StatVfs.block_stats(dir.path()).unwrap();
        assert!(stats.block_size > 0);
        assert!(stats.free_blocks <= stats.block_count);
        assert!(stats.available_blocks <= stats.free_blocks);
    }
}
