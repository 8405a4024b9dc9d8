//! Platform collaborators
//!
//! Traits for the host services the storage helpers consume, with
//! host-filesystem implementations.

pub mod context;
pub mod public;
pub mod stats;
pub mod volume;

pub use context::{AppDataDirs, StorageContext};
pub use public::PublicDirectory;
pub use stats::{BlockStats, FsStats, StatVfs};
pub use volume::{DirectoryVolume, FixedVolume, MountState, Volume};
