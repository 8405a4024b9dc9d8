//! Helpers for a media application's external storage.
//!
//! Checks whether the removable volume is mounted, reports its capacity, and
//! reads or writes byte payloads and images in public, custom and app-private
//! locations.

pub mod codec;
pub mod config;
pub mod error;
pub mod platform;
pub mod storage;
pub mod utils;

pub use codec::ImageEncoding;
pub use config::StorageConfig;
pub use error::{ErrorKind, StorageError, StorageResult};
pub use platform::{
    AppDataDirs, BlockStats, DirectoryVolume, FixedVolume, FsStats, MountState, PublicDirectory,
    StatVfs, StorageContext, Volume,
};
pub use storage::{
    ImageWrite, SdCard, SpaceReport, ensure_directory, read_file, save_bitmap_file,
    save_bitmap_to_sd,
};
