//! Private-directory resolution
//!
//! A [`StorageContext`] stands in for the embedding application's handle and
//! resolves its app-scoped "files" and "cache" areas on the external volume.

use std::path::{Path, PathBuf};

use crate::config::StorageConfig;

/// Platform private-directory resolver
pub trait StorageContext {
    /// The persistent private area, optionally subdivided by `kind`.
    fn files_dir(&self, kind: Option<&str>) -> Option<PathBuf>;

    /// The reclaimable private area.
    fn cache_dir(&self) -> Option<PathBuf>;
}

/// Private directories laid out as `{root}/Android/data/{package}/{files,cache}`.
#[derive(Debug, Clone)]
pub struct AppDataDirs {
    base: PathBuf,
}

impl AppDataDirs {
    /// Lay out the private directories of `package` on the volume at `root`
    pub fn on_volume(root: &Path, package: &str) -> Self {
        Self {
            base: root.join("Android").join("data").join(package),
        }
    }

    /// Private directories for the configured root and package
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::on_volume(&config.root_path(), &config.package)
    }

    /// `{root}/Android/data/{package}`
    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl StorageContext for AppDataDirs {
    fn files_dir(&self, kind: Option<&str>) -> Option<PathBuf> {
        let files = self.base.join("files");
        match kind {
            Some(kind) if !kind.is_empty() => Some(files.join(kind)),
            _ => Some(files),
        }
    }

    fn cache_dir(&self) -> Option<PathBuf> {
        Some(self.base.join("cache"))
    }
}
