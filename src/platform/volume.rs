//! Volume state providers
//!
//! Report whether the external volume is attached and where its root lives.

use std::fmt;
use std::path::{Path, PathBuf};

/// State of the external storage volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountState {
    Mounted,
    MountedReadOnly,
    Unmounted,
    Removed,
    Checking,
    NoFilesystem,
    Unmountable,
    Shared,
    BadRemoval,
    Ejecting,
    Unknown,
}

impl MountState {
    /// The platform's string constant for this state
    pub fn as_str(&self) -> &'static str {
        match self {
            MountState::Mounted => "mounted",
            MountState::MountedReadOnly => "mounted_ro",
            MountState::Unmounted => "unmounted",
            MountState::Removed => "removed",
            MountState::Checking => "checking",
            MountState::NoFilesystem => "nofs",
            MountState::Unmountable => "unmountable",
            MountState::Shared => "shared",
            MountState::BadRemoval => "bad_removal",
            MountState::Ejecting => "ejecting",
            MountState::Unknown => "unknown",
        }
    }

    /// Only a read-write mount satisfies the storage precondition.
    pub fn is_mounted(&self) -> bool {
        matches!(self, MountState::Mounted)
    }
}

impl fmt::Display for MountState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform storage-state provider
pub trait Volume: Send + Sync {
    /// Current mount state; queried on every operation.
    fn state(&self) -> MountState;

    /// Absolute path of the volume root.
    fn root(&self) -> PathBuf;
}

/// A volume backed by a directory on the host filesystem.
///
/// Missing directory reads as `Removed`, a read-only one as `MountedReadOnly`.
#[derive(Debug, Clone)]
pub struct DirectoryVolume {
    root: PathBuf,
}

impl DirectoryVolume {
    /// Track the directory at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn inspect(path: &Path) -> MountState {
        match path.metadata() {
            Ok(meta) if !meta.is_dir() => MountState::NoFilesystem,
            Ok(meta) if meta.permissions().readonly() => MountState::MountedReadOnly,
            Ok(_) => MountState::Mounted,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => MountState::Removed,
            Err(_) => MountState::Unknown,
        }
    }
}

impl Volume for DirectoryVolume {
    fn state(&self) -> MountState {
        Self::inspect(&self.root)
    }

    fn root(&self) -> PathBuf {
        self.root.clone()
    }
}

/// A volume whose state is fixed by the caller.
#[derive(Debug, Clone)]
pub struct FixedVolume {
    root: PathBuf,
    state: MountState,
}

impl FixedVolume {
    /// A volume at `root` that always reports `state`
    pub fn new(root: impl Into<PathBuf>, state: MountState) -> Self {
        Self {
            root: root.into(),
            state,
        }
    }
}

impl Volume for FixedVolume {
    fn state(&self) -> MountState {
        self.state
    }

    fn root(&self) -> PathBuf {
        self.root.clone()
    }
}
