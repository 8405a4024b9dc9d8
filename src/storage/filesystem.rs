//! File system operations
//!
//! Stream-level helpers shared by the storage operations. Every stream is
//! owned by the function that opens it and released when it returns.

use log::{debug, error, info};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{StorageError, StorageResult};

/// Create a directory and any missing parents
pub fn create_directory(path: &Path) -> StorageResult<()> {
    fs::create_dir_all(path).map_err(|e| StorageError::io(path, e))
}

/// Create a single directory level if it does not exist yet.
///
/// The parent must already exist.
pub fn ensure_directory(path: &Path) -> StorageResult<()> {
    if path.exists() {
        return Ok(());
    }
    match fs::create_dir(path) {
        Ok(()) => {
            debug!("Created directory {}", path.display());
            Ok(())
        }
        // Lost a race with another creator
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => {
            error!("Failed to create directory {}: {}", path.display(), e);
            Err(StorageError::io(path, e))
        }
    }
}

/// Write `data` to `path`, truncating any existing file.
pub fn write_bytes(path: &Path, data: &[u8]) -> StorageResult<()> {
    write_with(path, |out| out.write_all(data).map_err(|e| StorageError::io(path, e)))?;
    info!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

/// Create `path` and hand a buffered writer to `fill`, then flush it.
///
/// Anything `fill` already wrote stays on disk if it fails.
pub fn write_with<F>(path: &Path, fill: F) -> StorageResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> StorageResult<()>,
{
    let file = File::create(path).map_err(|e| StorageError::io(path, e))?;
    let mut out = BufWriter::new(file);
    fill(&mut out)?;
    out.flush().map_err(|e| StorageError::io(path, e))
}

/// Read all of `path` through a transfer buffer of `buffer_size` bytes.
pub fn read_bytes(path: &Path, buffer_size: usize) -> StorageResult<Vec<u8>> {
    let file = File::open(path).map_err(|e| StorageError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut buffer = vec![0u8; buffer_size.max(1)];
    let mut data = Vec::new();

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(StorageError::io(path, e)),
        };
        data.extend_from_slice(&buffer[..n]);
    }

    debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

/// Check if a file or directory exists
pub fn file_exists(path: &Path) -> bool {
    path.exists()
}
