//! Storage operations
//!
//! Reads, writes, path queries and deletion against the external volume and
//! the caller's private directories.

use image::DynamicImage;
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use super::SdCard;
use super::filesystem::{create_directory, file_exists, read_bytes, write_bytes, write_with};
use super::results::ImageWrite;
use super::validation::{join_relative, resolve_within};
use crate::codec::{self, ImageEncoding, SD_JPEG_QUALITY};
use crate::config::DEFAULT_TRANSFER_BUFFER_SIZE;
use crate::error::handlers::handle_error;
use crate::error::{StorageError, StorageResult};
use crate::platform::StorageContext;

impl SdCard {
    /// Save `data` to `{root}/{category}/{filename}`.
    ///
    /// `category` is normally one of [`crate::platform::PublicDirectory`].
    pub fn save_to_public_dir(
        &self,
        data: &[u8],
        category: impl AsRef<str>,
        filename: &str,
    ) -> StorageResult<()> {
        self.save_under_root(data, category.as_ref(), filename)
            .inspect_err(|e| handle_error("save_to_public_dir", e))
    }

    /// Save `data` to `{root}/{relative_dir}/{filename}`
    pub fn save_to_custom_dir(
        &self,
        data: &[u8],
        relative_dir: &str,
        filename: &str,
    ) -> StorageResult<()> {
        self.save_under_root(data, relative_dir, filename)
            .inspect_err(|e| handle_error("save_to_custom_dir", e))
    }

    /// Save `data` into the private files area, under the `kind` subdirectory
    pub fn save_to_private_files_dir(
        &self,
        data: &[u8],
        kind: Option<&str>,
        filename: &str,
        ctx: &dyn StorageContext,
    ) -> StorageResult<()> {
        self.mounted_root()
            .and_then(|_| self.private_files_dir(ctx, kind))
            .and_then(|dir| self.save_in(&dir, filename, data))
            .inspect_err(|e| handle_error("save_to_private_files_dir", e))
    }

    /// Save `data` into the private cache area
    pub fn save_to_private_cache_dir(
        &self,
        data: &[u8],
        filename: &str,
        ctx: &dyn StorageContext,
    ) -> StorageResult<()> {
        self.mounted_root()
            .and_then(|_| ctx.cache_dir().ok_or(StorageError::NoPrivateDir))
            .and_then(|dir| self.save_in(&dir, filename, data))
            .inspect_err(|e| handle_error("save_to_private_cache_dir", e))
    }

    /// Encode `image` into the private cache area.
    ///
    /// The encoding follows the filename: `.jpg`/`.JPG` is JPEG at quality 100,
    /// `.png`/`.PNG` is PNG. Any other suffix still creates the file, but
    /// leaves it empty and reports [`ImageWrite::Unsupported`].
    pub fn save_image_to_private_cache_dir(
        &self,
        image: &DynamicImage,
        filename: &str,
        ctx: &dyn StorageContext,
    ) -> StorageResult<ImageWrite> {
        self.mounted_root()
            .and_then(|_| ctx.cache_dir().ok_or(StorageError::NoPrivateDir))
            .and_then(|dir| {
                create_directory(&dir)?;
                let path = self.join(&dir, filename)?;
                let encoding = ImageEncoding::from_filename(filename);

                write_with(&path, |out| match encoding {
                    Some(encoding) => encoding.encode(image, out).map_err(StorageError::Encode),
                    None => Ok(()),
                })?;

                match encoding {
                    Some(encoding) => {
                        info!("Saved {:?} image to {}", encoding, path.display());
                        Ok(ImageWrite::Encoded(encoding))
                    }
                    None => {
                        warn!("No encoding for {}; left the file empty", path.display());
                        Ok(ImageWrite::Unsupported)
                    }
                }
            })
            .inspect_err(|e| handle_error("save_image_to_private_cache_dir", e))
    }

    /// Read `{root}/{relative_path}` into memory
    pub fn load_bytes(&self, relative_path: &str) -> StorageResult<Vec<u8>> {
        self.load(relative_path)
            .inspect_err(|e| handle_error("load_bytes", e))
    }

    /// Read and decode the image at `{root}/{relative_path}`
    pub fn load_image(&self, relative_path: &str) -> StorageResult<DynamicImage> {
        self.load(relative_path)
            .and_then(|data| codec::decode(&data).map_err(StorageError::Decode))
            .inspect_err(|e| handle_error("load_image", e))
    }

    /// `{root}/{category}`, or `None` when unmounted
    pub fn public_dir_path(&self, category: impl AsRef<str>) -> Option<PathBuf> {
        let root = self.mounted_root().ok()?;
        self.join(&root, category.as_ref()).ok()
    }

    /// The private cache area, or `None` when unmounted
    pub fn private_cache_dir_path(&self, ctx: &dyn StorageContext) -> Option<PathBuf> {
        self.mounted_root().ok()?;
        ctx.cache_dir()
    }

    /// The private files area for `kind`, or `None` when unmounted
    pub fn private_files_dir_path(
        &self,
        ctx: &dyn StorageContext,
        kind: Option<&str>,
    ) -> Option<PathBuf> {
        self.mounted_root().ok()?;
        self.private_files_dir(ctx, kind)
            .inspect_err(|e| handle_error("private_files_dir_path", e))
            .ok()
    }

    /// Whether `path` exists. Always false while the volume is unmounted.
    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.is_mounted() && file_exists(path.as_ref())
    }

    /// Delete `{root}/{relative_path}`.
    ///
    /// False when unmounted, when nothing is there, when the path names the
    /// volume root itself, or when deletion fails.
    pub fn remove_file(&self, relative_path: &str) -> bool {
        let (root, path) = match self
            .mounted_root()
            .and_then(|root| self.join(&root, relative_path).map(|path| (root, path)))
        {
            Ok(resolved) => resolved,
            Err(e) => {
                handle_error("remove_file", &e);
                return false;
            }
        };

        if !path.exists() {
            return false;
        }

        if is_same_location(&root, &path) {
            warn!("Refusing to delete the volume root {}", root.display());
            return false;
        }

        let result = if path.is_dir() {
            fs::remove_dir(&path)
        } else {
            fs::remove_file(&path)
        };

        match result {
            Ok(()) => {
                info!("Deleted {}", path.display());
                true
            }
            Err(e) => {
                error!("Failed to delete {}: {}", path.display(), e);
                false
            }
        }
    }

    fn save_under_root(&self, data: &[u8], dir: &str, filename: &str) -> StorageResult<()> {
        let root = self.mounted_root()?;
        let dir = self.join(&root, dir)?;
        self.save_in(&dir, filename, data)
    }

    fn save_in(&self, dir: &Path, filename: &str, data: &[u8]) -> StorageResult<()> {
        create_directory(dir)?;
        let path = self.join(dir, filename)?;
        write_bytes(&path, data)
    }

    fn load(&self, relative_path: &str) -> StorageResult<Vec<u8>> {
        let root = self.mounted_root()?;
        if !root.exists() {
            create_directory(&root)?;
        }
        let path = self.join(&root, relative_path)?;
        read_bytes(&path, self.transfer_buffer_size)
    }

    /// Resolve the private files area for `kind`, keeping `kind` inside it.
    fn private_files_dir(
        &self,
        ctx: &dyn StorageContext,
        kind: Option<&str>,
    ) -> StorageResult<PathBuf> {
        if self.enforce_containment {
            if let Some(kind) = kind {
                resolve_within(Path::new(""), kind)?;
            }
        }
        ctx.files_dir(kind).ok_or(StorageError::NoPrivateDir)
    }

    fn join(&self, base: &Path, relative: &str) -> StorageResult<PathBuf> {
        join_relative(base, relative, self.enforce_containment)
    }
}

/// Whether `a` and `b` name the same directory entry, after resolving `.`/`..` and links.
fn is_same_location(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Write `image` as PNG to `{dir}/{filename}`.
///
/// Does not check the mount state or create `dir`.
pub fn save_bitmap_file(dir: &Path, filename: &str, image: &DynamicImage) -> StorageResult<()> {
    let path = dir.join(filename);
    write_with(&path, |out| {
        ImageEncoding::Png
            .encode(image, out)
            .map_err(StorageError::Encode)
    })
    .inspect_err(|e| handle_error("save_bitmap_file", e))
}

/// Write `image` as JPEG (quality 80) to `{dir}/{filename}`, consuming it.
///
/// Does not check the mount state or create `dir`.
pub fn save_bitmap_to_sd(dir: &Path, filename: &str, image: DynamicImage) -> StorageResult<()> {
    let path = dir.join(filename);
    let result = write_with(&path, |out| {
        ImageEncoding::Jpeg {
            quality: SD_JPEG_QUALITY,
        }
        .encode(&image, out)
        .map_err(StorageError::Encode)
    });
    drop(image);
    result.inspect_err(|e| handle_error("save_bitmap_to_sd", e))
}

/// Read a file that has already been resolved, without a mount check
pub fn read_file(path: &Path) -> StorageResult<Vec<u8>> {
    if !path.is_file() {
        let err = StorageError::NotAFile(path.to_path_buf());
        handle_error("read_file", &err);
        return Err(err);
    }
    read_bytes(path, DEFAULT_TRANSFER_BUFFER_SIZE).inspect_err(|e| handle_error("read_file", e))
}
