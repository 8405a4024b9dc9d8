//! Path validation
//!
//! Joins caller-supplied relative paths onto a base directory.

use std::path::{Component, Path, PathBuf};

use crate::error::StorageError;

/// Join `relative` onto `base`, rejecting anything that would leave `base`.
///
/// The check is lexical: `.` is dropped, `..` pops a previously pushed
/// segment, and absolute paths or a `..` past the base are refused.
pub fn resolve_within(base: &Path, relative: &str) -> Result<PathBuf, StorageError> {
    let mut segments: Vec<&std::ffi::OsStr> = Vec::new();

    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => segments.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if segments.pop().is_none() {
                    return Err(StorageError::PathEscape(relative.to_string()));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(StorageError::PathEscape(relative.to_string()));
            }
        }
    }

    let mut resolved = base.to_path_buf();
    resolved.extend(segments);
    Ok(resolved)
}

/// Join `relative` onto `base`, enforcing containment only when asked to.
pub fn join_relative(
    base: &Path,
    relative: &str,
    enforce_containment: bool,
) -> Result<PathBuf, StorageError> {
    if enforce_containment {
        resolve_within(base, relative)
    } else {
        // Strip leading separators so the join stays under base, as string concatenation would.
        Ok(base.join(relative.trim_start_matches(['/', '\\'])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_join() {
        let path = resolve_within(Path::new("/sd"), "Music/song.mp3").unwrap();
        assert_eq!(path, PathBuf::from("/sd/Music/song.mp3"));
    }

    #[test]
    fn test_dots_are_normalised() {
        let path = resolve_within(Path::new("/sd"), "./a/../b/c.bin").unwrap();
        assert_eq!(path, PathBuf::from("/sd/b/c.bin"));
    }

    #[test]
    fn test_escape_is_rejected() {
        assert!(matches!(
            resolve_within(Path::new("/sd"), "../etc/passwd"),
            Err(StorageError::PathEscape(_))
        ));
        assert!(matches!(
            resolve_within(Path::new("/sd"), "a/../../b"),
            Err(StorageError::PathEscape(_))
        ));
    }

    #[test]
    fn test_absolute_is_rejected() {
        assert!(resolve_within(Path::new("/sd"), "/etc/passwd").is_err());
    }

    #[test]
    fn test_empty_resolves_to_base() {
        assert_eq!(resolve_within(Path::new("/sd"), "").unwrap(), PathBuf::from("/sd"));
    }

    #[test]
    fn test_permissive_join() {
        let path = join_relative(Path::new("/sd"), "../shared/x", false).unwrap();
        assert_eq!(path, PathBuf::from("/sd/../shared/x"));
        let path = join_relative(Path::new("/sd"), "/abs/x", false).unwrap();
        assert_eq!(path, PathBuf::from("/sd/abs/x"));
    }
}
