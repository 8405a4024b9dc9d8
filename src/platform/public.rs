//! Standard public directories
//!
//! The category folders the platform creates on the volume root and shares
//! between applications.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicDirectory {
    Music,
    Podcasts,
    Ringtones,
    Alarms,
    Notifications,
    Pictures,
    Movies,
    Download,
    Dcim,
    Documents,
}

impl PublicDirectory {
    pub const ALL: [PublicDirectory; 10] = [
        PublicDirectory::Music,
        PublicDirectory::Podcasts,
        PublicDirectory::Ringtones,
        PublicDirectory::Alarms,
        PublicDirectory::Notifications,
        PublicDirectory::Pictures,
        PublicDirectory::Movies,
        PublicDirectory::Download,
        PublicDirectory::Dcim,
        PublicDirectory::Documents,
    ];

    /// Folder name under the volume root
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicDirectory::Music => "Music",
            PublicDirectory::Podcasts => "Podcasts",
            PublicDirectory::Ringtones => "Ringtones",
            PublicDirectory::Alarms => "Alarms",
            PublicDirectory::Notifications => "Notifications",
            PublicDirectory::Pictures => "Pictures",
            PublicDirectory::Movies => "Movies",
            PublicDirectory::Download => "Download",
            PublicDirectory::Dcim => "DCIM",
            PublicDirectory::Documents => "Documents",
        }
    }

    /// Look up a category by its folder name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| dir.as_str() == name)
    }
}

impl AsRef<str> for PublicDirectory {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PublicDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for dir in PublicDirectory::ALL {
            assert_eq!(PublicDirectory::from_name(dir.as_str()), Some(dir));
        }
    }

    #[test]
    fn test_dcim_is_upper_case() {
        assert_eq!(PublicDirectory::Dcim.to_string(), "DCIM");
        assert_eq!(PublicDirectory::from_name("Dcim"), None);
    }
}
