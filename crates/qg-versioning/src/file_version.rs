//! ---
//! qg_section: "01-versioning"
//! qg_subsection: "module"
//! qg_type: "source"
//! qg_scope: "code"
//! qg_description: "Four-part numeric file version used in resource blocks."
//! qg_version: "v0.1.0"
//! qg_owner: "tbd"
//! ---
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::VersionError;

/// Four-part numeric version as stored in a fixed file-info block.
///
/// Ordering is lexicographic over `(major, minor, revision, build)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FileVersion {
    /// Major version.
    pub major: u16,
    /// Minor version.
    pub minor: u16,
    /// Revision (third component).
    pub revision: u16,
    /// Build number (fourth component).
    pub build: u16,
}

impl FileVersion {
    /// Create a new version from its four components.
    #[inline]
    pub const fn new(major: u16, minor: u16, revision: u16, build: u16) -> Self {
        Self {
            major,
            minor,
            revision,
            build,
        }
    }

    /// Comma separated form used by `FILEVERSION`/`PRODUCTVERSION` statements.
    #[must_use]
    pub fn resource_tuple(&self) -> String {
        format!(
            "{},{},{},{}",
            self.major, self.minor, self.revision, self.build
        )
    }

    /// High-order word pair (`major << 16 | minor`).
    #[must_use]
    pub const fn ms(&self) -> u32 {
        ((self.major as u32) << 16) | self.minor as u32
    }

    /// Low-order word pair (`revision << 16 | build`).
    #[must_use]
    pub const fn ls(&self) -> u32 {
        ((self.revision as u32) << 16) | self.build as u32
    }

    /// Rebuild a version from the packed words of a fixed file-info block.
    #[must_use]
    pub const fn from_words(ms: u32, ls: u32) -> Self {
        Self::new(
            (ms >> 16) as u16,
            (ms & 0xFFFF) as u16,
            (ls >> 16) as u16,
            (ls & 0xFFFF) as u16,
        )
    }
}

impl fmt::Display for FileVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.revision, self.build
        )
    }
}

impl FromStr for FileVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 4 {
            return Err(VersionError::PartCount {
                input: s.to_owned(),
                found: parts.len(),
            });
        }
        let mut values = [0u16; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(VersionError::InvalidPart {
                    input: s.to_owned(),
                    part: (*part).to_owned(),
                });
            }
            *slot = part.parse().map_err(|_| VersionError::OutOfRange {
                input: s.to_owned(),
                part: (*part).to_owned(),
            })?;
        }
        let [major, minor, revision, build] = values;
        Ok(Self::new(major, minor, revision, build))
    }
}

impl Serialize for FileVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FileVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_dotted_and_resource_forms() {
        let version = FileVersion::new(1, 23, 100, 0);
        assert_eq!(version.to_string(), "1.23.100.0");
        assert_eq!(version.resource_tuple(), "1,23,100,0");
    }

    #[test]
    fn packs_fixed_file_info_words() {
        let version = FileVersion::new(1, 23, 100, 0);
        assert_eq!(version.ms(), 0x0001_0017);
        assert_eq!(version.ls(), 0x0064_0000);
        assert_eq!(FileVersion::from_words(version.ms(), version.ls()), version);
    }

    #[test]
    fn parses_dotted_form() {
        let version: FileVersion = "1.22.100.1".parse().expect("valid version");
        assert_eq!(version, FileVersion::new(1, 22, 100, 1));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            "1.2.3".parse::<FileVersion>(),
            Err(VersionError::PartCount { found: 3, .. })
        ));
        assert!(matches!(
            "1..3.4".parse::<FileVersion>(),
            Err(VersionError::InvalidPart { .. })
        ));
        assert!(matches!(
            "1.2.3.x".parse::<FileVersion>(),
            Err(VersionError::InvalidPart { .. })
        ));
        assert!(matches!(
            "1.2.3.-4".parse::<FileVersion>(),
            Err(VersionError::InvalidPart { .. })
        ));
        assert!(matches!(
            "1.2.3.70000".parse::<FileVersion>(),
            Err(VersionError::OutOfRange { .. })
        ));
    }

    #[test]
    fn orders_by_component() {
        let qe3 = FileVersion::new(1, 22, 100, 1);
        let product = FileVersion::new(1, 23, 100, 0);
        assert!(qe3 < product);
        assert!(FileVersion::new(1, 13, 110, 0) > FileVersion::new(1, 13, 103, 0));
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&FileVersion::new(1, 14, 110, 0)).expect("serialize");
        assert_eq!(json, "\"1.14.110.0\"");
        let back: FileVersion = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, FileVersion::new(1, 14, 110, 0));
    }
}
