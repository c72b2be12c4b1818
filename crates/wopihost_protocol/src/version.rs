//! Item version.

use std::fmt;
use std::str::FromStr;

/// Version of a hosted file, rendered as `"<major>.<minor>"`.
///
/// WOPI clients treat the rendered form as an opaque string; they only
/// compare it for equality to detect out-of-band content changes. The
/// minor component is incremented on every content replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ItemVersion {
    /// Major version component.
    pub major: u32,
    /// Minor version component.
    pub minor: u32,
}

impl ItemVersion {
    /// The initial version of a never-updated file, `"0.0"`.
    pub const ZERO: Self = Self { major: 0, minor: 0 };

    /// Creates a version from its components.
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Returns the version that follows this one after a content update.
    #[must_use]
    pub const fn bumped(self) -> Self {
        Self {
            major: self.major,
            minor: self.minor + 1,
        }
    }
}

impl fmt::Display for ItemVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ItemVersion {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (major, minor) = s.split_once('.').unwrap_or((s, "0"));
        Ok(Self {
            major: major.parse()?,
            minor: minor.parse()?,
        })
    }
}
