//! Packed game version numbers
//!
//! Blueprints store the game version as one 64-bit integer with four
//! 16-bit parts, most significant first.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Game version split into its four parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GameVersion {
    /// Major version
    pub major: u16,
    /// Minor version
    pub minor: u16,
    /// Patch version
    pub patch: u16,
    /// Build number, usually 0
    pub build: u16,
}

impl GameVersion {
    /// Split a packed version number
    pub const fn from_packed(packed: u64) -> Self {
        Self {
            major: (packed >> 48) as u16,
            minor: (packed >> 32) as u16,
            patch: (packed >> 16) as u16,
            build: packed as u16,
        }
    }

    /// Pack the four parts back into one number
    pub const fn to_packed(self) -> u64 {
        ((self.major as u64) << 48)
            | ((self.minor as u64) << 32)
            | ((self.patch as u64) << 16)
            | (self.build as u64)
    }

    /// Read a version from a JSON number or numeric string
    pub fn from_value(value: &Value) -> Option<Self> {
        let packed = match value {
            Value::Number(n) => n.as_u64()?,
            Value::String(s) => s.trim().parse().ok()?,
            _ => return None,
        };
        Some(Self::from_packed(packed))
    }

    /// `major.minor.patch` without the build number
    pub fn short(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.patch, self.build
        )
    }
}

impl From<u64> for GameVersion {
    fn from(packed: u64) -> Self {
        Self::from_packed(packed)
    }
}
