//! Apple platforms a consuming target can be built for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    #[serde(alias = "macos")]
    Osx,
    Tvos,
    Watchos,
}

/// How a platform lays out bundles relative to the loading binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunpathConvention {
    /// `Contents/MacOS` next to `Contents/Frameworks`.
    Desktop,
    /// Flat bundles with `Frameworks` beside the executable.
    Embedded,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Ios,
        Platform::Osx,
        Platform::Tvos,
        Platform::Watchos,
    ];

    /// The symbolic name used in manifests (`ios`, `osx`, ...).
    pub fn symbolic_name(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Osx => "osx",
            Platform::Tvos => "tvos",
            Platform::Watchos => "watchos",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Osx => "macOS",
            Platform::Tvos => "tvOS",
            Platform::Watchos => "watchOS",
        }
    }

    pub fn runpath_convention(&self) -> RunpathConvention {
        match self {
            Platform::Osx => RunpathConvention::Desktop,
            Platform::Ios | Platform::Tvos | Platform::Watchos => RunpathConvention::Embedded,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "osx" | "macos" => Ok(Platform::Osx),
            "tvos" => Ok(Platform::Tvos),
            "watchos" => Ok(Platform::Watchos),
            _ => Err(format!(
                "unknown platform '{}'; expected 'ios', 'osx', 'tvos', or 'watchos'",
                s
            )),
        }
    }
}
