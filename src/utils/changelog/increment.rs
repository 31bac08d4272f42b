// next version computation

use crate::error::{Error, Result};
use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;
use std::str::FromStr;

/// how to get from the latest release to the next one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Increment {
    Major,
    Minor,
    Patch,
    Exact(Version),
}

impl Increment {
    /// version following `latest`
    pub fn apply(&self, latest: &Version) -> Version {
        let mut version = latest.clone();
        match self {
            Increment::Major => {
                version.major += 1;
                version.minor = 0;
                version.patch = 0;
            }
            Increment::Minor => {
                version.minor += 1;
                version.patch = 0;
            }
            Increment::Patch => {
                version.patch += 1;
            }
            Increment::Exact(exact) => return exact.clone(),
        }
        version.pre = Prerelease::EMPTY;
        version.build = BuildMetadata::EMPTY;
        version
    }
}

impl FromStr for Increment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "major" => Ok(Increment::Major),
            "minor" => Ok(Increment::Minor),
            "patch" => Ok(Increment::Patch),
            _ => Version::parse(s.trim().trim_start_matches('v'))
                .map(Increment::Exact)
                .map_err(|_| Error::InvalidIncrement {
                    value: s.to_string(),
                }),
        }
    }
}

impl fmt::Display for Increment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Increment::Major => write!(f, "major"),
            Increment::Minor => write!(f, "minor"),
            Increment::Patch => write!(f, "patch"),
            Increment::Exact(version) => write!(f, "{}", version),
        }
    }
}
