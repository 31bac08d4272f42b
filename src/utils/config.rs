use super::changelog::ChangelogConfig;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "keep-changelog.toml";

impl ChangelogConfig {
    /// load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ChangelogConfig = toml::from_str(&contents).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;

        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// find and load the configuration file in a directory
    ///
    /// returns the default config if there is no `keep-changelog.toml`,
    /// a file that exists but cannot be parsed is an error
    pub fn load_or_default<P: AsRef<Path>>(dir: P) -> Result<Self> {
        match Self::find_config_file(&dir) {
            Some(config_path) => Self::load_from_file(config_path),
            None => Ok(Self::default()),
        }
    }

    /// find configuration file in a directory
    pub fn find_config_file<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
        let config_path = dir.as_ref().join(CONFIG_FILE_NAME);

        if config_path.is_file() {
            Some(config_path)
        } else {
            None
        }
    }
}
