use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;

/// Settings for the command-line front end.
///
/// Every field is optional in the TOML file:
///
/// ```toml
/// origin = "https://puzzles.example.com"
/// store_dir = "/var/lib/wordsearch"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Prefix for share links; tokens are appended as `<origin>/play/<token>`.
    pub origin: String,
    /// Directory holding saved puzzles.
    pub store_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            origin: "http://localhost:5173".to_owned(),
            store_dir: PathBuf::from(".wordsearch"),
        }
    }
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Self, Error> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let source = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&source)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn fields_override_defaults() {
        let config = Config::from_toml(r#"origin = "https://example.com""#).unwrap();
        assert_eq!(config.origin, "https://example.com");
        assert_eq!(config.store_dir, Config::default().store_dir);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            Config::from_toml("grid_size = 20"),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
