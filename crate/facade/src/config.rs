use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    error::result::{FacadeResult, FacadeResultHelper},
    facade_bail, FacadeError,
};

/// Environment variable naming the configuration file when none is given
/// explicitly.
pub const CONF_ENV_VAR: &str = "MXLOG_CONF";

/// Default number of records retained by [`UnregisteredPolicy::Buffer`].
pub const DEFAULT_BUFFER_CAPACITY: usize = 256;

const fn default_capacity() -> usize {
    DEFAULT_BUFFER_CAPACITY
}

/// What the facade does with a record while no backend is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum UnregisteredPolicy {
    /// Discard the record.
    #[default]
    Drop,
    /// Retain up to `capacity` records, oldest evicted first, and hand them to
    /// the next registered backend.
    Buffer {
        #[serde(default = "default_capacity")]
        capacity: usize,
    },
    /// Deliver to the built-in [`TracingBackend`](crate::TracingBackend).
    Console,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacadeConfig {
    #[serde(default)]
    pub unregistered: UnregisteredPolicy,
}

impl FacadeConfig {
    /// Resolve the configuration file:
    /// - the `conf` argument, which must exist
    /// - the file named by [`CONF_ENV_VAR`], which must exist
    /// - none, meaning defaults apply
    pub fn location(conf: Option<PathBuf>) -> FacadeResult<Option<PathBuf>> {
        trace!("Getting configuration file location");
        if let Some(conf_path) = conf {
            if !conf_path.exists() {
                return Err(FacadeError::NotFound(format!(
                    "Configuration file {conf_path:?} does not exist"
                )));
            }
            return Ok(Some(conf_path));
        }
        if let Ok(conf_path) = env::var(CONF_ENV_VAR).map(PathBuf::from) {
            if !conf_path.exists() {
                return Err(FacadeError::NotFound(format!(
                    "Configuration file {conf_path:?} specified in {CONF_ENV_VAR} environment \
                     variable does not exist"
                )));
            }
            return Ok(Some(conf_path));
        }
        Ok(None)
    }

    /// Load the configuration found by [`FacadeConfig::location`], or the
    /// defaults when there is none.
    pub fn load(conf: Option<PathBuf>) -> FacadeResult<Self> {
        match Self::location(conf)? {
            Some(path) => Self::from_file(&path),
            None => {
                debug!("No facade configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read a file as JSON when its extension is `json`, as TOML otherwise.
    pub fn from_file(path: &Path) -> FacadeResult<Self> {
        if path.is_dir() {
            facade_bail!("Configuration path {path:?} is a directory");
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Unable to read configuration file {path:?}"))?;
        trace!("Configuration file contents: {content}");
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> FacadeResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> FacadeResult<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_is_drop() {
        assert_eq!(FacadeConfig::default().unregistered, UnregisteredPolicy::Drop);
        assert_eq!(
            FacadeConfig::from_toml_str("").unwrap(),
            FacadeConfig::default()
        );
    }

    #[test]
    fn test_toml_buffer_policy() {
        let config = FacadeConfig::from_toml_str(
            r#"
            [unregistered]
            policy = "buffer"
            capacity = 128
            "#,
        )
        .unwrap();
        assert_eq!(
            config.unregistered,
            UnregisteredPolicy::Buffer { capacity: 128 }
        );
    }

    #[test]
    fn test_json_buffer_default_capacity() {
        let config =
            FacadeConfig::from_json_str(r#"{"unregistered": {"policy": "buffer"}}"#).unwrap();
        assert_eq!(
            config.unregistered,
            UnregisteredPolicy::Buffer {
                capacity: DEFAULT_BUFFER_CAPACITY
            }
        );
    }

    #[test]
    fn test_unknown_policy_is_parsing_error() {
        let result = FacadeConfig::from_toml_str(
            r#"
            [unregistered]
            policy = "forward"
            "#,
        );
        assert!(matches!(result, Err(FacadeError::Parsing(_))));
    }

    #[test]
    fn test_load_from_files() {
        let mut toml_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(toml_file, "[unregistered]\npolicy = \"console\"").unwrap();
        let config = FacadeConfig::load(Some(toml_file.path().to_path_buf())).unwrap();
        assert_eq!(config.unregistered, UnregisteredPolicy::Console);

        let mut json_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(json_file, r#"{{"unregistered": {{"policy": "drop"}}}}"#).unwrap();
        let config = FacadeConfig::from_file(json_file.path()).unwrap();
        assert_eq!(config.unregistered, UnregisteredPolicy::Drop);
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = FacadeConfig::load(Some(dir.path().to_path_buf()));
        assert!(matches!(result, Err(FacadeError::Default(_))));
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = FacadeConfig::load(Some(PathBuf::from("/nonexistent/mxlog.toml")));
        assert!(matches!(result, Err(FacadeError::NotFound(_))));
    }
}
