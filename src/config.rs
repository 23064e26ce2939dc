use super::error::Result;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Settings for fetching headers from a remote source.
///
/// Every field has a default, so a YAML file only needs the keys it changes:
///
/// ```yaml
/// timeout_secs: 5
/// user_agent: my-crawler/1.0
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` sent with the request.
    pub user_agent: String,
    /// Redirects followed before giving up.
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_owned(),
            max_redirects: 10,
        }
    }
}

impl FetchConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        load_yaml(path.as_ref())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}
