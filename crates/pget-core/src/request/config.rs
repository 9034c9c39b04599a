//! JSON request description for the single-shot mode.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

fn default_method() -> String {
    "GET".to_string()
}

fn default_follow_redirects() -> bool {
    true
}

fn default_max_redirects() -> u32 {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

/// One request, as described by the user's JSON file or inline string.
/// Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestConfig {
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Arbitrary JSON; sent compact as the request body when present.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    #[serde(default)]
    pub cookies: Option<CookieConfig>,
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,
    /// Whole-request timeout in seconds; 0 disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout: u64,
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthConfig {
    Basic { username: String, password: String },
    Bearer { token: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CookieConfig {
    /// Cookie file loaded before the request.
    #[serde(default)]
    pub load: Option<PathBuf>,
    /// Cookie jar written after the request.
    #[serde(default)]
    pub save: Option<PathBuf>,
}

/// Parses a request description. Missing `url` or malformed JSON is an
/// error; everything else falls back to the documented defaults.
pub fn parse_config(json: &str) -> Result<RequestConfig> {
    serde_json::from_str(json).context("invalid request JSON")
}
