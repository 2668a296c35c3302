use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    /// Secret the cookie signing key is derived from
    ///
    /// A random secret is generated on startup when absent. Sessions then don't survive restarts.
    pub secret: Option<SmolStr>,
    pub idle_timeout_secs: u64,
    pub max_sessions: u64,
    #[serde(default)]
    pub secure_cookies: bool,
}
