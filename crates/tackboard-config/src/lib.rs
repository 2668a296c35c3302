pub mod database;
pub mod server;
pub mod session;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    pub database: database::Configuration,
    pub server: server::Configuration,
    pub session: session::Configuration,
}

impl Configuration {
    pub async fn load<P>(path: P) -> eyre::Result<Self>
    where
        P: AsRef<Path>,
    {
        let content = fs::read_to_string(path).await?;
        toml::from_str(&content).map_err(eyre::Report::from)
    }
}
