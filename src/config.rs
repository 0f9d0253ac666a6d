use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

pub const SETTINGS_FILE_PATH: &str = "/etc/sqlsprinkler/sqlsprinkler-client.conf";

/// Configuration for a controller client
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Clone)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the controller, e.g. `http://sprinkler.local:3030`
    pub host: String,

    /// Whether turning a zone on or off should fail when the controller
    /// rejects it. When false a rejection is only logged.
    pub check_toggle_status: bool,

    /// Per-request timeout in seconds. No timeout when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            host: "http://localhost:3030".to_string(),
            check_toggle_status: false,
            timeout_secs: None,
        }
    }
}

/// Read the settings file from `/etc/sqlsprinkler/sqlsprinkler-client.conf`.
pub fn read_settings() -> Result<ClientConfig> {
    load_path(SETTINGS_FILE_PATH)
}

/// Read the settings from `path`. A missing file is created with the defaults.
pub fn load_path(path: impl AsRef<Path>) -> Result<ClientConfig> {
    Ok(confy::load_path(path)?)
}
