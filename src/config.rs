use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// Query family names the engine resolves keys against.
///
/// The BEST promotion threshold is a business constant and deliberately not
/// part of this config (see [`crate::boundary::BEST_THRESHOLD`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Segment 0 of paginated reply listing keys.
    pub list_family: String,
    /// Segment 0 of canonical reply detail keys.
    pub detail_family: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            list_family: "reply_list_infinite".to_string(),
            detail_family: "reply_retrieve".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse from JSON. Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, CacheError> {
        Ok(serde_json::from_str(json)?)
    }
}
