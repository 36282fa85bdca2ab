use serde::{Deserialize, Serialize};
use straysands_common::Address;

use crate::StraySandsHubError;

/// Environment variable holding JSON-encoded [`HubSettings`].
pub const SETTINGS_ENV_VAR: &str = "STRAYSANDS_HUB_SETTINGS";

/// Largest journal capacity hint accepted from settings.
pub const MAX_JOURNAL_CAPACITY: usize = 1 << 16;

/// Construction-time configuration of a [`Hub`](crate::Hub).
///
/// ```json
/// { "administrator": "@<base58>", "journal_capacity": 1024 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubSettings {
    /// The only account allowed to register tags.
    pub administrator: Address,
    /// Number of events to reserve room for in the journal up front. At most
    /// [`MAX_JOURNAL_CAPACITY`].
    #[serde(default)]
    pub journal_capacity: usize,
}

impl HubSettings {
    /// Settings with the given administrator and defaults elsewhere.
    pub fn new(administrator: Address) -> Self {
        Self {
            administrator,
            journal_capacity: 0,
        }
    }

    /// Parse settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, StraySandsHubError> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| StraySandsHubError::Settings(format!("{e}")))?;
        if settings.journal_capacity > MAX_JOURNAL_CAPACITY {
            return Err(StraySandsHubError::Settings(format!(
                "Journal capacity {} exceeds {MAX_JOURNAL_CAPACITY}",
                settings.journal_capacity
            )));
        }
        Ok(settings)
    }

    /// Load settings from [`SETTINGS_ENV_VAR`].
    pub fn from_env() -> Result<Self, StraySandsHubError> {
        Self::from_env_var(SETTINGS_ENV_VAR)
    }

    /// Load settings from the JSON document held in the `name` environment
    /// variable.
    pub fn from_env_var(name: &str) -> Result<Self, StraySandsHubError> {
        let json = std::env::var(name).map_err(|_| {
            StraySandsHubError::Settings(format!("Missing {name} environment variable"))
        })?;
        let settings = Self::from_json(&json)?;
        tracing::debug!(administrator = %settings.administrator, "Loaded hub settings");
        Ok(settings)
    }
}
