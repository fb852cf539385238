//! Tree presentation and reconciliation configuration.

use serde::{Deserialize, Serialize};

/// Settings for projecting and reconciling the request tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Appended to the label of file-group folders in the view projection.
    #[serde(default = "default_file_group_indicator")]
    pub file_group_indicator: String,
    /// Re-fetch the authoritative tree after a reconciliation failure.
    #[serde(default = "default_true")]
    pub reload_on_conflict: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            file_group_indicator: default_file_group_indicator(),
            reload_on_conflict: default_true(),
        }
    }
}

fn default_file_group_indicator() -> String {
    " (file)".to_string()
}

fn default_true() -> bool {
    true
}
