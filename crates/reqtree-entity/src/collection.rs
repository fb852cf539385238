//! Collection entities and load results.

use serde::{Deserialize, Serialize};

use crate::tree::RequestTree;

/// A collection of requests opened from a directory on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Display name.
    pub name: String,
    /// Root directory of the collection.
    pub path: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

impl Collection {
    /// Create a collection with an empty description.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            description: String::new(),
        }
    }
}

/// A non-fatal problem the backend hit while parsing a request file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    /// The file the warning refers to.
    pub filepath: String,
    /// What went wrong.
    pub message: String,
}

/// The full tree of a collection as loaded by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadRequestsResult {
    /// The authoritative tree.
    pub request_tree: RequestTree,
    /// Parse warnings collected while loading.
    #[serde(default)]
    pub warnings: Vec<ParseWarning>,
}
