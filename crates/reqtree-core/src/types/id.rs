//! Typed identifiers for tree nodes and requests.
//!
//! A tree node and the request it wraps carry different identities; using
//! distinct types prevents looking a node up by its request's id by accident.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A string that is not a valid node or request id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid {kind} id: {reason}")]
pub struct IdParseError {
    /// Which identifier was expected, `node` or `request`.
    pub kind: &'static str,
    /// Why the input was rejected.
    pub reason: String,
}

/// Declares an opaque, serde-transparent id backed by a random UUID.
/// Ids are only minted with `new()` or parsed back from their display form.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// A fresh random id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            /// Surrounding whitespace is ignored, as ids are often pasted.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|e| IdParseError {
                        kind: $kind,
                        reason: e.to_string(),
                    })
            }
        }
    };
}

define_id!(
    /// Unique identifier for a tree node, stable across the node's lifetime.
    NodeId,
    "node"
);

define_id!(
    /// Unique identifier for a request model wrapped by a leaf node.
    RequestId,
    "request"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(NodeId::new(), NodeId::new());
        assert_ne!(RequestId::default(), RequestId::default());
    }

    #[test]
    fn test_parse_round_trips_display_and_trims() {
        let id = RequestId::new();
        let parsed: RequestId = format!(" {id}\n").parse().expect("should parse");
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_error_names_the_id_kind() {
        let err = "not-a-uuid".parse::<NodeId>().expect_err("invalid");
        assert_eq!(err.kind, "node");
        assert!(err.to_string().starts_with("not a valid node id"));
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = NodeId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{id}\""));
        let back: NodeId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
