//! Unified application error types.
//!
//! Tree operations report structural-integrity failures as [`TreeError`].
//! Everything that crosses a crate boundary is mapped into [`AppError`] so
//! callers can propagate with the `?` operator.

use std::fmt;
use thiserror::Error;

use crate::types::{NodeId, RequestId};

/// Top-level error kind categorization used across the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Input validation failed.
    Validation,
    /// The local tree copy could not be reconciled with an operation.
    Reconciliation,
    /// The backend collaborator rejected or failed an operation.
    Backend,
    /// A storage I/O error occurred.
    Storage,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Reconciliation => write!(f, "RECONCILIATION"),
            Self::Backend => write!(f, "BACKEND"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// The unified application error.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Backend, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Whether this error means the local tree drifted from the backend.
    pub fn is_reconciliation(&self) -> bool {
        self.kind == ErrorKind::Reconciliation
    }

    /// The tree error that caused this error, if any.
    pub fn tree_error(&self) -> Option<&TreeError> {
        self.source
            .as_ref()
            .and_then(|source| source.downcast_ref::<TreeError>())
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

impl From<TreeError> for AppError {
    fn from(err: TreeError) -> Self {
        Self::with_source(ErrorKind::Reconciliation, err.to_string(), err)
    }
}

/// A structural-integrity failure of the local tree copy.
///
/// None of these are business-rule rejections; those come from the backend
/// before a tree operation runs. The resolution for every variant is to
/// re-fetch the authoritative tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The parent to insert under is missing or cannot hold children.
    #[error("parent node {parent_id} not found")]
    ParentNotFound {
        /// The requested parent.
        parent_id: NodeId,
    },
    /// The node to remove has no parent (or is the root).
    #[error("no parent found for node {node_id} during remove")]
    OldParentNotFound {
        /// The node that was to be removed.
        node_id: NodeId,
    },
    /// The node to replace is not present in the tree.
    #[error("no parent found for replaced node {node_id}")]
    ReplaceParentNotFound {
        /// The node that was to be replaced.
        node_id: NodeId,
    },
    /// The dragged node is missing from the local copy.
    #[error("dragged node {node_id} not found in local tree")]
    NoCopyDragNode {
        /// The dragged node.
        node_id: NodeId,
    },
    /// The drop target is missing from the local copy.
    #[error("drop node {node_id} not found in local tree")]
    NoCopyDropNode {
        /// The drop target.
        node_id: NodeId,
    },
    /// The parent of the dragged node is missing from the local copy.
    #[error("no parent found for dragged node {node_id}")]
    NoCopyDragParent {
        /// The dragged node.
        node_id: NodeId,
    },
    /// The grandparent of the dragged node is missing from the local copy.
    #[error("no grandparent found above drag parent {node_id}")]
    NoCopyDragGrandParent {
        /// The parent of the dragged node.
        node_id: NodeId,
    },
    /// The parent of the drop target is missing from the local copy.
    #[error("no parent found for drop node {node_id}")]
    NoCopyDropParent {
        /// The drop target.
        node_id: NodeId,
    },
    /// The group to rename is missing or is not a group.
    #[error("group node {group_id} not found")]
    GroupNotFound {
        /// The requested group.
        group_id: NodeId,
    },
    /// No leaf wraps the given request.
    #[error("no node wraps request {request_id}")]
    RequestNotFound {
        /// The requested request model.
        request_id: RequestId,
    },
    /// A leaf was dropped on, but its parent cannot be resolved.
    #[error("could not resolve drop target for node {node_id}")]
    DropTargetNotFound {
        /// The node that was dropped on.
        node_id: NodeId,
    },
}

impl TreeError {
    /// Stable machine-readable code for the error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ParentNotFound { .. } => "tree.parent_not_found",
            Self::OldParentNotFound { .. } => "tree.old_parent_not_found",
            Self::ReplaceParentNotFound { .. } => "tree.replace_parent_not_found",
            Self::NoCopyDragNode { .. } => "tree.no_copy_drag_node",
            Self::NoCopyDropNode { .. } => "tree.no_copy_drop_node",
            Self::NoCopyDragParent { .. } => "tree.no_copy_drag_parent",
            Self::NoCopyDragGrandParent { .. } => "tree.no_copy_drag_grand_parent",
            Self::NoCopyDropParent { .. } => "tree.no_copy_drop_parent",
            Self::GroupNotFound { .. } => "tree.group_not_found",
            Self::RequestNotFound { .. } => "tree.request_not_found",
            Self::DropTargetNotFound { .. } => "tree.drop_target_not_found",
        }
    }
}
