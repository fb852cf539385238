//! Request model wrapped by leaf tree nodes.

use std::fmt;

use reqtree_core::types::RequestId;
use serde::{Deserialize, Serialize};

/// HTTP method of a stored request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    #[default]
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
    /// `OPTIONS`
    Options,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        };
        f.write_str(method)
    }
}

/// A single request stored in a collection file.
///
/// Only the fields the tree needs are modelled; bodies, headers and
/// execution settings belong to the request engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestModel {
    /// Identity of the request itself (not of the wrapping node).
    pub id: RequestId,
    /// Display name.
    pub name: String,
    /// Comment text attached to the request.
    #[serde(default)]
    pub description: String,
    /// HTTP method.
    #[serde(default)]
    pub method: HttpMethod,
    /// Target URL.
    #[serde(default)]
    pub url: String,
    /// The request file this request is stored in.
    #[serde(default)]
    pub rest_file_path: String,
}

impl RequestModel {
    /// Create a request with a fresh id and the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RequestId::new(),
            name: name.into(),
            description: String::new(),
            method: HttpMethod::default(),
            url: String::new(),
            rest_file_path: String::new(),
        }
    }
}
