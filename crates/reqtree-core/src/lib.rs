//! # reqtree-core
//!
//! Core crate for the request tree workspace. Contains configuration
//! schemas, typed identifiers and the unified error system shared by the
//! entity, service and CLI crates.
//!
//! This crate has **no** internal dependencies on other reqtree crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, TreeError};
pub use result::AppResult;
