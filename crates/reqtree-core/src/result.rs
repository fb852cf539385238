//! Convenience result type alias for the request tree crates.

use crate::error::AppError;

/// A specialized `Result` type for operations crossing a crate boundary.
pub type AppResult<T> = Result<T, AppError>;
