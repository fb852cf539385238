//! Request entities.

pub mod model;

pub use model::{HttpMethod, RequestModel};
