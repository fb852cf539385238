//! Collection-level orchestration of backend calls and tree reconciliation.

pub mod service;

pub use service::RequestTreeService;
