//! Typed HTTP client for the terebi backend.
//!
//! Stateless: one method per server operation, each building a
//! deterministic URL and returning a parsed record from [`types`].
//! Non-2xx responses surface as [`error::ApiError::Status`].

pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
