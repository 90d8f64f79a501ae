//! Promo Core - Shared data models, types, errors, and retry policy

pub mod errors;
pub mod models;
pub mod retry;
pub mod types;

pub use errors::{Error, Result};
pub use models::*;
pub use retry::RetryPolicy;
pub use types::*;
