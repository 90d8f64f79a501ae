//! Raw HTTP client for the GamePromo API

mod client;

pub use client::GamePromoClient;
