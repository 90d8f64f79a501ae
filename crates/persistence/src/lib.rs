//! Promo Persistence - append-only code files and shard selection

pub mod store;

pub use store::CodeStore;
