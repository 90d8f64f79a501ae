//! Promo Engine - code acquisition sequence and cycle driver

pub mod acquire;
pub mod driver;

pub use acquire::acquire_code;
pub use driver::{CycleDriver, DriverConfig};
