//! Data models for the promo farm

mod game;
mod promo;
mod session;

pub use game::*;
pub use promo::*;
pub use session::*;
