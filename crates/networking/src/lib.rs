//! Promo Networking - GamePromo HTTP client, catalog fetcher, and delivery

pub mod api;
pub mod catalog;
pub mod delivery;
pub mod http;

pub use api::PromoApi;
pub use catalog::CatalogSource;
pub use delivery::TelegramDelivery;
pub use http::GamePromoClient;
