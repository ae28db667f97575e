pub mod api;
pub mod arguments;
pub mod database;
pub mod event_listener;
pub mod export;
pub mod order_validation;
pub mod orderbook;
pub mod orders_cache;
pub mod product_cache;
pub mod run;
pub mod whatsapp;

pub use self::run::run;
