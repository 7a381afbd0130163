//! amz-paapi - Amazon Product Advertising API 5.0 adapter and CLI
//!
//! Wraps the PA-API `SearchItems` and `GetItems` operations behind a small
//! adapter that builds and validates requests, signs and sends them, and
//! returns the resulting items.

pub mod adapter;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod paapi;

pub use adapter::{GetItemsOptions, ItemIds, Paapi, SearchOptions};
pub use config::Config;
pub use error::PaapiError;
pub use paapi::{Item, Locale};
