//! PA-API 5.0 client: request signing, transport, wire models and locales.

pub mod client;
pub mod error;
pub mod locales;
pub mod models;
pub mod signing;

pub use client::{DefaultApi, ProductAdvertisingApi};
pub use error::{ApiError, ApiException};
pub use locales::Locale;
pub use models::{
    GetItemsRequest, GetItemsResponse, Item, PartnerType, RequestValidation, SearchItemsRequest,
    SearchItemsResponse,
};
