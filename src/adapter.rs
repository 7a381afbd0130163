//! Item search and lookup on top of a PA-API client.
//!
//! Requests are assembled from three layers, later layers winning on key
//! collisions:
//!
//! 1. the caller's `extra` overlay (any PA-API request field, by its JSON name),
//! 2. the typed optional fields of [`SearchOptions`] / [`GetItemsOptions`],
//! 3. the fixed fields of the operation (`SearchIndex`, `Keywords`, `ItemCount`,
//!    `Resources` for search; `ItemIds` for lookup; `PartnerTag` and
//!    `PartnerType` for both).
//!
//! A fixed field with an empty value is sent as absent, and still clears a
//! colliding overlay key.

use crate::config::Config;
use crate::error::{PaapiError, Result};
use crate::paapi::models::{GetItemsRequest, Item, PartnerType, RequestValidation, SearchItemsRequest};
use crate::paapi::{ApiError, ApiException, DefaultApi, ProductAdvertisingApi};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

/// Default number of results per search page.
pub const DEFAULT_ITEM_COUNT: i64 = 10;

/// Options for [`Paapi::search_items`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub keywords: String,
    pub item_count: i64,
    pub resources: Vec<String>,
    pub actor: Option<String>,
    pub artist: Option<String>,
    pub author: Option<String>,
    pub availability: Option<String>,
    pub brand: Option<String>,
    pub browse_node_id: Option<String>,
    pub condition: Option<String>,
    pub currency_of_preference: Option<String>,
    pub delivery_flags: Vec<String>,
    pub item_page: Option<i64>,
    pub languages_of_preference: Vec<String>,
    pub marketplace: Option<String>,
    /// In the lowest currency denomination, e.g. cents
    pub max_price: Option<i64>,
    pub merchant: Option<String>,
    /// In the lowest currency denomination, e.g. cents
    pub min_price: Option<i64>,
    pub min_reviews_rating: Option<i64>,
    pub min_saving_percent: Option<i64>,
    pub sort_by: Option<String>,
    pub title: Option<String>,
    /// Raw request fields by PA-API name, e.g. `"OfferCount"`
    pub extra: Map<String, Value>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            keywords: String::new(),
            item_count: DEFAULT_ITEM_COUNT,
            resources: Vec::new(),
            actor: None,
            artist: None,
            author: None,
            availability: None,
            brand: None,
            browse_node_id: None,
            condition: None,
            currency_of_preference: None,
            delivery_flags: Vec::new(),
            item_page: None,
            languages_of_preference: Vec::new(),
            marketplace: None,
            max_price: None,
            merchant: None,
            min_price: None,
            min_reviews_rating: None,
            min_saving_percent: None,
            sort_by: None,
            title: None,
            extra: Map::new(),
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = keywords.into();
        self
    }

    pub fn item_count(mut self, item_count: i64) -> Self {
        self.item_count = item_count;
        self
    }

    pub fn resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources = resources.into_iter().map(Into::into).collect();
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    pub fn item_page(mut self, item_page: i64) -> Self {
        self.item_page = Some(item_page);
        self
    }

    pub fn price_range(mut self, min_price: Option<i64>, max_price: Option<i64>) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    pub fn min_reviews_rating(mut self, rating: i64) -> Self {
        self.min_reviews_rating = Some(rating);
        self
    }

    pub fn min_saving_percent(mut self, percent: i64) -> Self {
        self.min_saving_percent = Some(percent);
        self
    }

    pub fn delivery_flag(mut self, flag: impl Into<String>) -> Self {
        self.delivery_flags.push(flag.into());
        self
    }

    pub fn marketplace(mut self, marketplace: impl Into<String>) -> Self {
        self.marketplace = Some(marketplace.into());
        self
    }

    /// Adds a raw request field to the overlay.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Options for [`Paapi::get_items`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetItemsOptions {
    pub resources: Vec<String>,
    pub condition: Option<String>,
    pub currency_of_preference: Option<String>,
    pub item_id_type: Option<String>,
    pub languages_of_preference: Vec<String>,
    pub marketplace: Option<String>,
    pub merchant: Option<String>,
    pub offer_count: Option<i64>,
    /// Raw request fields by PA-API name
    pub extra: Map<String, Value>,
}

impl GetItemsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources = resources.into_iter().map(Into::into).collect();
        self
    }

    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn marketplace(mut self, marketplace: impl Into<String>) -> Self {
        self.marketplace = Some(marketplace.into());
        self
    }

    /// Adds a raw request field to the overlay.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// One or more item ids; a single id is treated as a one-element list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemIds(Vec<String>);

impl ItemIds {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for ItemIds {
    fn from(id: &str) -> Self {
        ItemIds(vec![id.to_string()])
    }
}

impl From<String> for ItemIds {
    fn from(id: String) -> Self {
        ItemIds(vec![id])
    }
}

impl From<Vec<String>> for ItemIds {
    fn from(ids: Vec<String>) -> Self {
        ItemIds(ids)
    }
}

impl From<Vec<&str>> for ItemIds {
    fn from(ids: Vec<&str>) -> Self {
        ItemIds(ids.into_iter().map(String::from).collect())
    }
}

impl From<&[String]> for ItemIds {
    fn from(ids: &[String]) -> Self {
        ItemIds(ids.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for ItemIds {
    fn from(ids: [&str; N]) -> Self {
        ItemIds(ids.iter().map(|id| id.to_string()).collect())
    }
}

fn set_opt(data: &mut Map<String, Value>, key: &str, value: Option<impl Into<Value>>) {
    if let Some(value) = value {
        data.insert(key.to_string(), value.into());
    }
}

fn set_list(data: &mut Map<String, Value>, key: &str, values: Vec<String>) {
    if !values.is_empty() {
        data.insert(key.to_string(), json!(values));
    }
}

/// Inserts a fixed field; empty values become `null`, i.e. absent.
fn set_fixed(data: &mut Map<String, Value>, key: &str, value: Value) {
    let empty = match &value {
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    };
    data.insert(key.to_string(), if empty { Value::Null } else { value });
}

/// Shapes `data` into a request and runs its self-validation.
fn build_request<R>(data: Map<String, Value>) -> Result<R>
where
    R: DeserializeOwned + RequestValidation,
{
    let request: R = serde_json::from_value(Value::Object(data))
        .map_err(|e| PaapiError::InvalidConfig(format!("Malformed request options: {}", e)))?;
    check_for_invalid_properties(&request)?;
    Ok(request)
}

fn check_for_invalid_properties(request: &impl RequestValidation) -> Result<()> {
    let invalid = request.list_invalid_properties();
    if invalid.is_empty() {
        return Ok(());
    }

    let mut message = Vec::with_capacity(invalid.len() + 1);
    message.push("Invalid properties:".to_string());
    message.extend(invalid);
    Err(PaapiError::InvalidConfig(message.join("\n")))
}

/// Renders an API-level failure as a multi-line message.
pub fn format_api_error(exception: &ApiException) -> String {
    let mut lines = vec![
        "Error calling PA-API 5.0!".to_string(),
        format!("HTTP Status Code: {}", exception.status),
        format!("Error Message: {}", exception.message),
        String::new(),
    ];

    match &exception.response {
        Some(response) => {
            for error in &response.errors {
                lines.push(format!("Error Type: {}", error.code.as_deref().unwrap_or_default()));
                lines.push(format!("Error Message: {}", error.message.as_deref().unwrap_or_default()));
            }
        }
        None => lines.push(format!("Error response body: {}", exception.body)),
    }

    lines.join("\n")
}

fn call_failure(error: ApiError) -> PaapiError {
    match error {
        ApiError::Api(exception) => PaapiError::Call(format_api_error(&exception)),
        ApiError::Transport(message) => {
            let exception = ApiException {
                status: 0,
                message: format!("[0] {}", message),
                body: String::new(),
                response: None,
            };
            PaapiError::Call(format_api_error(&exception))
        }
        other => PaapiError::Call(other.to_string()),
    }
}

/// PA-API adapter exposing item search and item lookup.
pub struct Paapi<A = DefaultApi> {
    api: A,
    partner_tag: String,
    marketplace: Option<String>,
}

impl Paapi<DefaultApi> {
    /// Validates `config` and builds the default HTTPS client from it.
    pub fn connect(config: &Config) -> Result<Self> {
        config.validate()?;
        let api = DefaultApi::new(config).map_err(|e| PaapiError::InvalidConfig(e.to_string()))?;
        Self::new(config, api)
    }
}

impl<A: ProductAdvertisingApi> Paapi<A> {
    /// Validates `config` and wraps an already constructed client.
    pub fn new(config: &Config, api: A) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            api,
            partner_tag: config.partner_tag.clone(),
            marketplace: config.marketplace.clone().filter(|m| !m.is_empty()),
        })
    }

    /// Returns the underlying client.
    pub fn api(&self) -> &A {
        &self.api
    }

    fn set_partner(&self, data: &mut Map<String, Value>) {
        data.insert("PartnerTag".to_string(), json!(self.partner_tag));
        data.insert("PartnerType".to_string(), json!(PartnerType::Associates.as_str()));
    }

    fn set_default_marketplace(&self, data: &mut Map<String, Value>) {
        if let Some(marketplace) = &self.marketplace {
            data.entry("Marketplace").or_insert_with(|| json!(marketplace));
        }
    }

    /// Builds and validates a `SearchItems` request.
    pub fn search_items_request(&self, index: &str, options: SearchOptions) -> Result<SearchItemsRequest> {
        let mut data = options.extra;

        set_opt(&mut data, "Actor", options.actor);
        set_opt(&mut data, "Artist", options.artist);
        set_opt(&mut data, "Author", options.author);
        set_opt(&mut data, "Availability", options.availability);
        set_opt(&mut data, "Brand", options.brand);
        set_opt(&mut data, "BrowseNodeId", options.browse_node_id);
        set_opt(&mut data, "Condition", options.condition);
        set_opt(&mut data, "CurrencyOfPreference", options.currency_of_preference);
        set_list(&mut data, "DeliveryFlags", options.delivery_flags);
        set_opt(&mut data, "ItemPage", options.item_page);
        set_list(&mut data, "LanguagesOfPreference", options.languages_of_preference);
        set_opt(&mut data, "Marketplace", options.marketplace);
        set_opt(&mut data, "MaxPrice", options.max_price);
        set_opt(&mut data, "Merchant", options.merchant);
        set_opt(&mut data, "MinPrice", options.min_price);
        set_opt(&mut data, "MinReviewsRating", options.min_reviews_rating);
        set_opt(&mut data, "MinSavingPercent", options.min_saving_percent);
        set_opt(&mut data, "SortBy", options.sort_by);
        set_opt(&mut data, "Title", options.title);
        self.set_default_marketplace(&mut data);

        set_fixed(&mut data, "SearchIndex", json!(index));
        set_fixed(&mut data, "Keywords", json!(options.keywords));
        set_fixed(&mut data, "ItemCount", json!(options.item_count));
        set_fixed(&mut data, "Resources", json!(options.resources));
        self.set_partner(&mut data);

        debug!("SearchItems request fields: {:?}", data.keys().collect::<Vec<_>>());
        build_request(data)
    }

    /// Builds and validates a `GetItems` request.
    pub fn get_items_request(&self, ids: ItemIds, options: GetItemsOptions) -> Result<GetItemsRequest> {
        let mut data = options.extra;

        set_list(&mut data, "Resources", options.resources);
        set_opt(&mut data, "Condition", options.condition);
        set_opt(&mut data, "CurrencyOfPreference", options.currency_of_preference);
        set_opt(&mut data, "ItemIdType", options.item_id_type);
        set_list(&mut data, "LanguagesOfPreference", options.languages_of_preference);
        set_opt(&mut data, "Marketplace", options.marketplace);
        set_opt(&mut data, "Merchant", options.merchant);
        set_opt(&mut data, "OfferCount", options.offer_count);
        self.set_default_marketplace(&mut data);

        set_fixed(&mut data, "ItemIds", json!(ids.into_vec()));
        self.set_partner(&mut data);

        debug!("GetItems request fields: {:?}", data.keys().collect::<Vec<_>>());
        build_request(data)
    }

    /// Searches `index` and returns the items of the first result page.
    ///
    /// A response without a `SearchResult` yields an empty list.
    pub async fn search_items(&self, index: &str, options: SearchOptions) -> Result<Vec<Item>> {
        let request = self.search_items_request(index, options)?;

        let response = self.api.search_items(request).await.map_err(call_failure)?;
        let Some(search_result) = response.search_result else {
            debug!("SearchItems returned no SearchResult");
            return Ok(Vec::new());
        };

        let items = search_result.items.unwrap_or_default();
        info!("SearchItems returned {} items", items.len());
        Ok(items)
    }

    /// Looks up items by id.
    ///
    /// Unlike [`Paapi::search_items`], a response without an `ItemsResult`
    /// is reported as a call failure rather than an empty list.
    pub async fn get_items(&self, ids: impl Into<ItemIds>, options: GetItemsOptions) -> Result<Vec<Item>> {
        let request = self.get_items_request(ids.into(), options)?;

        let response = self.api.get_items(request).await.map_err(call_failure)?;
        let items_result = response.items_result.ok_or_else(|| {
            PaapiError::Call("GetItems response did not contain an ItemsResult".to_string())
        })?;

        let items = items_result.items.unwrap_or_default();
        info!("GetItems returned {} items", items.len());
        Ok(items)
    }
}
