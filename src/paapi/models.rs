//! Wire models for the PA-API 5.0 `SearchItems` and `GetItems` operations.
//!
//! Field names follow the PA-API JSON payloads (PascalCase). Items are kept
//! mostly opaque: only the identifiers are typed, everything else is carried
//! verbatim so callers can read whichever resources they requested.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Resource names accepted by `SearchItems` and `GetItems`.
pub mod resources {
    pub const BROWSE_NODE_INFO_BROWSE_NODES: &str = "BrowseNodeInfo.BrowseNodes";
    pub const IMAGES_PRIMARY_SMALL: &str = "Images.Primary.Small";
    pub const IMAGES_PRIMARY_MEDIUM: &str = "Images.Primary.Medium";
    pub const IMAGES_PRIMARY_LARGE: &str = "Images.Primary.Large";
    pub const ITEM_INFO_BY_LINE_INFO: &str = "ItemInfo.ByLineInfo";
    pub const ITEM_INFO_CLASSIFICATIONS: &str = "ItemInfo.Classifications";
    pub const ITEM_INFO_FEATURES: &str = "ItemInfo.Features";
    pub const ITEM_INFO_PRODUCT_INFO: &str = "ItemInfo.ProductInfo";
    pub const ITEM_INFO_TITLE: &str = "ItemInfo.Title";
    pub const OFFERS_LISTINGS_AVAILABILITY_MESSAGE: &str = "Offers.Listings.Availability.Message";
    pub const OFFERS_LISTINGS_DELIVERY_INFO_IS_PRIME_ELIGIBLE: &str =
        "Offers.Listings.DeliveryInfo.IsPrimeEligible";
    pub const OFFERS_LISTINGS_PRICE: &str = "Offers.Listings.Price";
    pub const OFFERS_SUMMARIES_LOWEST_PRICE: &str = "Offers.Summaries.LowestPrice";
    pub const SEARCH_REFINEMENTS: &str = "SearchRefinements";
}

/// Partner type of the tag sent with every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartnerType {
    #[default]
    Associates,
}

impl PartnerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerType::Associates => "Associates",
        }
    }
}

/// Self-validation of a request before it is sent.
///
/// Mirrors the constraints PA-API enforces server-side so obviously broken
/// requests fail locally. An empty list means the request is valid.
pub trait RequestValidation {
    fn list_invalid_properties(&self) -> Vec<String>;

    fn is_valid(&self) -> bool {
        self.list_invalid_properties().is_empty()
    }
}

fn check_required<T>(field: &Option<T>, name: &str, invalid: &mut Vec<String>) {
    if field.is_none() {
        invalid.push(format!("'{}' can't be null", name));
    }
}

fn check_range(field: Option<i64>, name: &str, min: i64, max: Option<i64>, invalid: &mut Vec<String>) {
    let Some(value) = field else {
        return;
    };
    if let Some(max) = max {
        if value > max {
            invalid.push(format!(
                "invalid value for '{}', must be smaller than or equal to {}.",
                name, max
            ));
        }
    }
    if value < min {
        invalid.push(format!("invalid value for '{}', must be bigger than or equal to {}.", name, min));
    }
}

/// Request body for `SearchItems`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchItemsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browse_node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_of_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_flags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_page: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages_of_preference: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketplace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_reviews_rating: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_saving_percent: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_type: Option<PartnerType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl RequestValidation for SearchItemsRequest {
    fn list_invalid_properties(&self) -> Vec<String> {
        let mut invalid = Vec::new();

        check_required(&self.partner_tag, "partner_tag", &mut invalid);
        check_required(&self.partner_type, "partner_type", &mut invalid);
        check_range(self.item_count, "item_count", 1, Some(10), &mut invalid);
        check_range(self.item_page, "item_page", 1, Some(10), &mut invalid);
        check_range(self.max_price, "max_price", 1, None, &mut invalid);
        check_range(self.min_price, "min_price", 1, None, &mut invalid);
        check_range(self.min_reviews_rating, "min_reviews_rating", 1, Some(4), &mut invalid);
        check_range(self.min_saving_percent, "min_saving_percent", 1, Some(99), &mut invalid);
        check_range(self.offer_count, "offer_count", 1, None, &mut invalid);

        invalid
    }
}

/// Maximum number of ids a single `GetItems` call accepts.
pub const MAX_ITEM_IDS: usize = 10;

/// Request body for `GetItems`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_of_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages_of_preference: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketplace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_type: Option<PartnerType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
}

impl RequestValidation for GetItemsRequest {
    fn list_invalid_properties(&self) -> Vec<String> {
        let mut invalid = Vec::new();

        match &self.item_ids {
            None => invalid.push("'item_ids' can't be null".to_string()),
            Some(ids) if ids.is_empty() => {
                invalid.push("invalid value for 'item_ids', must contain at least 1 id.".to_string())
            }
            Some(ids) if ids.len() > MAX_ITEM_IDS => invalid.push(format!(
                "invalid value for 'item_ids', must contain at most {} ids.",
                MAX_ITEM_IDS
            )),
            Some(_) => {}
        }
        check_required(&self.partner_tag, "partner_tag", &mut invalid);
        check_required(&self.partner_type, "partner_type", &mut invalid);
        check_range(self.offer_count, "offer_count", 1, None, &mut invalid);

        invalid
    }
}

/// A single error entry as reported by PA-API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorData {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Structured body of a failed PA-API call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "__type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "Errors", default)]
    pub errors: Vec<ErrorData>,
}

/// An item returned by PA-API.
///
/// Only the identifiers are modeled; every other attribute (`ItemInfo`,
/// `Offers`, `Images`, ...) stays in `attributes` exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "ASIN")]
    pub asin: String,
    #[serde(rename = "DetailPageURL", default, skip_serializing_if = "Option::is_none")]
    pub detail_page_url: Option<String>,
    #[serde(rename = "ParentASIN", default, skip_serializing_if = "Option::is_none")]
    pub parent_asin: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Item {
    /// Looks up a nested attribute by JSON pointer, e.g. `/ItemInfo/Title`.
    pub fn attribute(&self, pointer: &str) -> Option<&Value> {
        let pointer = pointer.strip_prefix('/').unwrap_or(pointer);
        let (head, rest) = match pointer.split_once('/') {
            Some((head, rest)) => (head, Some(rest)),
            None => (pointer, None),
        };
        let value = self.attributes.get(head)?;
        match rest {
            Some(rest) => value.pointer(&format!("/{}", rest)),
            None => Some(value),
        }
    }

    fn display_value(&self, pointer: &str) -> Option<&str> {
        self.attribute(pointer).and_then(Value::as_str)
    }

    /// Returns `ItemInfo.Title` if it was requested.
    pub fn title(&self) -> Option<&str> {
        self.display_value("/ItemInfo/Title/DisplayValue")
    }

    /// Returns `ItemInfo.ByLineInfo.Brand` if it was requested.
    pub fn brand(&self) -> Option<&str> {
        self.display_value("/ItemInfo/ByLineInfo/Brand/DisplayValue")
    }

    /// Returns the display amount of the first listing's price.
    pub fn display_price(&self) -> Option<&str> {
        self.display_value("/Offers/Listings/0/Price/DisplayAmount")
    }

    /// Returns the medium primary image URL if it was requested.
    pub fn image_url(&self) -> Option<&str> {
        self.display_value("/Images/Primary/Medium/URL")
    }

    /// Returns whether the first listing is Prime eligible, when known.
    pub fn is_prime_eligible(&self) -> Option<bool> {
        self.attribute("/Offers/Listings/0/DeliveryInfo/IsPrimeEligible").and_then(Value::as_bool)
    }
}

/// `SearchResult` block of a `SearchItems` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResult {
    #[serde(default)]
    pub items: Option<Vec<Item>>,
    #[serde(default)]
    pub total_result_count: Option<u64>,
    #[serde(rename = "SearchURL", default)]
    pub search_url: Option<String>,
}

/// Response body of `SearchItems`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchItemsResponse {
    #[serde(default)]
    pub search_result: Option<SearchResult>,
    #[serde(default)]
    pub errors: Option<Vec<ErrorData>>,
}

/// `ItemsResult` block of a `GetItems` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemsResult {
    #[serde(default)]
    pub items: Option<Vec<Item>>,
}

/// Response body of `GetItems`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemsResponse {
    #[serde(default)]
    pub items_result: Option<ItemsResult>,
    #[serde(default)]
    pub errors: Option<Vec<ErrorData>>,
}
