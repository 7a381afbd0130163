//! CLI command implementations.

pub mod items;
pub mod search;

pub use items::ItemsCommand;
pub use search::SearchCommand;

use crate::paapi::models::resources;
use serde_json::Value;

/// Resources requested when none are given on the command line.
pub const DEFAULT_RESOURCES: &[&str] = &[
    resources::ITEM_INFO_TITLE,
    resources::ITEM_INFO_BY_LINE_INFO,
    resources::OFFERS_LISTINGS_PRICE,
    resources::IMAGES_PRIMARY_MEDIUM,
];

/// Returns `requested`, or the default resource set when it is empty.
pub fn resources_or_default(requested: Vec<String>) -> Vec<String> {
    if requested.is_empty() {
        DEFAULT_RESOURCES.iter().map(|r| r.to_string()).collect()
    } else {
        requested
    }
}

/// Parses a `KEY=VALUE` request overlay.
///
/// The value is read as JSON when it parses, otherwise it is taken as a
/// plain string, so `SortBy=Price:LowToHigh` and `ItemPage=2` both work.
pub fn parse_extra(s: &str) -> Result<(String, Value), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{}'", s))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in '{}'", s));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_extra_json_values() {
        assert_eq!(parse_extra("ItemPage=2").unwrap(), ("ItemPage".to_string(), json!(2)));
        assert_eq!(
            parse_extra("DeliveryFlags=[\"Prime\"]").unwrap(),
            ("DeliveryFlags".to_string(), json!(["Prime"]))
        );
    }

    #[test]
    fn test_parse_extra_plain_string() {
        assert_eq!(
            parse_extra("SortBy=Price:LowToHigh").unwrap(),
            ("SortBy".to_string(), json!("Price:LowToHigh"))
        );
        assert_eq!(parse_extra("Title=").unwrap(), ("Title".to_string(), json!("")));
    }

    #[test]
    fn test_parse_extra_rejects_malformed() {
        assert!(parse_extra("NoEquals").is_err());
        assert!(parse_extra("=value").is_err());
    }

    #[test]
    fn test_resources_or_default() {
        assert_eq!(resources_or_default(Vec::new()).len(), DEFAULT_RESOURCES.len());
        assert_eq!(
            resources_or_default(vec!["ItemInfo.Features".to_string()]),
            vec!["ItemInfo.Features".to_string()]
        );
    }
}
