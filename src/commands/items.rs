//! Item lookup command implementation.

use crate::adapter::{GetItemsOptions, Paapi};
use crate::config::Config;
use crate::format::Formatter;
use crate::paapi::models::MAX_ITEM_IDS;
use crate::paapi::{Item, ProductAdvertisingApi};
use anyhow::{Context, Result};
use tracing::info;

/// Executes an item lookup by ASIN.
pub struct ItemsCommand {
    config: Config,
}

/// Trims and uppercases an ASIN, rejecting anything that is not 10
/// alphanumeric characters.
pub fn normalize_asin(asin: &str) -> Result<String> {
    let asin = asin.trim().to_uppercase();
    if asin.len() != 10 || !asin.chars().all(|c| c.is_ascii_alphanumeric()) {
        anyhow::bail!(
            "Invalid ASIN format: '{}'. ASIN should be 10 alphanumeric characters.",
            asin
        );
    }
    Ok(asin)
}

impl ItemsCommand {
    /// Creates a new items command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Looks up items and returns formatted output.
    pub async fn execute(&self, asins: &[String], options: GetItemsOptions) -> Result<String> {
        let paapi = Paapi::connect(&self.config).context("Failed to create PA-API client")?;

        self.execute_with(&paapi, asins, options).await
    }

    /// Looks up items with a provided adapter (for testing).
    ///
    /// More than ten ids are split into several `GetItems` calls.
    pub async fn execute_with<A: ProductAdvertisingApi>(
        &self,
        paapi: &Paapi<A>,
        asins: &[String],
        options: GetItemsOptions,
    ) -> Result<String> {
        let asins = asins.iter().map(|a| normalize_asin(a)).collect::<Result<Vec<_>>>()?;
        if asins.is_empty() {
            anyhow::bail!("At least one ASIN is required");
        }

        let mut items: Vec<Item> = Vec::with_capacity(asins.len());
        for batch in asins.chunks(MAX_ITEM_IDS) {
            info!("Looking up items: {}", batch.join(", "));
            items.extend(paapi.get_items(batch, options.clone()).await?);
        }

        let formatter = Formatter::new(self.config.format);
        Ok(match items.as_slice() {
            [item] => formatter.format_item(item),
            _ => formatter.format_items(&items),
        })
    }
}
