//! Search command implementation.

use crate::adapter::{Paapi, SearchOptions};
use crate::config::Config;
use crate::format::Formatter;
use crate::paapi::ProductAdvertisingApi;
use anyhow::{Context, Result};
use tracing::info;

/// Executes an item search.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the search and returns formatted output.
    pub async fn execute(&self, index: &str, options: SearchOptions) -> Result<String> {
        let paapi = Paapi::connect(&self.config).context("Failed to create PA-API client")?;

        self.execute_with(&paapi, index, options).await
    }

    /// Executes the search with a provided adapter (for testing).
    pub async fn execute_with<A: ProductAdvertisingApi>(
        &self,
        paapi: &Paapi<A>,
        index: &str,
        options: SearchOptions,
    ) -> Result<String> {
        info!("Searching {} for: {}", index, options.keywords);

        let items = paapi.search_items(index, options).await?;

        info!("Found {} items", items.len());

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_items(&items))
    }
}
