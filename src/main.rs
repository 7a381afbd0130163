//! amz-paapi - Amazon Product Advertising API 5.0 CLI
//!
//! Searches and looks up items through the signed PA-API 5.0 endpoints.

use amz_paapi::commands::{parse_extra, resources_or_default, ItemsCommand, SearchCommand};
use amz_paapi::config::{Config, OutputFormat};
use amz_paapi::{GetItemsOptions, Locale, SearchOptions};
use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "amz-paapi",
    version,
    about = "Amazon Product Advertising API 5.0 search and lookup CLI",
    long_about = "Search Amazon items and look them up by ASIN through the signed Product Advertising API 5.0."
)]
struct Cli {
    /// Marketplace locale; fills host, region and marketplace when unset
    #[arg(short, long, global = true, env = "PAAPI_LOCALE")]
    locale: Option<Locale>,

    /// PA-API access key
    #[arg(long, global = true, env = "PAAPI_ACCESS_KEY", hide_env_values = true)]
    access_key: Option<String>,

    /// PA-API secret key
    #[arg(long, global = true, env = "PAAPI_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Associates partner tag
    #[arg(long, global = true, env = "PAAPI_PARTNER_TAG")]
    partner_tag: Option<String>,

    /// PA-API host (e.g., webservices.amazon.de)
    #[arg(long, global = true, env = "PAAPI_HOST")]
    host: Option<String>,

    /// AWS region used for signing (e.g., eu-west-1)
    #[arg(long, global = true, env = "PAAPI_REGION")]
    region: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "PAAPI_PROXY")]
    proxy: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search items in a search index
    #[command(alias = "s")]
    Search {
        /// Search index (e.g., All, Books, Electronics)
        index: String,

        /// Search keywords
        keywords: Option<String>,

        /// Number of items to return (1-10)
        #[arg(short = 'n', long, default_value = "10")]
        count: i64,

        /// Resource to request (repeatable)
        #[arg(short, long = "resource")]
        resources: Vec<String>,

        /// Brand filter
        #[arg(long)]
        brand: Option<String>,

        /// Sort order (e.g., Price:LowToHigh, AvgCustomerReviews)
        #[arg(long)]
        sort_by: Option<String>,

        /// Minimum price in the lowest currency denomination (e.g., cents)
        #[arg(long)]
        min_price: Option<i64>,

        /// Maximum price in the lowest currency denomination (e.g., cents)
        #[arg(long)]
        max_price: Option<i64>,

        /// Minimum customer rating (1-4)
        #[arg(long)]
        min_rating: Option<i64>,

        /// Minimum saving percentage (1-99)
        #[arg(long)]
        min_saving: Option<i64>,

        /// Only return Prime-eligible items
        #[arg(long)]
        prime_only: bool,

        /// Result page (1-10)
        #[arg(long)]
        page: Option<i64>,

        /// Raw request field as KEY=JSON (repeatable)
        #[arg(long = "set", value_parser = parse_extra)]
        extra: Vec<(String, Value)>,
    },

    /// Look up items by ASIN
    #[command(alias = "i")]
    Items {
        /// ASIN(s) to look up
        #[arg(required = true)]
        asins: Vec<String>,

        /// Resource to request (repeatable)
        #[arg(short, long = "resource")]
        resources: Vec<String>,

        /// Raw request field as KEY=JSON (repeatable)
        #[arg(long = "set", value_parser = parse_extra)]
        extra: Vec<(String, Value)>,
    },

    /// List supported marketplace locales
    Locales,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;
    if let Some(locale) = cli.locale {
        config.locale = Some(locale);
    }
    if let Some(access_key) = cli.access_key {
        config.access_key = access_key;
    }
    if let Some(secret_key) = cli.secret_key {
        config.secret_key = secret_key;
    }
    if let Some(partner_tag) = cli.partner_tag {
        config.partner_tag = partner_tag;
    }
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(region) = cli.region {
        config.region = region;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    // Without a host or a locale, target the US marketplace
    if config.locale.is_none() && config.host.trim().is_empty() {
        config.locale = Some(Locale::default());
    }
    let config = config.apply_locale();

    match cli.command {
        Commands::Search {
            index,
            keywords,
            count,
            resources,
            brand,
            sort_by,
            min_price,
            max_price,
            min_rating,
            min_saving,
            prime_only,
            page,
            extra,
        } => {
            let mut options = SearchOptions::new()
                .keywords(keywords.unwrap_or_default())
                .item_count(count)
                .resources(resources_or_default(resources))
                .price_range(min_price, max_price);

            options.brand = brand;
            options.sort_by = sort_by;
            options.min_reviews_rating = min_rating;
            options.min_saving_percent = min_saving;
            options.item_page = page;
            if prime_only {
                options = options.delivery_flag("Prime");
            }
            options.extra.extend(extra);

            let cmd = SearchCommand::new(config);
            let output = cmd.execute(&index, options).await?;
            println!("{}", output);
        }

        Commands::Items { asins, resources, extra } => {
            let mut options = GetItemsOptions::new().resources(resources_or_default(resources));
            options.extra.extend(extra);

            let cmd = ItemsCommand::new(config);
            let output = cmd.execute(&asins, options).await?;
            println!("{}", output);
        }

        Commands::Locales => {
            println!("Supported PA-API locales:\n");
            println!("{:<6} {:<28} {:<22} {:<10}", "Code", "Host", "Marketplace", "Region");
            println!("{:-<6} {:-<28} {:-<22} {:-<10}", "", "", "", "");

            for locale in Locale::all() {
                println!(
                    "{:<6} {:<28} {:<22} {:<10}",
                    locale.to_string(),
                    locale.host(),
                    locale.marketplace(),
                    locale.region()
                );
            }
        }
    }

    Ok(())
}
