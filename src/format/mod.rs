//! Output formatting for items (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::paapi::Item;

/// Formats items for output.
pub struct Formatter {
    format: OutputFormat,
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single item.
    pub fn format_item(&self, item: &Item) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(item),
            OutputFormat::Table => self.table_single(item),
            OutputFormat::Markdown => self.markdown_single(item),
            OutputFormat::Csv => self.csv_items(std::slice::from_ref(item)),
        }
    }

    /// Formats multiple items.
    pub fn format_items(&self, items: &[Item]) -> String {
        if items.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No items found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_items(items),
            OutputFormat::Table => self.table_items(items),
            OutputFormat::Markdown => self.markdown_items(items),
            OutputFormat::Csv => self.csv_items(items),
        }
    }

    // JSON formatting

    fn json_single(&self, item: &Item) -> String {
        serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_items(&self, items: &[Item]) -> String {
        serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_single(&self, item: &Item) -> String {
        let mut lines = Vec::new();

        lines.push(format!("ASIN:    {}", item.asin));
        lines.push(format!("Title:   {}", item.title().unwrap_or("N/A")));
        if let Some(url) = &item.detail_page_url {
            lines.push(format!("URL:     {}", url));
        }
        lines.push(format!("Price:   {}", item.display_price().unwrap_or("N/A")));
        if let Some(brand) = item.brand() {
            lines.push(format!("Brand:   {}", brand));
        }
        if let Some(prime) = item.is_prime_eligible() {
            lines.push(format!("Prime:   {}", if prime { "Yes" } else { "No" }));
        }
        if let Some(image) = item.image_url() {
            lines.push(format!("Image:   {}", image));
        }

        lines.join("\n")
    }

    fn table_items(&self, items: &[Item]) -> String {
        let asin_width = 10;
        let price_width = 12;
        let brand_width = 16;
        let title_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<asin_width$}  {:<price_width$}  {:<brand_width$}  {}",
            "ASIN", "Price", "Brand", "Title"
        ));
        lines.push(format!(
            "{:-<asin_width$}  {:-<price_width$}  {:-<brand_width$}  {:-<title_width$}",
            "", "", "", ""
        ));

        for item in items {
            lines.push(format!(
                "{:<asin_width$}  {:>price_width$}  {:<brand_width$}  {}",
                item.asin,
                item.display_price().unwrap_or("N/A"),
                truncate(item.brand().unwrap_or("-"), brand_width),
                truncate(item.title().unwrap_or("N/A"), title_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} items", items.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, item: &Item) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", item.title().unwrap_or(item.asin.as_str())));
        lines.push(String::new());

        lines.push(format!("- **ASIN:** {}", item.asin));
        if let Some(url) = &item.detail_page_url {
            lines.push(format!("- **URL:** [View on Amazon]({})", url));
        }
        if let Some(price) = item.display_price() {
            lines.push(format!("- **Price:** {}", price));
        }
        if let Some(brand) = item.brand() {
            lines.push(format!("- **Brand:** {}", brand));
        }
        if item.is_prime_eligible() == Some(true) {
            lines.push("- **Prime:** ✓".to_string());
        }

        lines.join("\n")
    }

    fn markdown_items(&self, items: &[Item]) -> String {
        let mut lines = Vec::new();

        lines.push("| ASIN | Price | Brand | Title |".to_string());
        lines.push("|------|-------|-------|-------|".to_string());

        for item in items {
            let title = truncate(item.title().unwrap_or("N/A"), 40);
            let title = match &item.detail_page_url {
                Some(url) => format!("[{}]({})", title, url),
                None => title,
            };

            lines.push(format!(
                "| {} | {} | {} | {} |",
                item.asin,
                item.display_price().unwrap_or("N/A"),
                item.brand().unwrap_or(""),
                title
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} items found*", items.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "asin,title,price,brand,prime,image,url".to_string()
    }

    fn csv_items(&self, items: &[Item]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for item in items {
            let prime = item.is_prime_eligible().map(|p| p.to_string()).unwrap_or_default();

            lines.push(format!(
                "{},{},{},{},{},{},{}",
                item.asin,
                Self::csv_escape(item.title().unwrap_or_default()),
                Self::csv_escape(item.display_price().unwrap_or_default()),
                Self::csv_escape(item.brand().unwrap_or_default()),
                prime,
                Self::csv_escape(item.image_url().unwrap_or_default()),
                Self::csv_escape(item.detail_page_url.as_deref().unwrap_or_default())
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_item() -> Item {
        serde_json::from_value(json!({
            "ASIN": "B08N5WRWNW",
            "DetailPageURL": "https://www.amazon.com/dp/B08N5WRWNW?tag=mytag-20",
            "ItemInfo": {
                "Title": { "DisplayValue": "Echo Dot (4th Gen), Charcoal" },
                "ByLineInfo": { "Brand": { "DisplayValue": "Amazon" } }
            },
            "Offers": {
                "Listings": [{
                    "Price": { "Amount": 49.99, "Currency": "USD", "DisplayAmount": "$49.99" },
                    "DeliveryInfo": { "IsPrimeEligible": true }
                }]
            },
            "Images": { "Primary": { "Medium": { "URL": "https://m.media-amazon.com/images/I/x.jpg" } } }
        }))
        .unwrap()
    }

    fn make_minimal_item() -> Item {
        Item { asin: "MINIMAL123".to_string(), ..Default::default() }
    }

    fn make_long_title_item() -> Item {
        serde_json::from_value(json!({
            "ASIN": "LONGTITLE1",
            "ItemInfo": { "Title": { "DisplayValue":
                "This is a very long product title that exceeds fifty characters and should be truncated" } }
        }))
        .unwrap()
    }

    // JSON format tests

    #[test]
    fn test_json_single_item_keeps_wire_names() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_item(&make_item());

        assert!(output.contains("\"ASIN\": \"B08N5WRWNW\""));
        assert!(output.contains("\"DetailPageURL\""));
        assert!(output.contains("$49.99"));
    }

    #[test]
    fn test_json_multiple_items() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_items(&[make_item(), make_minimal_item()]);

        assert!(output.starts_with('['));
        let parsed: Vec<Item> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].asin, "MINIMAL123");
    }

    #[test]
    fn test_json_empty() {
        let formatter = Formatter::new(OutputFormat::Json);
        assert_eq!(formatter.format_items(&[]), "[]");
    }

    // Table format tests

    #[test]
    fn test_table_single_item() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_item(&make_item());

        assert!(output.contains("ASIN:    B08N5WRWNW"));
        assert!(output.contains("Title:   Echo Dot (4th Gen), Charcoal"));
        assert!(output.contains("Price:   $49.99"));
        assert!(output.contains("Brand:   Amazon"));
        assert!(output.contains("Prime:   Yes"));
    }

    #[test]
    fn test_table_minimal_item() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_item(&make_minimal_item());

        assert!(output.contains("Title:   N/A"));
        assert!(output.contains("Price:   N/A"));
        assert!(!output.contains("Brand:"));
        assert!(!output.contains("URL:"));
    }

    #[test]
    fn test_table_multiple_items() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_items(&[make_item(), make_minimal_item()]);

        assert!(output.starts_with("ASIN"));
        assert!(output.contains("B08N5WRWNW"));
        assert!(output.contains("MINIMAL123"));
        assert!(output.contains("Total: 2 items"));
    }

    #[test]
    fn test_table_truncates_long_title() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_items(&[make_long_title_item()]);

        assert!(output.contains("..."));
        assert!(!output.contains("should be truncated"));
    }

    #[test]
    fn test_table_empty() {
        let formatter = Formatter::new(OutputFormat::Table);
        assert_eq!(formatter.format_items(&[]), "No items found.");
    }

    // Markdown format tests

    #[test]
    fn test_markdown_single_item() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let output = formatter.format_item(&make_item());

        assert!(output.starts_with("## Echo Dot (4th Gen), Charcoal"));
        assert!(output.contains("- **ASIN:** B08N5WRWNW"));
        assert!(output.contains("[View on Amazon](https://www.amazon.com/dp/B08N5WRWNW?tag=mytag-20)"));
        assert!(output.contains("- **Prime:** ✓"));
    }

    #[test]
    fn test_markdown_minimal_item_uses_asin_heading() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let output = formatter.format_item(&make_minimal_item());
        assert!(output.starts_with("## MINIMAL123"));
    }

    #[test]
    fn test_markdown_items_table() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let output = formatter.format_items(&[make_item(), make_minimal_item()]);

        assert!(output.contains("| ASIN | Price | Brand | Title |"));
        assert!(output.contains("| B08N5WRWNW | $49.99 | Amazon | [Echo Dot"));
        assert!(output.contains("| MINIMAL123 | N/A |  | N/A |"));
        assert!(output.contains("*2 items found*"));
    }

    // CSV format tests

    #[test]
    fn test_csv_items() {
        let formatter = Formatter::new(OutputFormat::Csv);
        let output = formatter.format_items(&[make_item(), make_minimal_item()]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "asin,title,price,brand,prime,image,url");
        assert!(lines[1].starts_with("B08N5WRWNW,\"Echo Dot (4th Gen), Charcoal\",$49.99,Amazon,true,"));
        assert_eq!(lines[2], "MINIMAL123,,,,,,");
    }

    #[test]
    fn test_csv_empty_is_header_only() {
        let formatter = Formatter::new(OutputFormat::Csv);
        assert_eq!(formatter.format_items(&[]), "asin,title,price,brand,prime,image,url");
    }

    #[test]
    fn test_csv_escapes_urls() {
        let item: Item = serde_json::from_value(json!({
            "ASIN": "B0COMMA001",
            "DetailPageURL": "https://www.amazon.com/dp/B0COMMA001?tag=a,b",
            "Images": { "Primary": { "Medium": { "URL": "https://m.media-amazon.com/images/I/x,y.jpg" } } }
        }))
        .unwrap();

        let formatter = Formatter::new(OutputFormat::Csv);
        let output = formatter.format_items(&[item]);
        let row = output.lines().nth(1).unwrap();

        assert!(row.ends_with(
            ",\"https://m.media-amazon.com/images/I/x,y.jpg\",\"https://www.amazon.com/dp/B0COMMA001?tag=a,b\""
        ));
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(Formatter::csv_escape("plain"), "plain");
        assert_eq!(Formatter::csv_escape("a,b"), "\"a,b\"");
        assert_eq!(Formatter::csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ñññññññññññ", 6), "ñññ...");
    }
}
