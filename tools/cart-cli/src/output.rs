//! Output formatting for the CLI.

use console::style;
use marketplace_cart::{CartItem, CartSnapshot};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Whether JSON output was requested.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print the cart: one row per product followed by the totals, or the
    /// whole snapshot as JSON.
    pub fn cart(&self, snapshot: &CartSnapshot) {
        if self.json {
            self.json(snapshot);
            return;
        }

        println!("\n{}", style("Cart").bold().underlined());
        if snapshot.items.is_empty() {
            self.info("The cart is empty");
            return;
        }

        println!(
            "  {}",
            style(format!("{:<12}  {:<32}  {:>10}  {:>5}", "ID", "PRODUCT", "PRICE", "QTY")).dim()
        );
        for item in &snapshot.items {
            self.line_item(item);
        }

        println!();
        println!("  {}: {}", style("Items").dim(), snapshot.total_items_in_cart);
        println!("  {}: {}", style("Total").dim(), style(&snapshot.cart_total).bold());
    }

    fn line_item(&self, item: &CartItem) {
        let title: String = item.title.chars().take(32).collect();
        println!(
            "  {:<12}  {:<32}  {:>10}  {:>5}",
            item.id.as_str(),
            title,
            item.price.to_string(),
            item.quantity
        );
    }
}
