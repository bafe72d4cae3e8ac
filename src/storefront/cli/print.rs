use chrono::{DateTime, Utc};
use colored::Colorize;
use rust_decimal::Decimal;
use storefront::admin::{Dashboard, ManagedEntry};
use storefront::commands::{CmdMessage, MessageLevel};
use storefront::config::StorefrontConfig;
use storefront::model::{CatalogEntry, OrderRecord};
use storefront::orders::{DownloadGrant, SalesSummary, StoredOrder};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 22;
const CATEGORY_WIDTH: usize = 14;
const PRICE_WIDTH: usize = 12;
const TIME_WIDTH: usize = 16;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn money(amount: Decimal, currency: &str) -> String {
    format!("{:.2} {}", amount, currency)
}

fn badges(entry: &CatalogEntry) -> String {
    let mut out = Vec::new();
    if entry.flags.is_featured {
        out.push("featured".magenta().to_string());
    }
    if entry.flags.is_best_seller {
        out.push("best seller".yellow().to_string());
    }
    if entry.flags.is_new {
        out.push("new".cyan().to_string());
    }
    if entry.flags.is_popular {
        out.push("popular".blue().to_string());
    }
    out.join(" ")
}

pub(super) fn print_entries(entries: &[CatalogEntry], currency: &str) {
    if entries.is_empty() {
        println!("No templates found.");
        return;
    }

    for entry in entries {
        let fixed = ID_WIDTH + CATEGORY_WIDTH + PRICE_WIDTH + 6;
        let title = truncate_to_width(&entry.title, LINE_WIDTH.saturating_sub(fixed) / 2);
        let padding = (LINE_WIDTH.saturating_sub(fixed) / 2).saturating_sub(title.width());

        println!(
            "{:<id_w$}  {}{}  {:<cat_w$}  {:>price_w$}  {}",
            truncate_to_width(&entry.id, ID_WIDTH).yellow(),
            title.bold(),
            " ".repeat(padding),
            truncate_to_width(&entry.category, CATEGORY_WIDTH),
            money(entry.price, currency),
            badges(entry),
            id_w = ID_WIDTH,
            cat_w = CATEGORY_WIDTH,
            price_w = PRICE_WIDTH,
        );
    }
}

pub(super) fn print_entry_detail(entry: &CatalogEntry, currency: &str) {
    println!("{} {}", entry.title.bold(), format!("({})", entry.id).dimmed());
    println!("--------------------------------");
    println!("{}", entry.description);
    println!();

    let price = match entry.original_price {
        Some(original) if original > entry.price => format!(
            "{} {}",
            money(entry.price, currency).green(),
            money(original, currency).dimmed().strikethrough()
        ),
        _ => money(entry.price, currency).green().to_string(),
    };
    println!("Price:      {}", price);
    println!("Category:   {}", entry.category);
    println!("Difficulty: {}", entry.difficulty);
    println!(
        "Rating:     {:.1} ({} reviews)",
        entry.rating, entry.review_count
    );
    if !entry.tags.is_empty() {
        let tags: Vec<&str> = entry.tags.iter().map(String::as_str).collect();
        println!("Tags:       {}", tags.join(", "));
    }
    let flags = badges(entry);
    if !flags.is_empty() {
        println!("            {}", flags);
    }
    if let Some(demo) = &entry.demo_url {
        println!("Demo:       {}", demo.underline());
    }
    if !entry.features.is_empty() {
        println!();
        for feature in &entry.features {
            println!("  • {}", feature);
        }
    }
}

pub(super) fn print_dashboard(dashboard: &Dashboard, currency: &str) {
    println!("{}", "Catalog dashboard".bold());
    println!("  Total templates:  {}", dashboard.total);
    println!("  Built-in:         {}", dashboard.built_in);
    println!("  User-added:       {}", dashboard.user_added);
    println!("  Featured:         {}", dashboard.featured);
    println!("  Average price:    {}", money(dashboard.average_price, currency));
    println!();
    for (category, count) in &dashboard.by_category {
        println!("  {:<width$} {}", category, count, width = CATEGORY_WIDTH + 4);
    }
}

pub(super) fn print_managed(rows: &[ManagedEntry], currency: &str) {
    for row in rows {
        let origin = if row.built_in {
            "built-in".dimmed()
        } else {
            "custom".green()
        };
        println!(
            "{:<id_w$}  {:<9}  {:>price_w$}  {}",
            truncate_to_width(&row.entry.id, ID_WIDTH).yellow(),
            origin,
            money(row.entry.price, currency),
            row.entry.title,
            id_w = ID_WIDTH,
            price_w = PRICE_WIDTH,
        );
    }
}

pub(super) fn print_order(order: &OrderRecord, currency: &str) {
    println!("{}", "Order confirmed".green().bold());
    println!("  Order:     {}", order.order_id);
    println!("  Template:  {}", order.catalog_entry_id);
    println!("  Customer:  {} <{}>", order.customer.full_name(), order.customer.email);
    println!("  Charged:   {}", money(order.amount_charged, currency));
    println!("  Download:  storefront orders download {}", order.download_token);
}

pub(super) fn print_stored_orders(orders: &[StoredOrder], currency: &str) {
    for stored in orders {
        let order = &stored.order;
        println!(
            "{}  {}  {:>price_w$}  {}",
            order.order_id.yellow(),
            format_time_ago(order.created_at).dimmed(),
            money(order.amount_charged, currency),
            stored.entry_title,
            price_w = PRICE_WIDTH,
        );
    }
}

pub(super) fn print_download(grant: &DownloadGrant) {
    match &grant.download_url {
        Some(url) => println!("{}", url.underline()),
        None => println!("{}", grant.catalog_entry_id),
    }
    println!(
        "{}",
        format!("Link valid until {}", grant.expires_at.format("%Y-%m-%d %H:%M UTC")).dimmed()
    );
}

pub(super) fn print_summary(summary: &SalesSummary, currency: &str) {
    println!("{}", "Sales".bold());
    println!("  Orders:     {}", summary.order_count);
    println!("  Revenue:    {}", money(summary.revenue, currency));
    println!("  Customers:  {}", summary.unique_customers);
    for (entry_id, count) in &summary.orders_by_entry {
        println!("  {:<width$} {}", entry_id, count, width = ID_WIDTH);
    }
}

pub(super) fn print_config(config: &StorefrontConfig) {
    for key in StorefrontConfig::keys() {
        if let Ok(value) = config.get(key) {
            println!("{} = {}", key.bold(), value);
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
