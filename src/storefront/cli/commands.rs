//! Handlers: turn parsed arguments into API calls and print what comes back.

use super::init_tracing;
use super::print::{
    print_config, print_dashboard, print_download, print_entries, print_entry_detail,
    print_managed, print_messages, print_order, print_stored_orders, print_summary,
};
use super::setup::{AdminCommands, BuyArgs, Cli, Commands, EntryArgs, ListArgs, OrderCommands};
use clap::Parser;
use std::collections::BTreeSet;
use storefront::api::StorefrontApi;
use storefront::commands::checkout::PurchaseRequest;
use storefront::commands::config::ConfigAction;
use storefront::commands::CmdResult;
use storefront::error::{Result, StorefrontError};
use storefront::filter::{CatalogFilter, PriceRange};
use storefront::init::initialize;
use storefront::model::{CatalogEntry, CustomerInfo, EntryFlags, EntryPatch, PaymentInfo};
use storefront::store::fs::FileStore;

struct AppContext {
    api: StorefrontApi<FileStore>,
    currency: String,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = initialize()?;
    let mut ctx = AppContext {
        currency: ctx.config.currency.clone(),
        api: ctx.api,
    };

    match cli.command {
        None => handle_list(&ctx, ListArgs::default()),
        Some(Commands::List(args)) => handle_list(&ctx, args),
        Some(Commands::Search { term }) => handle_search(&ctx, term),
        Some(Commands::View { id }) => handle_view(&ctx, &id),
        Some(Commands::Categories) => {
            let result = ctx.api.categories()?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Buy(args)) => handle_buy(&mut ctx, args),
        Some(Commands::Admin { pin, action }) => handle_admin(&mut ctx, &pin, action),
        Some(Commands::Orders { action }) => handle_orders(&ctx, action),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Init) => {
            let result = ctx.api.init()?;
            finish(&result);
            Ok(())
        }
    }
}

/// Prints the messages and exits non-zero when any of them is an error.
fn finish(result: &CmdResult) {
    print_messages(&result.messages);
    if result.has_errors() {
        std::process::exit(1);
    }
}

fn handle_list(ctx: &AppContext, args: ListArgs) -> Result<()> {
    let filter = build_filter(&args)?;
    let result = ctx.api.list_entries(&filter, args.sort)?;
    print_entries(&result.listed_entries, &ctx.currency);
    print_messages(&result.messages);
    Ok(())
}

fn build_filter(args: &ListArgs) -> Result<CatalogFilter> {
    let mut filter = CatalogFilter::new().tags(args.tags.iter().map(String::as_str));
    if let Some(category) = &args.category {
        filter = filter.category(category);
    }
    if let Some(search) = &args.search {
        filter = filter.search(search);
    }
    let range = match (args.min, args.max) {
        (Some(min), Some(max)) => Some(PriceRange::new(min, max).map_err(StorefrontError::Api)?),
        (Some(min), None) => Some(PriceRange::at_least(min)),
        (None, Some(max)) => Some(PriceRange::at_most(max)),
        (None, None) => None,
    };
    if let Some(range) = range {
        filter = filter.price_range(range);
    }
    if let Some(label) = &args.difficulty {
        filter = filter.difficulty_label(label).map_err(StorefrontError::Api)?;
    }
    Ok(filter)
}

fn handle_search(ctx: &AppContext, term: Vec<String>) -> Result<()> {
    let result = ctx.api.search_entries(&term.join(" "))?;
    print_entries(&result.listed_entries, &ctx.currency);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, id: &str) -> Result<()> {
    let result = ctx.api.view_entry(id)?;
    for entry in &result.listed_entries {
        print_entry_detail(entry, &ctx.currency);
    }
    Ok(())
}

fn handle_buy(ctx: &mut AppContext, args: BuyArgs) -> Result<()> {
    let request = PurchaseRequest {
        entry_id: args.id,
        customer: CustomerInfo {
            email: args.email,
            first_name: args.first_name,
            last_name: args.last_name,
            country: args.country,
            phone: args.phone,
        },
        payment: PaymentInfo {
            card_number: args.card_number,
            expiry: args.expiry,
            cvv: args.cvv,
            cardholder_name: args.cardholder,
        },
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let result = runtime.block_on(ctx.api.purchase(request))?;

    if let Some(order) = &result.order {
        print_order(order, &ctx.currency);
    }
    finish(&result);
    Ok(())
}

fn handle_admin(ctx: &mut AppContext, pin: &str, action: AdminCommands) -> Result<()> {
    let unlocked = ctx.api.unlock_admin(pin)?;
    if !ctx.api.is_admin() {
        print_messages(&unlocked.messages);
        return Err(StorefrontError::AdminLocked);
    }

    let result = match action {
        AdminCommands::Dashboard => {
            let result = ctx.api.dashboard()?;
            if let Some(dashboard) = &result.dashboard {
                print_dashboard(dashboard, &ctx.currency);
            }
            result
        }
        AdminCommands::Manage => {
            let result = ctx.api.manage_entries()?;
            print_managed(&result.managed_entries, &ctx.currency);
            result
        }
        AdminCommands::Add { id, fields } => {
            let mut entry = new_entry(fields);
            if let Some(id) = id {
                entry.id = id;
            }
            ctx.api.add_entry(entry)?
        }
        AdminCommands::Edit { id, fields } => ctx.api.update_entry(&id, &entry_patch(fields))?,
        AdminCommands::Delete { ids } => ctx.api.delete_entries(&ids)?,
        AdminCommands::Clear => ctx.api.clear_user_entries()?,
    };

    ctx.api.lock_admin();
    finish(&result);
    Ok(())
}

fn new_entry(fields: EntryArgs) -> CatalogEntry {
    let flags = EntryFlags {
        is_featured: fields.featured.unwrap_or(false),
        is_best_seller: fields.best_seller.unwrap_or(false),
        is_new: fields.is_new.unwrap_or(false),
        is_popular: fields.popular.unwrap_or(false),
    };
    let mut entry = CatalogEntry::new(
        fields.title.unwrap_or_default(),
        fields.category.unwrap_or_default(),
        fields.description.unwrap_or_default(),
        fields.price.unwrap_or_default(),
    )
    .with_tags(fields.tags)
    .with_features(fields.features);

    entry.original_price = fields.original_price;
    entry.rating = fields.rating.unwrap_or(0.0);
    entry.review_count = fields.reviews.unwrap_or(0);
    entry.thumbnail_url = fields.thumbnail.unwrap_or_default();
    entry.demo_url = fields.demo;
    entry.download_url = fields.download;
    entry.external_purchase_url = fields.purchase_url;
    entry.flags = flags;
    if let Some(difficulty) = fields.difficulty {
        entry.difficulty = difficulty;
    }
    entry
}

fn entry_patch(fields: EntryArgs) -> EntryPatch {
    EntryPatch {
        title: fields.title,
        category: fields.category,
        description: fields.description,
        price: fields.price,
        original_price: fields.original_price.map(Some),
        rating: fields.rating,
        review_count: fields.reviews,
        thumbnail_url: fields.thumbnail,
        tags: (!fields.tags.is_empty()).then(|| fields.tags.into_iter().collect::<BTreeSet<_>>()),
        features: (!fields.features.is_empty()).then_some(fields.features),
        external_purchase_url: fields.purchase_url.map(Some),
        download_url: fields.download.map(Some),
        demo_url: fields.demo.map(Some),
        is_featured: fields.featured,
        is_best_seller: fields.best_seller,
        is_new: fields.is_new,
        is_popular: fields.popular,
        difficulty: fields.difficulty,
    }
}

fn handle_orders(ctx: &AppContext, action: OrderCommands) -> Result<()> {
    let result = match action {
        OrderCommands::Show { order_id } => ctx.api.get_order(&order_id)?,
        OrderCommands::Download { token } => ctx.api.get_download(&token)?,
        OrderCommands::Customer { email } => ctx.api.orders_for_customer(&email)?,
        OrderCommands::Stats => ctx.api.sales_stats()?,
    };

    print_stored_orders(&result.stored_orders, &ctx.currency);
    if let Some(grant) = &result.download {
        print_download(grant);
    }
    if let Some(summary) = &result.summary {
        print_summary(summary, &ctx.currency);
    }
    finish(&result);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = ctx.api.config_action(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    finish(&result);
    Ok(())
}
