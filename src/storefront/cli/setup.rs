use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use storefront::filter::SortKey;
use storefront::model::Difficulty;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "storefront", bin_name = "storefront", version = get_version())]
#[command(about = "Browse, manage and buy website templates", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List templates, optionally filtered and sorted
    #[command(alias = "ls")]
    List(ListArgs),

    /// Search titles, descriptions, categories and tags
    Search {
        /// Search term
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },

    /// Show one template in full
    View {
        /// Template id
        id: String,
    },

    /// List the categories in the catalog
    Categories,

    /// Buy a template with the simulated checkout
    Buy(BuyArgs),

    /// Admin console (requires the PIN)
    Admin {
        /// Admin PIN
        #[arg(long)]
        pin: String,

        #[command(subcommand)]
        action: AdminCommands,
    },

    /// Look up orders and downloads
    Orders {
        #[command(subcommand)]
        action: OrderCommands,
    },

    /// Show or change configuration
    Config {
        /// Setting to show or change
        key: Option<String>,
        /// New value
        value: Option<String>,
    },

    /// Create the data directory and write a default config
    Init,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only this category ("All Templates" shows everything)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Free-text search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Minimum price
    #[arg(long)]
    pub min: Option<Decimal>,

    /// Maximum price
    #[arg(long)]
    pub max: Option<Decimal>,

    /// Match any of these tags (repeatable)
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Beginner, Intermediate, Advanced or All
    #[arg(short, long)]
    pub difficulty: Option<String>,

    /// featured, price, price-desc, rating, newest or title
    #[arg(long, default_value = "featured")]
    pub sort: SortKey,
}

#[derive(Args, Debug)]
pub struct BuyArgs {
    /// Template id
    pub id: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub last_name: String,

    #[arg(long, default_value = "")]
    pub country: String,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long, default_value = "")]
    pub card_number: String,

    /// MM/YY
    #[arg(long, default_value = "")]
    pub expiry: String,

    #[arg(long, default_value = "")]
    pub cvv: String,

    /// Name on the card
    #[arg(long, default_value = "")]
    pub cardholder: String,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Catalog statistics
    Dashboard,

    /// Every template, marking which can be edited or deleted
    Manage,

    /// Add a template
    Add {
        /// Explicit id (derived from the title when omitted)
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        fields: EntryArgs,
    },

    /// Edit a user-added template
    Edit {
        id: String,

        #[command(flatten)]
        fields: EntryArgs,
    },

    /// Delete user-added templates
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Remove every user-added template
    Clear,
}

/// Form fields shared by `admin add` and `admin edit`.
#[derive(Args, Debug, Default)]
pub struct EntryArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub price: Option<Decimal>,

    #[arg(long)]
    pub original_price: Option<Decimal>,

    #[arg(long)]
    pub rating: Option<f32>,

    #[arg(long)]
    pub reviews: Option<u32>,

    #[arg(long)]
    pub thumbnail: Option<String>,

    #[arg(long)]
    pub demo: Option<String>,

    #[arg(long)]
    pub download: Option<String>,

    #[arg(long)]
    pub purchase_url: Option<String>,

    /// Tag (repeatable)
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Feature bullet (repeatable)
    #[arg(short, long = "feature")]
    pub features: Vec<String>,

    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub featured: Option<bool>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub best_seller: Option<bool>,

    #[arg(long = "new", num_args = 0..=1, default_missing_value = "true")]
    pub is_new: Option<bool>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub popular: Option<bool>,
}

#[derive(Subcommand, Debug)]
pub enum OrderCommands {
    /// Show one order
    Show { order_id: String },

    /// Resolve a download token
    Download { token: String },

    /// Orders placed with an email address
    Customer { email: String },

    /// Sales summary
    Stats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_flags() {
        let cli = Cli::try_parse_from([
            "storefront", "list", "-c", "Blog", "--min", "10", "--max", "50", "-t", "seo", "-t",
            "blog", "--sort", "price-desc",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.category.as_deref(), Some("Blog"));
                assert_eq!(args.min, Some(Decimal::new(10, 0)));
                assert_eq!(args.tags, vec!["seo", "blog"]);
                assert_eq!(args.sort, SortKey::PriceHighLow);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_admin_add_flags() {
        let cli = Cli::try_parse_from([
            "storefront", "admin", "--pin", "2024", "add", "--title", "Mine", "--price", "19.5",
            "--featured", "--difficulty", "advanced",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Admin {
                pin,
                action: AdminCommands::Add { fields, .. },
            }) => {
                assert_eq!(pin, "2024");
                assert_eq!(fields.price, Some(Decimal::new(195, 1)));
                assert_eq!(fields.featured, Some(true));
                assert_eq!(fields.difficulty, Some(Difficulty::Advanced));
                assert_eq!(fields.best_seller, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_admin_edit_popular_flag() {
        let cli = Cli::try_parse_from([
            "storefront", "admin", "--pin", "2024", "edit", "draft", "--popular", "--new", "false",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Admin {
                action: AdminCommands::Edit { id, fields },
                ..
            }) => {
                assert_eq!(id, "draft");
                assert_eq!(fields.popular, Some(true));
                assert_eq!(fields.is_new, Some(false));
                assert_eq!(fields.featured, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bad_sort_key_rejected() {
        assert!(Cli::try_parse_from(["storefront", "list", "--sort", "cheapest"]).is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["storefront", "categories", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
