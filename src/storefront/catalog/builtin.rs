//! Templates shipped with the storefront. They are fixed for the life of the
//! process and can never be edited or deleted through the repository.

use crate::model::{CatalogEntry, Difficulty, EntryFlags};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;

const IMAGE_HOST: &str = "https://images.storefront.dev/templates";
const DEMO_HOST: &str = "https://demo.storefront.dev";
const DOWNLOAD_HOST: &str = "https://downloads.storefront.dev";

pub static BUILTIN_ENTRIES: Lazy<Vec<CatalogEntry>> = Lazy::new(|| {
    vec![
        builtin(
            "modern-portfolio",
            "Modern Portfolio",
            "Portfolio",
            "A clean, animated portfolio for designers and developers to showcase case studies.",
            (49, 79),
            (4.9, 128),
            &["portfolio", "personal", "animation"],
            &["Animated hero section", "Case study pages", "Dark mode", "Contact form"],
            EntryFlags {
                is_best_seller: true,
                is_featured: true,
                is_popular: true,
                ..EntryFlags::default()
            },
            Difficulty::Beginner,
        ),
        builtin(
            "corporate-suite",
            "Corporate Suite",
            "Business",
            "A multi-page business site with services, team and pricing sections.",
            (59, 89),
            (4.7, 86),
            &["business", "corporate", "multi-page"],
            &["Services grid", "Team profiles", "Pricing tables", "Newsletter signup"],
            EntryFlags {
                is_featured: true,
                ..EntryFlags::default()
            },
            Difficulty::Intermediate,
        ),
        builtin(
            "shopfront-commerce",
            "Shopfront Commerce",
            "E-commerce",
            "A storefront template with product grids, a cart drawer and checkout pages.",
            (79, 119),
            (4.8, 142),
            &["ecommerce", "shop", "cart"],
            &["Product grid", "Cart drawer", "Checkout flow", "Wishlist"],
            EntryFlags {
                is_best_seller: true,
                is_popular: true,
                ..EntryFlags::default()
            },
            Difficulty::Advanced,
        ),
        builtin(
            "inkwell-blog",
            "Inkwell Blog",
            "Blog",
            "A typography-first blog with reading time, tags and an author page.",
            (39, 0),
            (4.6, 64),
            &["blog", "writing", "typography"],
            &["Reading time", "Tag archive", "Author page", "RSS ready"],
            EntryFlags::default(),
            Difficulty::Beginner,
        ),
        builtin(
            "launchpad-landing",
            "Launchpad Landing",
            "Landing Page",
            "A single-page product launch template with a waitlist form and countdown.",
            (29, 49),
            (4.5, 51),
            &["landing", "startup", "waitlist"],
            &["Countdown timer", "Waitlist form", "Feature highlights"],
            EntryFlags {
                is_new: true,
                ..EntryFlags::default()
            },
            Difficulty::Beginner,
        ),
        builtin(
            "studio-agency",
            "Studio Agency",
            "Agency",
            "A bold agency site with a project showcase, client logos and testimonials.",
            (69, 0),
            (4.7, 73),
            &["agency", "creative", "portfolio"],
            &["Project showcase", "Client logo wall", "Testimonials slider"],
            EntryFlags {
                is_popular: true,
                ..EntryFlags::default()
            },
            Difficulty::Intermediate,
        ),
        builtin(
            "cloud-saas",
            "Cloud SaaS",
            "SaaS",
            "A SaaS marketing site with feature tours, pricing plans and a docs layout.",
            (89, 129),
            (4.8, 97),
            &["saas", "software", "pricing"],
            &["Feature tour", "Pricing plans", "Docs layout", "Changelog page"],
            EntryFlags {
                is_new: true,
                is_featured: true,
                ..EntryFlags::default()
            },
            Difficulty::Advanced,
        ),
        builtin(
            "bistro-table",
            "Bistro Table",
            "Restaurant",
            "A restaurant site with a menu, reservations and an opening-hours widget.",
            (45, 0),
            (4.4, 38),
            &["restaurant", "food", "menu"],
            &["Menu sections", "Reservation form", "Opening hours"],
            EntryFlags::default(),
            Difficulty::Beginner,
        ),
    ]
});

#[allow(clippy::too_many_arguments)]
fn builtin(
    id: &str,
    title: &str,
    category: &str,
    description: &str,
    (price, original): (i64, i64),
    (rating, reviews): (f32, u32),
    tags: &[&str],
    features: &[&str],
    flags: EntryFlags,
    difficulty: Difficulty,
) -> CatalogEntry {
    let mut entry = CatalogEntry::new(title, category, description, Decimal::new(price, 0))
        .with_id(id)
        .with_thumbnail(format!("{}/{}.webp", IMAGE_HOST, id))
        .with_demo(format!("{}/{}", DEMO_HOST, id))
        .with_tags(tags.iter().copied())
        .with_features(features.iter().copied())
        .with_difficulty(difficulty);
    entry.original_price = (original > 0).then(|| Decimal::new(original, 0));
    entry.rating = rating;
    entry.review_count = reviews;
    entry.download_url = Some(format!("{}/{}.zip", DOWNLOAD_HOST, id));
    entry.flags = flags;
    entry
}

pub fn builtin_entries() -> Vec<CatalogEntry> {
    BUILTIN_ENTRIES.clone()
}
