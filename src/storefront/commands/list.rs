use crate::catalog::CatalogRepository;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::filter::{filter, sort_entries, CatalogFilter, SortKey};
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(
    repo: &CatalogRepository<S>,
    criteria: &CatalogFilter,
    sort: SortKey,
) -> Result<CmdResult> {
    let mut entries = filter(&repo.all(), criteria);
    sort_entries(&mut entries, sort);

    let mut result = CmdResult::default();
    if entries.is_empty() && !criteria.is_empty() {
        result.add_message(CmdMessage::info("No templates match the current filters."));
    }
    Ok(result.with_listed_entries(entries))
}

/// Distinct categories, prefixed by the "show everything" entry.
pub fn categories<S: KeyValueStore>(repo: &CatalogRepository<S>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(crate::catalog::ALL_CATEGORIES));
    for category in repo.categories() {
        result.add_message(CmdMessage::info(category));
    }
    Ok(result)
}
