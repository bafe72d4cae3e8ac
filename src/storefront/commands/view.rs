use crate::catalog::CatalogRepository;
use crate::commands::CmdResult;
use crate::error::{Result, StorefrontError};
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(repo: &CatalogRepository<S>, id: &str) -> Result<CmdResult> {
    let entry = repo
        .get(id)
        .ok_or_else(|| StorefrontError::NotFound(id.to_string()))?;
    Ok(CmdResult::default().with_listed_entries(vec![entry]))
}
