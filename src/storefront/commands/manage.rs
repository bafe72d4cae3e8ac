use crate::admin::manage_list;
use crate::catalog::CatalogRepository;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(repo: &CatalogRepository<S>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_managed_entries(manage_list(repo)))
}
