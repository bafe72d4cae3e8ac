use crate::admin::dashboard;
use crate::catalog::CatalogRepository;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(repo: &CatalogRepository<S>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_dashboard(dashboard(repo)))
}
