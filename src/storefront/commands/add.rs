use crate::catalog::CatalogRepository;
use crate::commands::{report_validation, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::CatalogEntry;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(
    repo: &mut CatalogRepository<S>,
    entry: CatalogEntry,
) -> Result<CmdResult> {
    report_validation(repo.add(entry), |added| {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success(format!(
            "Template added ({}): {}",
            added.id, added.title
        )));
        result.with_affected_entries(vec![added])
    })
}
