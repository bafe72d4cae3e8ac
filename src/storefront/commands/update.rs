use crate::catalog::CatalogRepository;
use crate::commands::{report_validation, CmdMessage, CmdResult};
use crate::error::{Result, StorefrontError};
use crate::model::EntryPatch;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(
    repo: &mut CatalogRepository<S>,
    id: &str,
    patch: &EntryPatch,
) -> Result<CmdResult> {
    if patch.is_empty() {
        if repo.is_builtin(id) {
            return Err(StorefrontError::BuiltInEntry(id.to_string()));
        }
        if repo.get(id).is_none() {
            return Err(StorefrontError::NotFound(id.to_string()));
        }
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::warning(format!("Nothing to update for {}", id)));
        return Ok(result);
    }

    report_validation(repo.update(id, patch), |updated| {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success(format!(
            "Template updated ({}): {}",
            updated.id, updated.title
        )));
        result.with_affected_entries(vec![updated])
    })
}
