use crate::catalog::CatalogRepository;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(repo: &mut CatalogRepository<S>) -> Result<CmdResult> {
    let removed = repo.clear_user_entries()?;
    let mut result = CmdResult::default();
    if removed == 0 {
        result.add_message(CmdMessage::info("No user templates to remove."));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Removed {} user template(s). Built-in templates are unchanged.",
            removed
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::store::memory::fixtures::user_entry;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn clears_user_entries_only() {
        let mut repo = CatalogRepository::new(InMemoryStore::new());
        add::run(&mut repo, user_entry("One", "Blog")).unwrap();
        let result = run(&mut repo).unwrap();
        assert!(result.messages[0].content.starts_with("Removed 1"));
        assert_eq!(repo.all().len(), 8);
    }
}
