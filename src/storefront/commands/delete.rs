use crate::catalog::CatalogRepository;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(repo: &mut CatalogRepository<S>, ids: &[String]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for removed in repo.delete_many(ids)? {
        result.add_message(CmdMessage::success(format!(
            "Template deleted ({}): {}",
            removed.id, removed.title
        )));
        result.affected_entries.push(removed);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::error::StorefrontError;
    use crate::store::memory::fixtures::user_entry;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn deletes_user_entries() {
        let mut repo = CatalogRepository::new(InMemoryStore::new());
        add::run(&mut repo, user_entry("One", "Blog")).unwrap();
        add::run(&mut repo, user_entry("Two", "Blog")).unwrap();

        let result = run(&mut repo, &["one".into(), "two".into()]).unwrap();
        assert_eq!(result.affected_entries.len(), 2);
        assert_eq!(repo.all().len(), 8);
    }

    #[test]
    fn builtin_in_the_list_deletes_nothing() {
        let mut repo = CatalogRepository::new(InMemoryStore::new());
        add::run(&mut repo, user_entry("One", "Blog")).unwrap();

        let err = run(&mut repo, &["one".into(), "inkwell-blog".into()]).unwrap_err();
        assert!(matches!(err, StorefrontError::BuiltInEntry(_)));
        assert!(repo.get("one").is_some());
        assert!(repo.get("inkwell-blog").is_some());
    }

    #[test]
    fn unknown_id_in_the_list_deletes_nothing() {
        let mut repo = CatalogRepository::new(InMemoryStore::new());
        add::run(&mut repo, user_entry("One", "Blog")).unwrap();

        let err = run(&mut repo, &["one".into(), "missing".into()]).unwrap_err();
        assert!(matches!(err, StorefrontError::NotFound(ref id) if id == "missing"));
        assert!(repo.get("one").is_some());
    }
}
