use std::collections::{BTreeMap, HashMap, HashSet};

use log::debug;

use crate::errors::AppError;
use crate::models::url::{Link, VisitOutcome};
use crate::utils::id_gen::generate_unique_id;

/// In-memory short links keyed by alias.
#[derive(Debug, Default)]
pub struct LinkStore {
    links: HashMap<String, Link>,
    // Visitor ids already counted as unique, per alias
    visitors: HashMap<String, HashSet<String>>,
}

impl LinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Store a new link under a freshly drawn, unused alias.
    pub fn create(&mut self, owner_id: &str, long_url: &str) -> Link {
        let alias = generate_unique_id(|candidate| self.links.contains_key(candidate));
        let link = Link::new(alias.clone(), long_url.to_string(), owner_id.to_string());
        self.links.insert(alias, link.clone());
        link
    }

    pub fn get(&self, alias: &str) -> Option<&Link> {
        self.links.get(alias)
    }

    /// Look up a link on behalf of `owner_id`, refusing anyone else.
    pub fn check_owner(&self, alias: &str, owner_id: &str) -> Result<&Link, AppError> {
        let link = self
            .get(alias)
            .ok_or_else(|| AppError::not_found("Short URL not found"))?;

        if !link.is_owned_by(owner_id) {
            return Err(AppError::forbidden(
                "Access denied: You can only manage your own URLs",
            ));
        }

        Ok(link)
    }

    pub fn update_target(
        &mut self,
        alias: &str,
        owner_id: &str,
        long_url: &str,
    ) -> Result<(), AppError> {
        self.check_owner(alias, owner_id)?;
        if let Some(link) = self.links.get_mut(alias) {
            link.long_url = long_url.to_string();
        }
        Ok(())
    }

    pub fn delete(&mut self, alias: &str, owner_id: &str) -> Result<Link, AppError> {
        self.check_owner(alias, owner_id)?;
        self.visitors.remove(alias);
        self.links
            .remove(alias)
            .ok_or_else(|| AppError::not_found("Short URL not found"))
    }

    /// Snapshot of every link owned by `owner_id`, ordered by alias.
    pub fn list_by_owner(&self, owner_id: &str) -> BTreeMap<String, Link> {
        self.links
            .iter()
            .filter(|(_, link)| link.is_owned_by(owner_id))
            .map(|(alias, link)| (alias.clone(), link.clone()))
            .collect()
    }

    /// Count a redirect through `alias` made by `visitor_id`.
    pub fn record_visit(&mut self, alias: &str, visitor_id: &str) -> Result<VisitOutcome, AppError> {
        let link = self
            .links
            .get_mut(alias)
            .ok_or_else(|| AppError::not_found("Short URL not found"))?;

        let first_visit = self
            .visitors
            .entry(alias.to_string())
            .or_default()
            .insert(visitor_id.to_string());
        link.register_visit(first_visit);
        debug!(
            "Visit to {} (total {}, unique {})",
            alias, link.total_visits, link.unique_visits
        );

        Ok(VisitOutcome {
            long_url: link.long_url.clone(),
            first_visit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_get_returns_target_and_owner() {
        let mut store = LinkStore::new();
        let link = store.create("u1", "http://example.com");

        let stored = store.get(&link.alias).unwrap();
        assert_eq!(stored.long_url, "http://example.com");
        assert_eq!(stored.owner_id, "u1");
        assert_eq!(stored.total_visits, 0);
        assert_eq!(stored.unique_visits, 0);
        assert_eq!(link.alias.len(), 6);
    }

    #[test]
    fn aliases_do_not_overwrite_each_other() {
        let mut store = LinkStore::new();
        for i in 0..100 {
            store.create("u1", &format!("http://example.com/{i}"));
        }
        assert_eq!(store.len(), 100);
    }

    #[test]
    fn owner_can_update_target() {
        let mut store = LinkStore::new();
        let link = store.create("u1", "http://example.com");

        store
            .update_target(&link.alias, "u1", "http://example.org")
            .unwrap();
        assert_eq!(store.get(&link.alias).unwrap().long_url, "http://example.org");
    }

    #[test]
    fn non_owner_cannot_update_or_delete() {
        let mut store = LinkStore::new();
        let link = store.create("u1", "http://example.com");

        let err = store
            .update_target(&link.alias, "u2", "http://evil.example")
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let err = store.delete(&link.alias, "u2").unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let stored = store.get(&link.alias).unwrap();
        assert_eq!(stored.long_url, "http://example.com");
    }

    #[test]
    fn unknown_alias_is_not_found() {
        let mut store = LinkStore::new();
        assert!(matches!(
            store.update_target("nope00", "u1", "http://example.com"),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(store.delete("nope00", "u1"), Err(AppError::NotFound(_))));
        assert!(matches!(
            store.check_owner("nope00", "u1"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn owner_can_delete() {
        let mut store = LinkStore::new();
        let link = store.create("u1", "http://example.com");

        store.record_visit(&link.alias, "v1").unwrap();

        let removed = store.delete(&link.alias, "u1").unwrap();
        assert_eq!(removed.alias, link.alias);
        assert!(store.get(&link.alias).is_none());
        assert!(!store.visitors.contains_key(&link.alias));
    }

    #[test]
    fn list_by_owner_is_disjoint_across_users() {
        let mut store = LinkStore::new();
        store.create("u1", "http://a.example");
        store.create("u1", "http://b.example");
        store.create("u2", "http://c.example");

        let first = store.list_by_owner("u1");
        let second = store.list_by_owner("u2");

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 1);
        assert!(first.values().all(|link| link.owner_id == "u1"));
        assert!(first.keys().all(|alias| !second.contains_key(alias)));
        assert!(store.list_by_owner("u3").is_empty());
    }

    #[test]
    fn list_by_owner_is_a_snapshot() {
        let mut store = LinkStore::new();
        let link = store.create("u1", "http://example.com");
        let snapshot = store.list_by_owner("u1");

        store
            .update_target(&link.alias, "u1", "http://example.org")
            .unwrap();
        assert_eq!(snapshot[&link.alias].long_url, "http://example.com");
    }

    #[test]
    fn record_visit_counts_unique_visitors_once() {
        let mut store = LinkStore::new();
        let link = store.create("u1", "http://example.com");

        let first = store.record_visit(&link.alias, "v1").unwrap();
        assert_eq!(first.long_url, "http://example.com");
        assert!(first.first_visit);

        let again = store.record_visit(&link.alias, "v1").unwrap();
        assert!(!again.first_visit);

        store.record_visit(&link.alias, "v2").unwrap();

        let stored = store.get(&link.alias).unwrap();
        assert_eq!(stored.total_visits, 3);
        assert_eq!(stored.unique_visits, 2);
    }

    #[test]
    fn unique_never_exceeds_total() {
        let mut store = LinkStore::new();
        let link = store.create("u1", "http://example.com");

        for visitor in ["a", "b", "a", "c", "b", "a"] {
            store.record_visit(&link.alias, visitor).unwrap();
            let stored = store.get(&link.alias).unwrap();
            assert!(stored.unique_visits <= stored.total_visits);
        }

        let stored = store.get(&link.alias).unwrap();
        assert_eq!((stored.total_visits, stored.unique_visits), (6, 3));
        assert_eq!(store.visitors[&link.alias].len(), 3);
    }

    #[test]
    fn visitors_are_tracked_per_link() {
        let mut store = LinkStore::new();
        let first = store.create("u1", "http://a.example");
        let second = store.create("u1", "http://b.example");

        assert!(store.record_visit(&first.alias, "v1").unwrap().first_visit);
        assert!(store.record_visit(&second.alias, "v1").unwrap().first_visit);
        assert!(!store.record_visit(&first.alias, "v1").unwrap().first_visit);
    }

    #[test]
    fn record_visit_on_unknown_alias_touches_nothing() {
        let mut store = LinkStore::new();
        let link = store.create("u1", "http://example.com");

        assert!(matches!(
            store.record_visit("nope00", "v1"),
            Err(AppError::NotFound(_))
        ));
        let stored = store.get(&link.alias).unwrap();
        assert_eq!(stored.total_visits, 0);
        assert_eq!(stored.unique_visits, 0);
        assert!(store.visitors.is_empty());
    }
}
