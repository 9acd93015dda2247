use serde::{Deserialize, Serialize};

/// Minimum number of characters (after trimming) before a lookup is issued.
pub const MIN_QUERY_CHARS: usize = 2;

pub type QueryId = u64;

/// A company (or other entity) selectable as report input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchableEntity {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub tier: String,
}

/// Independent search inputs on the configuration screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchSlot {
    /// Typeahead feeding a single-company selection.
    Single,
    /// Typeahead feeding the multi-company comparison list.
    Multi,
}

/// What the host should do after the query text changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    /// Debounce then look up `query`; tag the response with `query_id`.
    Schedule { query_id: QueryId, query: String },
    /// Query too short: results were cleared, drop anything pending.
    Clear,
}

/// Bookkeeping for one typeahead: the visible query, its results and the id
/// of the most recently issued lookup. Responses carrying any other id are
/// stale and get discarded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchBox {
    query: String,
    latest: QueryId,
    results: Vec<SearchableEntity>,
    pending: bool,
}

impl SearchBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchableEntity] {
        &self.results
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn latest_query_id(&self) -> QueryId {
        self.latest
    }

    pub fn input(&mut self, query: impl Into<String>) -> SearchRequest {
        self.query = query.into();
        // Any earlier lookup is superseded, even when this one is not issued.
        self.latest += 1;
        let trimmed = self.query.trim();
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            self.results.clear();
            self.pending = false;
            return SearchRequest::Clear;
        }
        // Results of the previous query are hidden while this one is pending.
        self.results.clear();
        self.pending = true;
        SearchRequest::Schedule {
            query_id: self.latest,
            query: trimmed.to_string(),
        }
    }

    /// Applies results if they answer the most recent lookup. Returns whether
    /// the visible list changed.
    pub fn apply(&mut self, query_id: QueryId, entities: Vec<SearchableEntity>) -> bool {
        if query_id != self.latest || !self.pending {
            return false;
        }
        self.results = entities;
        self.pending = false;
        true
    }

    /// Clears the query and results after a pick, invalidating in-flight lookups.
    pub fn reset(&mut self) {
        self.query.clear();
        self.results.clear();
        self.pending = false;
        self.latest += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(slug: &str) -> SearchableEntity {
        SearchableEntity {
            slug: slug.to_string(),
            name: slug.to_uppercase(),
            sector: "launch-services".to_string(),
            tier: "tier-1".to_string(),
        }
    }

    #[test]
    fn short_query_clears_without_lookup() {
        let mut search = SearchBox::new();
        assert!(matches!(search.input("spa"), SearchRequest::Schedule { .. }));
        assert!(search.apply(1, vec![entity("spacex")]));

        assert_eq!(search.input(" s "), SearchRequest::Clear);
        assert!(search.results().is_empty());
        assert!(!search.is_pending());
    }

    #[test]
    fn new_lookup_drops_previous_results() {
        let mut search = SearchBox::new();
        search.input("spa");
        assert!(search.apply(1, vec![entity("spacex")]));

        assert!(matches!(search.input("spir"), SearchRequest::Schedule { .. }));
        assert!(search.results().is_empty());
        assert!(search.is_pending());
    }

    #[test]
    fn only_latest_response_is_applied() {
        let mut search = SearchBox::new();
        let first = search.input("ro");
        let second = search.input("rock");
        let (SearchRequest::Schedule { query_id: old, .. }, SearchRequest::Schedule { query_id: new, query }) =
            (first, second)
        else {
            panic!("both queries should be scheduled");
        };
        assert_eq!(query, "rock");

        assert!(!search.apply(old, vec![entity("rocket-lab")]));
        assert!(search.results().is_empty());
        assert!(search.apply(new, vec![entity("relativity")]));
        assert_eq!(search.results()[0].slug, "relativity");

        // A duplicate delivery of the same response is ignored once applied.
        assert!(!search.apply(new, vec![entity("other")]));
        assert_eq!(search.results()[0].slug, "relativity");
    }

    #[test]
    fn response_after_clear_is_stale() {
        let mut search = SearchBox::new();
        let SearchRequest::Schedule { query_id, .. } = search.input("ast") else {
            panic!("scheduled");
        };
        search.input("");
        assert!(!search.apply(query_id, vec![entity("astra")]));
        assert!(search.results().is_empty());
    }

    #[test]
    fn scheduled_query_is_trimmed() {
        let mut search = SearchBox::new();
        assert_eq!(
            search.input("  planet  "),
            SearchRequest::Schedule {
                query_id: 1,
                query: "planet".to_string()
            }
        );
        assert_eq!(search.query(), "  planet  ");
    }
}
