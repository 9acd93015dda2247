use crate::catalog::MAX_COMPARED_COMPANIES;
use crate::search::SearchableEntity;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SingleSelection {
    entity: Option<SearchableEntity>,
}

impl SingleSelection {
    pub fn get(&self) -> Option<&SearchableEntity> {
        self.entity.as_ref()
    }

    pub fn set(&mut self, entity: SearchableEntity) {
        self.entity = Some(entity);
    }

    pub fn clear(&mut self) {
        self.entity = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Duplicate,
    Full,
}

/// Ordered list of entities, unique by slug and bounded by `max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSelection {
    entities: Vec<SearchableEntity>,
    max: usize,
}

impl Default for MultiSelection {
    fn default() -> Self {
        Self::with_max(MAX_COMPARED_COMPANIES)
    }
}

impl MultiSelection {
    pub fn with_max(max: usize) -> Self {
        Self {
            entities: Vec::with_capacity(max),
            max,
        }
    }

    pub fn entities(&self) -> &[SearchableEntity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.entities.iter().any(|entity| entity.slug == slug)
    }

    pub fn add(&mut self, entity: SearchableEntity) -> AddOutcome {
        if self.contains(&entity.slug) {
            return AddOutcome::Duplicate;
        }
        if self.entities.len() >= self.max {
            return AddOutcome::Full;
        }
        self.entities.push(entity);
        AddOutcome::Added
    }

    pub fn remove(&mut self, slug: &str) -> bool {
        let before = self.entities.len();
        self.entities.retain(|entity| entity.slug != slug);
        self.entities.len() != before
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn slugs(&self) -> Vec<String> {
        self.entities.iter().map(|entity| entity.slug.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(slug: &str) -> SearchableEntity {
        SearchableEntity {
            slug: slug.to_string(),
            name: slug.to_string(),
            sector: String::new(),
            tier: String::new(),
        }
    }

    #[test]
    fn duplicates_are_rejected_without_changing_order() {
        let mut selection = MultiSelection::default();
        assert_eq!(selection.add(entity("a")), AddOutcome::Added);
        assert_eq!(selection.add(entity("b")), AddOutcome::Added);
        assert_eq!(selection.add(entity("a")), AddOutcome::Duplicate);
        assert_eq!(selection.slugs(), vec!["a", "b"]);
    }

    #[test]
    fn never_grows_past_max() {
        let mut selection = MultiSelection::default();
        for slug in ["a", "b", "c", "d", "e"] {
            assert_eq!(selection.add(entity(slug)), AddOutcome::Added);
        }
        assert_eq!(selection.add(entity("f")), AddOutcome::Full);
        assert_eq!(selection.len(), MAX_COMPARED_COMPANIES);
        // Duplicate check wins over the capacity check.
        assert_eq!(selection.add(entity("c")), AddOutcome::Duplicate);
    }

    #[test]
    fn remove_frees_a_slot() {
        let mut selection = MultiSelection::with_max(2);
        selection.add(entity("a"));
        selection.add(entity("b"));
        assert!(selection.remove("a"));
        assert!(!selection.remove("a"));
        assert_eq!(selection.add(entity("c")), AddOutcome::Added);
        assert_eq!(selection.slugs(), vec!["b", "c"]);
    }

    #[test]
    fn single_selection_replaces() {
        let mut selection = SingleSelection::default();
        selection.set(entity("a"));
        selection.set(entity("b"));
        assert_eq!(selection.get().map(|e| e.slug.as_str()), Some("b"));
        selection.clear();
        assert!(selection.get().is_none());
    }
}
