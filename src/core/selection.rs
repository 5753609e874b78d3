use crate::domain::catalog::Catalog;
use crate::domain::model::{Profile, ProfileId};

/// The single profile shown in the detail overlay, if any.
///
/// Holds an id rather than the profile itself; the catalog stays the owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<ProfileId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previous selection. Returns the one it replaced.
    pub fn select(&mut self, id: ProfileId) -> Option<ProfileId> {
        self.current.replace(id)
    }

    pub fn clear(&mut self) -> Option<ProfileId> {
        self.current.take()
    }

    pub fn selected(&self) -> Option<ProfileId> {
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Option<&'a Profile> {
        self.current.and_then(|id| catalog.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_selection_replaces_previous() {
        let mut selection = Selection::new();
        assert_eq!(selection.select(1), None);
        assert_eq!(selection.select(2), Some(1));
        assert_eq!(selection.selected(), Some(2));
    }

    #[test]
    fn test_clear() {
        let mut selection = Selection::new();
        selection.select(4);
        assert_eq!(selection.clear(), Some(4));
        assert!(selection.is_empty());
        assert_eq!(selection.clear(), None);
    }

    #[test]
    fn test_resolve_against_catalog() {
        let catalog = Catalog::sample();
        let mut selection = Selection::new();
        assert!(selection.resolve(&catalog).is_none());
        selection.select(6);
        assert_eq!(selection.resolve(&catalog).unwrap().name, "Emma Davis");
    }
}
