//! Pending-approval lists for admins and counsellors.

use kodu_api_models::{StudentProfile, User};

/// Records addressable by backend id.
pub trait HasId {
    /// Backend `_id`.
    fn id(&self) -> &str;
}

impl HasId for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for StudentProfile {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Records awaiting a decision, in the order the backend listed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingList<T> {
    entries: Vec<T>,
}

impl<T> Default for PendingList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: HasId> PendingList<T> {
    /// Wrap a fetched list.
    #[must_use]
    pub const fn new(entries: Vec<T>) -> Self {
        Self { entries }
    }

    /// Drop the entry decided on. Returns whether one was removed; other
    /// entries keep their order.
    pub fn approve_removed(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id() != id);
        self.entries.len() != before
    }

    /// Empty the list after a bulk approval.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries still pending.
    #[must_use]
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kodu_test_support::fixtures::{pending_user, student};

    #[test]
    fn removes_only_the_decided_entry() {
        let mut list = PendingList::new(vec![
            pending_user("u1", "Asha"),
            pending_user("u2", "Bilal"),
            pending_user("u3", "Chitra"),
        ]);
        assert!(list.approve_removed("u2"));
        let ids: Vec<&str> = list.entries().iter().map(HasId::id).collect();
        assert_eq!(ids, vec!["u1", "u3"]);
        assert!(!list.approve_removed("u2"));
        assert_eq!(list.entries().len(), 2);
    }

    #[test]
    fn clear_after_bulk_approval() {
        let mut list = PendingList::new(vec![student("s1", "Asha"), student("s2", "Bilal")]);
        list.clear();
        assert!(list.is_empty());
    }
}
