//! Admin allow-list: the set of user ids authorized to invoke gated commands.

use crate::error::{BotError, Result};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// Shared, instance-owned set of admin user ids.
///
/// Seeded with the owner at construction. Clones share the same underlying
/// set, so a clone held by the auth middleware sees later add/remove calls.
/// Not persisted; the list is lost on restart.
#[derive(Debug, Clone)]
pub struct AdminSet {
    inner: Arc<RwLock<HashSet<i64>>>,
}

impl AdminSet {
    /// Creates the set with the owner as its first admin.
    pub fn new(owner_id: i64) -> Self {
        let mut ids = HashSet::new();
        ids.insert(owner_id);
        Self {
            inner: Arc::new(RwLock::new(ids)),
        }
    }

    /// Grants admin rights to `id`. Adding an existing admin is a no-op.
    pub fn add(&self, id: i64) {
        info!(user_id = id, "Adding user to admin list");
        self.inner.write().insert(id);
    }

    /// Revokes admin rights from `id`. Fails when `id` is not an admin.
    pub fn remove(&self, id: i64) -> Result<()> {
        info!(user_id = id, "Removing user from admin list");
        if self.inner.write().remove(&id) {
            Ok(())
        } else {
            Err(BotError::UnknownAdmin(id))
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.inner.read().contains(&id)
    }

    /// Sorted snapshot of the current admin ids.
    pub fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.inner.read().iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_is_seeded() {
        let admins = AdminSet::new(42);
        assert!(admins.contains(42));
        assert_eq!(admins.ids(), vec![42]);
    }

    #[test]
    fn test_add_is_idempotent() {
        let admins = AdminSet::new(1);
        admins.add(2);
        admins.add(2);
        assert_eq!(admins.ids(), vec![1, 2]);
    }

    #[test]
    fn test_remove_unknown_fails() {
        let admins = AdminSet::new(1);
        assert!(matches!(admins.remove(9), Err(BotError::UnknownAdmin(9))));
    }

    #[test]
    fn test_owner_can_be_removed() {
        let admins = AdminSet::new(1);
        admins.remove(1).unwrap();
        assert!(!admins.contains(1));
    }

    #[test]
    fn test_clones_share_state() {
        let admins = AdminSet::new(1);
        let view = admins.clone();
        admins.add(5);
        assert!(view.contains(5));
        view.remove(5).unwrap();
        assert!(!admins.contains(5));
    }
}
