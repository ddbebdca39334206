//! Community store port.
//!
//! Persistence contract for the Community aggregate. The member list held
//! here is derived data; the membership store is authoritative.

use async_trait::async_trait;

use crate::domain::community::Community;
use crate::domain::foundation::{CommunityId, DomainError};

/// Store port for Community aggregates.
///
/// Implementations must enforce global name uniqueness at insert time.
#[async_trait]
pub trait CommunityStore: Send + Sync {
    /// Insert a new community.
    ///
    /// # Errors
    ///
    /// - `DuplicateName` if a community with the same name exists
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, community: &Community) -> Result<(), DomainError>;

    /// Update an existing community.
    ///
    /// # Errors
    ///
    /// - `CommunityNotFound` if the community doesn't exist
    async fn update(&self, community: &Community) -> Result<(), DomainError>;

    /// Find a community by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &CommunityId) -> Result<Option<Community>, DomainError>;

    /// Find a community by its unique name. Returns `None` if not found.
    async fn find_by_name(&self, name: &str) -> Result<Option<Community>, DomainError>;

    /// List all communities in creation order.
    async fn list(&self) -> Result<Vec<Community>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn community_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn CommunityStore) {}
    }
}
