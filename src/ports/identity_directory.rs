//! Identity directory port.
//!
//! The external identity collaborator authenticates users and owns their
//! profiles. This core only joins profile references into listing/detail
//! views; it never stores or verifies identities itself.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, UserId};

/// Public profile of a user, resolved from the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Port for resolving user profiles.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Resolve a single profile. Returns `None` for unknown users.
    async fn find(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError>;

    /// Resolve many profiles, preserving input order and skipping unknowns.
    async fn find_many(&self, user_ids: &[UserId]) -> Result<Vec<UserProfile>, DomainError>;
}
