//! Community aggregate entity.
//!
//! A Community carries a denormalized, duplicate-free member-id list for
//! fast "is member" checks. The list is derived data: the membership ledger
//! is authoritative, and `set_members` is how the list is brought back in
//! line with the ledger after every membership mutation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CommunityId, DomainError, ErrorCode, OwnedByUser, Timestamp, UserId, ValidationError,
};

/// Community aggregate.
///
/// # Invariants
///
/// - `name` is globally unique (enforced by the store).
/// - `created_by` is immutable.
/// - `members` contains no duplicates and, post-reconcile, equals the set of
///   users holding an active membership for this community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    /// Unique identifier for this community.
    pub id: CommunityId,

    /// Globally unique display name.
    pub name: String,

    /// Optional free-form description.
    pub description: Option<String>,

    /// The user who created the community; always an admin member.
    pub created_by: UserId,

    /// Denormalized member-id list in join order.
    pub members: Vec<UserId>,

    /// When the community was created.
    pub created_at: Timestamp,

    /// When the community was last updated.
    pub updated_at: Timestamp,
}

impl Community {
    /// Creates a new community with the creator as its only member.
    ///
    /// # Errors
    ///
    /// Returns error if the name is empty.
    pub fn new(
        id: CommunityId,
        name: impl Into<String>,
        description: Option<String>,
        created_by: UserId,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            name,
            description,
            members: vec![created_by.clone()],
            created_by,
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns true if the user appears in the member list.
    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.members.contains(user_id)
    }

    /// Appends a user to the member list.
    ///
    /// # Errors
    ///
    /// Returns error if the user is already present.
    pub fn add_member(&mut self, user_id: UserId) -> Result<(), DomainError> {
        if self.is_member(&user_id) {
            return Err(DomainError::new(
                ErrorCode::AlreadyMember,
                format!("User {} is already a member", user_id),
            ));
        }
        self.members.push(user_id);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Removes a user from the member list. Returns true if present.
    pub fn remove_member(&mut self, user_id: &UserId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m != user_id);
        let removed = self.members.len() != before;
        if removed {
            self.updated_at = Timestamp::now();
        }
        removed
    }

    /// Replaces the member list with one recomputed from the ledger.
    ///
    /// Duplicates are dropped while preserving order. Returns true if the
    /// list actually changed (i.e. it had diverged from the ledger).
    pub fn set_members(&mut self, members: Vec<UserId>) -> bool {
        let mut deduped: Vec<UserId> = Vec::with_capacity(members.len());
        for member in members {
            if !deduped.contains(&member) {
                deduped.push(member);
            }
        }

        if deduped == self.members {
            return false;
        }
        self.members = deduped;
        self.updated_at = Timestamp::now();
        true
    }
}

impl OwnedByUser for Community {
    fn owner_id(&self) -> &UserId {
        &self.created_by
    }
}
