//! Ownership trait for user-owned resources.
//!
//! Events and posts may only be mutated by their creator. Aggregates
//! implement this trait to get consistent ownership checks with proper
//! domain errors.

use super::{DomainError, ErrorCode, UserId};

/// Trait for aggregates that have a single owning user.
///
/// Implementors return the `UserId` of the creator; the trait provides
/// default implementations for ownership checking.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Validates ownership, returning an error if the user is not the owner.
    ///
    /// This is the preferred method to use in command handlers as it
    /// returns a properly formed `DomainError` with `Forbidden` code.
    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User does not own this resource",
            )
            .with_detail("owner_id", self.owner_id().to_string())
            .with_detail("requested_by", user_id.to_string()))
        }
    }
}
