//! Community and membership error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | DuplicateName | 409 |
//! | AlreadyMember | 409 |
//! | NoMembership | 404 |
//! | InsufficientRole | 403 |
//! | Forbidden | 403 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{CommunityId, DomainError, ErrorCode, UserId};

use super::MemberRole;

/// Errors from community and membership operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommunityError {
    /// Referenced community does not exist.
    NotFound(CommunityId),

    /// A community with this name already exists.
    DuplicateName(String),

    /// The user already holds an active membership.
    AlreadyMember {
        user_id: UserId,
        community_id: CommunityId,
    },

    /// The user holds no active membership.
    NoMembership {
        user_id: UserId,
        community_id: CommunityId,
    },

    /// The caller's role is below the required minimum.
    InsufficientRole {
        required: MemberRole,
        actual: Option<MemberRole>,
    },

    /// The caller may not act on this resource.
    Forbidden(String),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl CommunityError {
    pub fn not_found(id: CommunityId) -> Self {
        CommunityError::NotFound(id)
    }

    pub fn duplicate_name(name: impl Into<String>) -> Self {
        CommunityError::DuplicateName(name.into())
    }

    pub fn already_member(user_id: UserId, community_id: CommunityId) -> Self {
        CommunityError::AlreadyMember {
            user_id,
            community_id,
        }
    }

    pub fn no_membership(user_id: UserId, community_id: CommunityId) -> Self {
        CommunityError::NoMembership {
            user_id,
            community_id,
        }
    }

    pub fn insufficient_role(required: MemberRole, actual: Option<MemberRole>) -> Self {
        CommunityError::InsufficientRole { required, actual }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        CommunityError::Forbidden(reason.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CommunityError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CommunityError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CommunityError::NotFound(_) => ErrorCode::CommunityNotFound,
            CommunityError::DuplicateName(_) => ErrorCode::DuplicateName,
            CommunityError::AlreadyMember { .. } => ErrorCode::AlreadyMember,
            CommunityError::NoMembership { .. } => ErrorCode::NoMembership,
            CommunityError::InsufficientRole { .. } => ErrorCode::InsufficientRole,
            CommunityError::Forbidden(_) => ErrorCode::Forbidden,
            CommunityError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CommunityError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            CommunityError::NotFound(id) => format!("Community not found: {}", id),
            CommunityError::DuplicateName(name) => {
                format!("A community named '{}' already exists", name)
            }
            CommunityError::AlreadyMember {
                user_id,
                community_id,
            } => format!(
                "User {} is already a member of community {}",
                user_id, community_id
            ),
            CommunityError::NoMembership {
                user_id,
                community_id,
            } => format!(
                "User {} has no active membership in community {}",
                user_id, community_id
            ),
            CommunityError::InsufficientRole { required, actual } => match actual {
                Some(actual) => format!(
                    "Requires role {} or above, but caller is {}",
                    required, actual
                ),
                None => format!(
                    "Requires role {} or above, but caller holds no membership",
                    required
                ),
            },
            CommunityError::Forbidden(reason) => format!("Forbidden: {}", reason),
            CommunityError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CommunityError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CommunityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CommunityError {}

impl From<DomainError> for CommunityError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::CommunityNotFound => CommunityError::Infrastructure(err.to_string()),
            ErrorCode::DuplicateName => CommunityError::DuplicateName(err.message),
            ErrorCode::AlreadyMember => CommunityError::Infrastructure(err.to_string()),
            ErrorCode::NoMembership => CommunityError::Infrastructure(err.to_string()),
            ErrorCode::Forbidden => CommunityError::Forbidden(err.message),
            ErrorCode::ValidationFailed => CommunityError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => CommunityError::Infrastructure(err.to_string()),
        }
    }
}

impl From<CommunityError> for DomainError {
    fn from(err: CommunityError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_community_id() -> CommunityId {
        CommunityId::new()
    }

    fn test_user_id() -> UserId {
        UserId::new("user-test-123").unwrap()
    }

    #[test]
    fn not_found_carries_correct_code() {
        let id = test_community_id();
        let err = CommunityError::not_found(id);
        assert_eq!(err.code(), ErrorCode::CommunityNotFound);
        assert!(err.message().contains(&id.to_string()));
    }

    #[test]
    fn duplicate_name_carries_name() {
        let err = CommunityError::duplicate_name("Hikers");
        assert_eq!(err.code(), ErrorCode::DuplicateName);
        assert!(err.message().contains("Hikers"));
    }

    #[test]
    fn already_member_carries_both_ids() {
        let user_id = test_user_id();
        let community_id = test_community_id();
        let err = CommunityError::already_member(user_id.clone(), community_id);

        assert_eq!(err.code(), ErrorCode::AlreadyMember);
        let msg = err.message();
        assert!(msg.contains(&user_id.to_string()));
        assert!(msg.contains(&community_id.to_string()));
    }

    #[test]
    fn no_membership_carries_correct_code() {
        let err = CommunityError::no_membership(test_user_id(), test_community_id());
        assert_eq!(err.code(), ErrorCode::NoMembership);
    }

    #[test]
    fn insufficient_role_message_names_requirement() {
        let err =
            CommunityError::insufficient_role(MemberRole::Admin, Some(MemberRole::Member));
        assert_eq!(err.code(), ErrorCode::InsufficientRole);
        assert!(err.message().contains("admin"));
        assert!(err.message().contains("member"));
    }

    #[test]
    fn insufficient_role_without_membership_says_so() {
        let err = CommunityError::insufficient_role(MemberRole::Moderator, None);
        assert!(err.message().contains("no membership"));
    }

    #[test]
    fn converts_to_domain_error() {
        let err = CommunityError::duplicate_name("Hikers");
        let domain_err: DomainError = err.clone().into();
        assert_eq!(domain_err.code, err.code());
    }

    #[test]
    fn display_matches_message() {
        let err = CommunityError::forbidden("not the creator");
        assert_eq!(format!("{}", err), err.message());
    }
}
