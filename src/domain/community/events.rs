//! Domain events emitted by community and membership operations.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CommunityId, DomainEvent, Timestamp, UserId};

use super::MemberRole;

/// Events emitted by the membership ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommunityEvent {
    /// A community was created with its owner as admin member.
    Created {
        community_id: CommunityId,
        name: String,
        created_by: UserId,
        occurred_at: Timestamp,
    },

    /// A user joined (or rejoined) a community.
    MemberJoined {
        community_id: CommunityId,
        user_id: UserId,
        role: MemberRole,
        occurred_at: Timestamp,
    },

    /// A user left a community.
    MemberLeft {
        community_id: CommunityId,
        user_id: UserId,
        occurred_at: Timestamp,
    },

    /// The member list was recomputed from the ledger.
    MembersReconciled {
        community_id: CommunityId,
        member_count: usize,
        repaired: bool,
        occurred_at: Timestamp,
    },
}

impl DomainEvent for CommunityEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CommunityEvent::Created { .. } => "community.created.v1",
            CommunityEvent::MemberJoined { .. } => "community.member_joined.v1",
            CommunityEvent::MemberLeft { .. } => "community.member_left.v1",
            CommunityEvent::MembersReconciled { .. } => "community.members_reconciled.v1",
        }
    }

    fn occurred_at(&self) -> Timestamp {
        match self {
            CommunityEvent::Created { occurred_at, .. }
            | CommunityEvent::MemberJoined { occurred_at, .. }
            | CommunityEvent::MemberLeft { occurred_at, .. }
            | CommunityEvent::MembersReconciled { occurred_at, .. } => *occurred_at,
        }
    }
}
