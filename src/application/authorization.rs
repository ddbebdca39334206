//! Authorization gate.
//!
//! Stateless decision functions over the membership ledger and the payment
//! "paid" facts. The gate holds no state of its own and re-reads the ledger
//! on every call, so decisions never act on stale role or membership data.

use std::sync::Arc;

use crate::domain::community::{CommunityError, MemberRole};
use crate::domain::event::Event;
use crate::domain::foundation::{CommunityId, DomainError, OwnedByUser, UserId};
use crate::domain::payment::PaymentError;
use crate::ports::{MembershipStore, PaymentStore};

/// Authorization decisions for community, event, post, and payment access.
#[derive(Clone)]
pub struct AuthorizationGate {
    memberships: Arc<dyn MembershipStore>,
    payments: Arc<dyn PaymentStore>,
}

impl AuthorizationGate {
    pub fn new(memberships: Arc<dyn MembershipStore>, payments: Arc<dyn PaymentStore>) -> Self {
        Self {
            memberships,
            payments,
        }
    }

    /// The caller's role in a community, if an active membership exists.
    pub async fn role_of(
        &self,
        user_id: &UserId,
        community_id: &CommunityId,
    ) -> Result<Option<MemberRole>, CommunityError> {
        let membership = self
            .memberships
            .find(user_id, community_id)
            .await
            .map_err(|e| CommunityError::infrastructure(e.to_string()))?;

        Ok(membership.filter(|m| m.is_active()).map(|m| m.role))
    }

    /// Requires the caller to hold at least `minimum` in the community.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientRole` when the caller's role is below the
    /// minimum, or when no active membership exists at all.
    pub async fn require_role(
        &self,
        user_id: &UserId,
        community_id: &CommunityId,
        minimum: MemberRole,
    ) -> Result<MemberRole, CommunityError> {
        match self.role_of(user_id, community_id).await? {
            Some(role) if role.meets(minimum) => Ok(role),
            actual => Err(CommunityError::insufficient_role(minimum, actual)),
        }
    }

    /// Requires the caller to be the creator of a user-owned resource.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` for any caller but the owner.
    pub fn check_modify<R: OwnedByUser>(
        &self,
        resource: &R,
        user_id: &UserId,
    ) -> Result<(), DomainError> {
        resource.check_ownership(user_id)
    }

    /// Whether the user may attend an event.
    ///
    /// Free events are open to everyone; priced events require a completed
    /// payment recorded for (user, event).
    pub async fn can_attend(
        &self,
        user_id: &UserId,
        event: &Event,
    ) -> Result<bool, PaymentError> {
        if event.is_free() {
            return Ok(true);
        }
        self.payments
            .has_completed_for_event(user_id, &event.id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::community::Membership;
    use crate::domain::event::Event;
    use crate::domain::foundation::{EventId, MembershipId, PaymentId, Timestamp};
    use crate::domain::payment::{Payment, PaymentOutcome, PaymentProvider};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockMembershipStore {
        memberships: Mutex<Vec<Membership>>,
    }

    impl MockMembershipStore {
        fn with(memberships: Vec<Membership>) -> Self {
            Self {
                memberships: Mutex::new(memberships),
            }
        }
    }

    #[async_trait]
    impl MembershipStore for MockMembershipStore {
        async fn insert(&self, membership: &Membership) -> Result<(), DomainError> {
            self.memberships.lock().unwrap().push(membership.clone());
            Ok(())
        }

        async fn update(&self, _membership: &Membership) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find(
            &self,
            user_id: &UserId,
            community_id: &CommunityId,
        ) -> Result<Option<Membership>, DomainError> {
            Ok(self
                .memberships
                .lock()
                .unwrap()
                .iter()
                .find(|m| &m.user_id == user_id && &m.community_id == community_id)
                .cloned())
        }

        async fn active_for_community(
            &self,
            community_id: &CommunityId,
        ) -> Result<Vec<Membership>, DomainError> {
            Ok(self
                .memberships
                .lock()
                .unwrap()
                .iter()
                .filter(|m| &m.community_id == community_id && m.is_active())
                .cloned()
                .collect())
        }

        async fn delete(&self, _id: &MembershipId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    struct MockPaymentStore {
        completed: Mutex<Vec<(UserId, EventId)>>,
    }

    impl MockPaymentStore {
        fn empty() -> Self {
            Self {
                completed: Mutex::new(Vec::new()),
            }
        }

        fn with_completed(user_id: UserId, event_id: EventId) -> Self {
            Self {
                completed: Mutex::new(vec![(user_id, event_id)]),
            }
        }
    }

    #[async_trait]
    impl PaymentStore for MockPaymentStore {
        async fn insert(&self, _payment: &Payment) -> Result<(), PaymentError> {
            Ok(())
        }

        async fn find_by_id(&self, _id: &PaymentId) -> Result<Option<Payment>, PaymentError> {
            Ok(None)
        }

        async fn find_by_transaction(
            &self,
            _provider: PaymentProvider,
            _transaction_id: &str,
        ) -> Result<Option<Payment>, PaymentError> {
            Ok(None)
        }

        async fn finalize(
            &self,
            id: &PaymentId,
            _outcome: PaymentOutcome,
        ) -> Result<Payment, PaymentError> {
            Err(PaymentError::not_found(*id))
        }

        async fn has_completed_for_event(
            &self,
            user_id: &UserId,
            event_id: &EventId,
        ) -> Result<bool, PaymentError> {
            Ok(self
                .completed
                .lock()
                .unwrap()
                .iter()
                .any(|(u, e)| u == user_id && e == event_id))
        }
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn gate_with(
        memberships: Vec<Membership>,
        payments: MockPaymentStore,
    ) -> AuthorizationGate {
        AuthorizationGate::new(
            Arc::new(MockMembershipStore::with(memberships)),
            Arc::new(payments),
        )
    }

    fn test_event(price: i64, created_by: &UserId) -> Event {
        Event::new(
            EventId::new(),
            "Summit hike",
            None,
            Timestamp::now().add_days(7),
            "Trailhead",
            price,
            created_by.clone(),
            CommunityId::new(),
        )
        .unwrap()
    }

    // role_of tests

    #[tokio::test]
    async fn role_of_returns_active_role() {
        let community_id = CommunityId::new();
        let membership = Membership::admin(MembershipId::new(), user("u1"), community_id);
        let gate = gate_with(vec![membership], MockPaymentStore::empty());

        let role = gate.role_of(&user("u1"), &community_id).await.unwrap();
        assert_eq!(role, Some(MemberRole::Admin));
    }

    #[tokio::test]
    async fn role_of_ignores_inactive_memberships() {
        let community_id = CommunityId::new();
        let mut membership = Membership::member(MembershipId::new(), user("u2"), community_id);
        membership.deactivate().unwrap();
        let gate = gate_with(vec![membership], MockPaymentStore::empty());

        let role = gate.role_of(&user("u2"), &community_id).await.unwrap();
        assert_eq!(role, None);
    }

    // require_role tests

    #[tokio::test]
    async fn require_role_passes_for_sufficient_role() {
        let community_id = CommunityId::new();
        let membership = Membership::admin(MembershipId::new(), user("u1"), community_id);
        let gate = gate_with(vec![membership], MockPaymentStore::empty());

        let role = gate
            .require_role(&user("u1"), &community_id, MemberRole::Moderator)
            .await
            .unwrap();
        assert_eq!(role, MemberRole::Admin);
    }

    #[tokio::test]
    async fn require_role_denies_lower_role() {
        let community_id = CommunityId::new();
        let membership = Membership::member(MembershipId::new(), user("u2"), community_id);
        let gate = gate_with(vec![membership], MockPaymentStore::empty());

        let err = gate
            .require_role(&user("u2"), &community_id, MemberRole::Admin)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CommunityError::InsufficientRole {
                required: MemberRole::Admin,
                actual: Some(MemberRole::Member),
            }
        ));
    }

    #[tokio::test]
    async fn require_role_denies_non_members() {
        let community_id = CommunityId::new();
        let gate = gate_with(vec![], MockPaymentStore::empty());

        let err = gate
            .require_role(&user("u2"), &community_id, MemberRole::Member)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CommunityError::InsufficientRole { actual: None, .. }
        ));
    }

    // check_modify tests

    #[tokio::test]
    async fn check_modify_allows_creator_only() {
        let gate = gate_with(vec![], MockPaymentStore::empty());
        let event = test_event(0, &user("u1"));

        assert!(gate.check_modify(&event, &user("u1")).is_ok());
        assert!(gate.check_modify(&event, &user("u2")).is_err());
    }

    // can_attend tests

    #[tokio::test]
    async fn free_events_are_open_to_everyone() {
        let gate = gate_with(vec![], MockPaymentStore::empty());
        let event = test_event(0, &user("u1"));

        assert!(gate.can_attend(&user("u2"), &event).await.unwrap());
    }

    #[tokio::test]
    async fn priced_events_require_completed_payment() {
        let event = test_event(500, &user("u1"));

        let gate = gate_with(vec![], MockPaymentStore::empty());
        assert!(!gate.can_attend(&user("u2"), &event).await.unwrap());

        let gate = gate_with(
            vec![],
            MockPaymentStore::with_completed(user("u2"), event.id),
        );
        assert!(gate.can_attend(&user("u2"), &event).await.unwrap());
    }
}
