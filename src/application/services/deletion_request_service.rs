use crate::domain::entities::{
    AccountDeletionRequest, Actor, NewDeletionRequest, RequestStatus, TransitionPolicy,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::deletion_request_repository::DeletionRequestRepository;
use chrono::Utc;
use std::sync::Arc;

const REQUEST_NOT_FOUND: &str = "Request not found";

/// Owns the account deletion request lifecycle: `PENDING` on submission, then
/// a single admin decision to `APPROVED` or `REJECTED`.
///
/// Under [`TransitionPolicy::Lenient`] an already decided request can be
/// decided again (last write wins). [`TransitionPolicy::Strict`] refuses that
/// with [`DomainError::Conflict`] and relies on the repository's conditional
/// update so concurrent decisions cannot both succeed.
#[derive(Clone)]
pub struct DeletionRequestService {
    deletion_request_repo: Arc<dyn DeletionRequestRepository>,
    policy: TransitionPolicy,
}

impl DeletionRequestService {
    pub fn new(
        deletion_request_repo: Arc<dyn DeletionRequestRepository>,
        policy: TransitionPolicy,
    ) -> Self {
        Self {
            deletion_request_repo,
            policy,
        }
    }

    /// Record a deletion request for the user id carried by an inbound event.
    #[tracing::instrument(skip(self))]
    pub async fn submit(&self, user_id_text: &str) -> DomainResult<AccountDeletionRequest> {
        let user_id: i64 = user_id_text.trim().parse().map_err(|_| {
            DomainError::ValidationError(format!("Invalid user id: {:?}", user_id_text))
        })?;

        let request = NewDeletionRequest::pending(user_id, Utc::now());
        let created = self.deletion_request_repo.create(&request).await?;

        metrics::counter!("deletion_requests_submitted_total").increment(1);
        tracing::info!(
            "Deletion request {} submitted for user {}",
            created.id,
            created.user_id
        );

        Ok(created)
    }

    pub async fn list_pending(&self, actor: &Actor) -> DomainResult<Vec<AccountDeletionRequest>> {
        actor.require_admin()?;
        self.deletion_request_repo
            .find_by_status(RequestStatus::Pending)
            .await
    }

    pub async fn approve(&self, actor: &Actor, id: i64) -> DomainResult<AccountDeletionRequest> {
        self.decide(actor, id, RequestStatus::Approved).await
    }

    pub async fn reject(&self, actor: &Actor, id: i64) -> DomainResult<AccountDeletionRequest> {
        self.decide(actor, id, RequestStatus::Rejected).await
    }

    #[tracing::instrument(skip(self, actor), fields(actor = %actor.subject))]
    async fn decide(
        &self,
        actor: &Actor,
        id: i64,
        next: RequestStatus,
    ) -> DomainResult<AccountDeletionRequest> {
        actor.require_admin()?;

        let current = self
            .deletion_request_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(REQUEST_NOT_FOUND.to_string()))?;

        let expected = match self.policy {
            TransitionPolicy::Strict => {
                if !current.status.can_transition_to(next) {
                    return Err(already_decided(id, current.status));
                }
                Some(RequestStatus::Pending)
            }
            TransitionPolicy::Lenient => {
                if current.status.is_decided() {
                    tracing::warn!(
                        "Deletion request {} is already {}, overwriting with {}",
                        id,
                        current.status,
                        next
                    );
                }
                None
            }
        };

        let updated = self
            .deletion_request_repo
            .transition_status(id, expected, next, Utc::now())
            .await?;

        match updated {
            Some(updated) => {
                metrics::counter!("deletion_requests_decided_total", "status" => next.as_str())
                    .increment(1);
                tracing::info!(
                    "Deletion request {} for user {} is now {}",
                    updated.id,
                    updated.user_id,
                    updated.status
                );
                Ok(updated)
            }
            // The row changed between the read and the conditional update
            None => match self.deletion_request_repo.find_by_id(id).await? {
                Some(latest) => Err(already_decided(id, latest.status)),
                None => Err(DomainError::NotFound(REQUEST_NOT_FOUND.to_string())),
            },
        }
    }
}

fn already_decided(id: i64, status: RequestStatus) -> DomainError {
    DomainError::Conflict(format!("Request {} is already {}", id, status))
}
