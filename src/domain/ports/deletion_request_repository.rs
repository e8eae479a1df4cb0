use chrono::{DateTime, Utc};

use crate::domain::entities::{AccountDeletionRequest, NewDeletionRequest, RequestStatus};
use crate::domain::errors::DomainResult;

#[async_trait::async_trait]
pub trait DeletionRequestRepository: Send + Sync {
    async fn create(&self, request: &NewDeletionRequest) -> DomainResult<AccountDeletionRequest>;

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<AccountDeletionRequest>>;

    /// Ordered by request time, oldest first
    async fn find_by_status(&self, status: RequestStatus)
        -> DomainResult<Vec<AccountDeletionRequest>>;

    /// Atomically set `status` and `decided_at`.
    ///
    /// With `expected = Some(s)` the row is only updated while its status is
    /// still `s`. Returns `None` when no row matched (missing id or lost race).
    async fn transition_status(
        &self,
        id: i64,
        expected: Option<RequestStatus>,
        next: RequestStatus,
        decided_at: DateTime<Utc>,
    ) -> DomainResult<Option<AccountDeletionRequest>>;
}
