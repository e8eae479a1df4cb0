use chrono::{DateTime, SubsecRound, Utc};
use sqlx::{any::AnyRow, Row};

use super::{format_timestamp, parse_timestamp, Database};
use crate::domain::entities::{AccountDeletionRequest, NewDeletionRequest, RequestStatus};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::deletion_request_repository::DeletionRequestRepository;

fn deletion_request_from_row(row: &AnyRow) -> DomainResult<AccountDeletionRequest> {
    let status: String = row.try_get("status")?;
    let requested_at: String = row.try_get("requested_at")?;
    let decided_at: Option<String> = row.try_get("decided_at")?;

    Ok(AccountDeletionRequest {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        user_email: row.try_get("user_email")?,
        requested_at: parse_timestamp(&requested_at)?,
        status: status.parse::<RequestStatus>().map_err(DomainError::Internal)?,
        decided_at: decided_at.as_deref().map(parse_timestamp).transpose()?,
    })
}

#[async_trait::async_trait]
impl DeletionRequestRepository for Database {
    async fn create(&self, request: &NewDeletionRequest) -> DomainResult<AccountDeletionRequest> {
        // Stored with microsecond precision
        let requested_at = request.requested_at.trunc_subsecs(6);

        let row = sqlx::query(
            "INSERT INTO account_deletion_requests (user_id, user_email, requested_at, status)
             VALUES (?, ?, ?, ?)
             RETURNING id",
        )
        .bind(request.user_id)
        .bind(request.user_email.clone())
        .bind(format_timestamp(&requested_at))
        .bind(request.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(AccountDeletionRequest {
            id: row.try_get("id")?,
            user_id: request.user_id,
            user_email: request.user_email.clone(),
            requested_at,
            status: request.status,
            decided_at: None,
        })
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<AccountDeletionRequest>> {
        let row = sqlx::query(
            "SELECT id, user_id, user_email, requested_at, status, decided_at
             FROM account_deletion_requests
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(deletion_request_from_row).transpose()
    }

    async fn find_by_status(
        &self,
        status: RequestStatus,
    ) -> DomainResult<Vec<AccountDeletionRequest>> {
        let rows = sqlx::query(
            "SELECT id, user_id, user_email, requested_at, status, decided_at
             FROM account_deletion_requests
             WHERE status = ?
             ORDER BY requested_at ASC, id ASC",
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(deletion_request_from_row).collect()
    }

    async fn transition_status(
        &self,
        id: i64,
        expected: Option<RequestStatus>,
        next: RequestStatus,
        decided_at: DateTime<Utc>,
    ) -> DomainResult<Option<AccountDeletionRequest>> {
        // A single UPDATE so the status check and the write cannot interleave
        // with another decision on the same row.
        let result = match expected {
            Some(expected) => {
                sqlx::query(
                    "UPDATE account_deletion_requests
                     SET status = ?, decided_at = ?
                     WHERE id = ? AND status = ?",
                )
                .bind(next.as_str())
                .bind(format_timestamp(&decided_at))
                .bind(id)
                .bind(expected.as_str())
                .execute(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    "UPDATE account_deletion_requests
                     SET status = ?, decided_at = ?
                     WHERE id = ?",
                )
                .bind(next.as_str())
                .bind(format_timestamp(&decided_at))
                .bind(id)
                .execute(&self.pool)
                .await?
            }
        };

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }
}
