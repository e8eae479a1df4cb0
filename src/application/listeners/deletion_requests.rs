use crate::application::services::DeletionRequestService;
use crate::domain::errors::DomainError;
use futures::Stream;
use tokio_stream::StreamExt;

/// Drain user-deletion events and record a pending request for each.
///
/// Malformed payloads are logged and skipped. Returns once the stream ends.
pub async fn run_deletion_request_listener<S>(events: S, service: DeletionRequestService)
where
    S: Stream<Item = String> + Send + Unpin,
{
    tracing::info!("Deletion request listener started");

    let mut events = events;
    while let Some(payload) = events.next().await {
        tracing::debug!("Deletion request listener received payload: {:?}", payload);

        match service.submit(&payload).await {
            Ok(request) => {
                tracing::debug!(
                    "Recorded deletion request {} for user {}",
                    request.id,
                    request.user_id
                );
            }
            Err(DomainError::ValidationError(e)) => {
                tracing::warn!("Skipping deletion request event: {}", e);
            }
            Err(e) => {
                tracing::error!("Failed to record deletion request: {}", e);
            }
        }
    }

    tracing::info!("Deletion request listener stopped");
}
