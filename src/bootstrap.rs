use crate::application::listeners::run_deletion_request_listener;
use crate::application::services::{DeletionRequestService, NotificationService};
use crate::config::Config;
use crate::domain::errors::DomainResult;
use crate::domain::ports::deletion_request_queue::DeletionRequestQueue;
use crate::domain::ports::deletion_request_repository::DeletionRequestRepository;
use crate::domain::ports::notification_repository::NotificationRepository;
use crate::infrastructure::http::middleware::AppState;
use crate::infrastructure::messaging::LocalDeletionRequestQueue;
use crate::infrastructure::persistence::Database;
use std::sync::Arc;

/// Wire repositories, services and the deletion request listener.
///
/// Must be called from within a Tokio runtime: the listener task is spawned
/// here and runs until the queue is dropped.
pub fn build_app_state(db: Database, config: &Config) -> DomainResult<AppState> {
    let notification_repo: Arc<dyn NotificationRepository> = Arc::new(db.clone());
    let notification_service = NotificationService::new(notification_repo);

    let deletion_request_repo: Arc<dyn DeletionRequestRepository> = Arc::new(db);
    let deletion_request_service =
        DeletionRequestService::new(deletion_request_repo, config.transition_policy);
    tracing::info!(
        "Deletion request service initialized with {:?} transition policy",
        config.transition_policy
    );

    let queue = LocalDeletionRequestQueue::new(config.deletion_queue_capacity);
    let events = queue.subscribe()?;
    tokio::spawn(run_deletion_request_listener(
        events,
        deletion_request_service.clone(),
    ));
    tracing::info!(
        "Deletion request listener started (queue capacity {})",
        config.deletion_queue_capacity
    );

    Ok(AppState {
        jwt_secret: Arc::from(config.jwt_secret.as_str()),
        notification_service,
        deletion_request_service,
        deletion_request_queue: Arc::new(queue),
    })
}
