use std::sync::Mutex;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_stream::wrappers::ReceiverStream;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::deletion_request_queue::{DeletionRequestQueue, DeletionRequestStream};

/// In-process deletion request channel backed by a bounded tokio mpsc channel.
///
/// There is exactly one consumer. Publishing never blocks: once `capacity`
/// payloads are waiting, further payloads are refused with
/// [`DomainError::Unavailable`] rather than accepted and dropped.
pub struct LocalDeletionRequestQueue {
    sender: mpsc::Sender<String>,
    receiver: Mutex<Option<mpsc::Receiver<String>>>,
}

impl LocalDeletionRequestQueue {
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity);
        Self {
            sender,
            receiver: Mutex::new(Some(receiver)),
        }
    }

    /// Payloads accepted but not yet consumed.
    pub fn pending(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }
}

impl Default for LocalDeletionRequestQueue {
    fn default() -> Self {
        Self::new(100)
    }
}

impl DeletionRequestQueue for LocalDeletionRequestQueue {
    fn publish(&self, user_id: String) -> DomainResult<()> {
        self.sender.try_send(user_id).map_err(|e| match e {
            TrySendError::Full(payload) => {
                tracing::warn!("Deletion request queue is full, refusing {:?}", payload);
                DomainError::Unavailable("Deletion request queue is full".to_string())
            }
            TrySendError::Closed(payload) => {
                tracing::error!("No listener for deletion request {:?}", payload);
                DomainError::Internal("Deletion request listener is not running".to_string())
            }
        })
    }

    fn subscribe(&self) -> DomainResult<DeletionRequestStream> {
        let receiver = self
            .receiver
            .lock()
            .map_err(|_| DomainError::Internal("Deletion request queue lock poisoned".to_string()))?
            .take()
            .ok_or_else(|| {
                DomainError::Internal("Deletion request queue already has a listener".to_string())
            })?;

        Ok(Box::pin(ReceiverStream::new(receiver)))
    }
}
