use futures::Stream;
use std::pin::Pin;

use crate::domain::errors::DomainResult;

pub type DeletionRequestStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// Inbound channel carrying user ids (as raw text) whose owners asked for
/// account deletion.
pub trait DeletionRequestQueue: Send + Sync {
    /// Enqueue a payload. An `Ok` means the payload will reach the consumer;
    /// a full or closed queue is reported as an error instead.
    fn publish(&self, user_id: String) -> DomainResult<()>;

    /// Take the single consuming end. Payloads published before this call are
    /// kept. Fails if the stream was already taken.
    fn subscribe(&self) -> DomainResult<DeletionRequestStream>;
}
