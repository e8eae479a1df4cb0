pub mod deletion_requests;
pub mod health;
pub mod notifications;
