pub mod deletion_request_queue;
pub mod deletion_request_repository;
pub mod notification_repository;
