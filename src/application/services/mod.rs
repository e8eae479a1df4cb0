pub mod deletion_request_service;
pub mod notification_service;

pub use deletion_request_service::DeletionRequestService;
pub use notification_service::NotificationService;
