pub mod deletion_requests;

pub use deletion_requests::run_deletion_request_listener;
