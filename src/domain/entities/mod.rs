pub mod actor;
pub mod deletion_request;
pub mod notification;

pub use actor::*;
pub use deletion_request::*;
pub use notification::*;
