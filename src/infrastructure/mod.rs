pub mod http;
pub mod messaging;
pub mod observability;
pub mod persistence;
