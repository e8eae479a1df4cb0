#![allow(dead_code, unused_imports)]
pub mod auth_helpers;
pub mod test_db;

pub use auth_helpers::*;
pub use test_db::*;
