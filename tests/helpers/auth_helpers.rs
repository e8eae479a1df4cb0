use notification_service::domain::entities::{Actor, Role};
use notification_service::infrastructure::http::middleware::issue_token;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

pub fn admin() -> Actor {
    Actor::new("admin-1", Role::Admin)
}

pub fn regular_user() -> Actor {
    Actor::new("user-1", Role::User)
}

pub fn admin_token() -> String {
    issue_token(TEST_JWT_SECRET, "admin-1", Some("ADMIN"), 3600).expect("Failed to sign token")
}

pub fn user_token() -> String {
    issue_token(TEST_JWT_SECRET, "user-1", None, 3600).expect("Failed to sign token")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
