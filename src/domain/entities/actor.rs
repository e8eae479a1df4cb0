use crate::domain::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Token role claims are matched case-insensitively; unknown roles are plain users.
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim {
            Some(role) if role.eq_ignore_ascii_case("ADMIN") => Role::Admin,
            _ => Role::User,
        }
    }
}

/// The authenticated caller, passed explicitly into operations that need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub subject: String,
    pub role: Role,
}

impl Actor {
    pub fn new(subject: impl Into<String>, role: Role) -> Self {
        Self {
            subject: subject.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self) -> DomainResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!(
                "{} is not an administrator",
                self.subject
            )))
        }
    }
}
