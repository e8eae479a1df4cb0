use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of an account deletion request.
///
/// A request starts `Pending` and is decided once, to either `Approved` or
/// `Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Approved => "APPROVED",
            RequestStatus::Rejected => "REJECTED",
        }
    }

    /// Whether a decision has already been recorded.
    pub fn is_decided(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }

    /// Only `Pending -> Approved` and `Pending -> Rejected` are allowed.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Approved)
                | (RequestStatus::Pending, RequestStatus::Rejected)
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(RequestStatus::Pending),
            "APPROVED" => Ok(RequestStatus::Approved),
            "REJECTED" => Ok(RequestStatus::Rejected),
            other => Err(format!("Unknown deletion request status: {}", other)),
        }
    }
}

/// A user's request to have their account deleted, awaiting an admin decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDeletionRequest {
    pub id: i64,
    pub user_id: i64,
    pub user_email: Option<String>,
    #[serde(rename = "requestTime")]
    pub requested_at: DateTime<Utc>,
    pub status: RequestStatus,
    #[serde(rename = "decisionTime")]
    pub decided_at: Option<DateTime<Utc>>,
}

/// Input for persisting a freshly received deletion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeletionRequest {
    pub user_id: i64,
    pub user_email: Option<String>,
    pub requested_at: DateTime<Utc>,
    pub status: RequestStatus,
}

impl NewDeletionRequest {
    pub fn pending(user_id: i64, requested_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            user_email: None,
            requested_at,
            status: RequestStatus::Pending,
        }
    }
}

/// How approve/reject treat requests that were already decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Overwrite whatever status is stored; last write wins.
    #[default]
    Lenient,
    /// Only a `Pending` request may be decided; anything else is a conflict.
    Strict,
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(TransitionPolicy::Lenient),
            "strict" => Ok(TransitionPolicy::Strict),
            other => Err(format!("Unknown transition policy: {}", other)),
        }
    }
}
