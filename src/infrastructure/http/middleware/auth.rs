use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::entities::{Actor, Role};
use crate::domain::ports::deletion_request_queue::DeletionRequestQueue;
use crate::infrastructure::http::middleware::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub jwt_secret: Arc<str>,
    pub notification_service: crate::application::services::NotificationService,
    pub deletion_request_service: crate::application::services::DeletionRequestService,
    pub deletion_request_queue: Arc<dyn DeletionRequestQueue>,
}

/// Bearer token claims (HS256).
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (caller identifier).
    pub sub: String,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// `ADMIN` grants access to the deletion request workflow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl From<Claims> for Actor {
    fn from(claims: Claims) -> Self {
        let role = Role::from_claim(claims.role.as_deref());
        Actor::new(claims.sub, role)
    }
}

/// Sign a token for `subject`, valid for `ttl_seconds`.
pub fn issue_token(
    secret: &str,
    subject: &str,
    role: Option<&str>,
    ttl_seconds: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: subject.to_string(),
        exp: (Utc::now() + Duration::seconds(ttl_seconds)).timestamp(),
        role: role.map(str::to_string),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate signature and expiry, returning the claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!("Rejected bearer token: {}", e);
            ApiError::Unauthorized
        })
}

/// Extract and validate the bearer token, storing the caller as an [`Actor`]
/// in request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    let claims = validate_token(token, &state.jwt_secret)?;
    request.extensions_mut().insert(Actor::from(claims));

    Ok(next.run(request).await)
}

/// Must run after [`require_auth`].
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let actor = request
        .extensions()
        .get::<Actor>()
        .ok_or(ApiError::Unauthorized)?;

    if !actor.is_admin() {
        tracing::warn!("Non-admin {} attempted an admin operation", actor.subject);
        return Err(ApiError::Forbidden(
            "Administrator role required".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
