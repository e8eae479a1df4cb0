use crate::infrastructure::http::controllers::{deletion_requests, health, notifications};
use crate::infrastructure::http::middleware::{require_admin, require_auth, AppState};
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let notification_routes = Router::new()
        .route("/notifications", post(notifications::create_notification))
        .route(
            "/notifications/user/:user_id",
            get(notifications::list_notifications_by_user)
                .delete(notifications::delete_notifications_by_user),
        )
        .route(
            "/notifications/user/:user_id/unread",
            get(notifications::list_unread_notifications_by_user),
        )
        .route(
            "/notifications/:notification_id/read",
            put(notifications::mark_notification_as_read),
        )
        .route(
            "/events/user-deletion-requests",
            post(deletion_requests::publish_deletion_event),
        );

    let admin_routes = Router::new()
        .route(
            "/admin/deletion-requests/pending",
            get(deletion_requests::list_pending_requests),
        )
        .route(
            "/admin/deletion-requests/:id/approve",
            post(deletion_requests::approve_request),
        )
        .route(
            "/admin/deletion-requests/:id/reject",
            post(deletion_requests::reject_request),
        )
        .route_layer(middleware::from_fn(require_admin));

    // require_auth wraps require_admin, so it runs first
    let protected = notification_routes
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health::health))
        .merge(protected)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
