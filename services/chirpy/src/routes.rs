// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Route table.

use crate::handlers::{
    admin_metrics, admin_reset, create_user, healthz, method_not_allowed,
    middleware_metrics_inc, prometheus_metrics, redirect_to_app, validate_chirp, AppState,
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Build the complete router.
///
/// - `/app/*` - static files, counted as hits
/// - `GET /api/healthz` - liveness
/// - `POST /api/validate_chirp` - chirp validation
/// - `POST /api/users` - user creation
/// - `GET /admin/metrics` - hit dashboard
/// - `POST /admin/reset` - reset hits and users (dev only)
/// - `GET <metrics.path>` - Prometheus exposition, when enabled
///
/// Wrong methods on known paths get `405`, HEAD included; unknown paths
/// redirect to `/app/`.
pub fn router(state: Arc<AppState>) -> Router {
    let app = Router::new()
        .nest_service("/app", ServeDir::new(&state.config.filepath_root))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middleware_metrics_inc,
        ));

    let mut router = Router::new()
        .merge(app)
        .route("/api/healthz", get(healthz).head(method_not_allowed))
        .route("/api/validate_chirp", post(validate_chirp))
        .route("/api/users", post(create_user))
        .route(
            "/admin/metrics",
            get(admin_metrics).head(method_not_allowed),
        )
        .route("/admin/reset", post(admin_reset));

    if state.config.metrics.enabled {
        router = router.route(
            &state.config.metrics.path,
            get(prometheus_metrics).head(method_not_allowed),
        );
    }

    router
        .fallback(redirect_to_app)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
