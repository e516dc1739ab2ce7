// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the Chirpy service.
//!
//! Chirp validation, user creation, the admin dashboard and the middleware
//! that counts static-asset hits.

use crate::config::Config;
use crate::db::UserStore;
use crate::error::ApiError;
use crate::metrics::{ChirpOutcome, ServiceMetrics};
use crate::models::{CreateUserRequest, UserResponse};
use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    Json,
};
use chirpy_common::{
    decode_json_object, Accepted, ChirpRejection, ChirpValidator, HitCounter, ProfanityFilter,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Shared application state.
pub struct AppState {
    pub hits: HitCounter,
    pub validator: ChirpValidator,
    pub users: Arc<dyn UserStore>,
    pub metrics: ServiceMetrics,
    pub config: Config,
}

impl AppState {
    /// Build state from configuration and a user store.
    pub fn new(config: Config, users: Arc<dyn UserStore>) -> prometheus::Result<Self> {
        let validator = ChirpValidator::new(
            config.chirp.max_length,
            ProfanityFilter::new(&config.chirp.profane_words),
        );

        Ok(Self {
            hits: HitCounter::new(),
            validator,
            users,
            metrics: ServiceMetrics::new()?,
            config,
        })
    }
}

/// Count a hit, then pass the request on.
pub async fn middleware_metrics_inc(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    state.hits.increment();
    next.run(request).await
}

/// Liveness check.
pub async fn healthz() -> &'static str {
    "OK"
}

/// Validate a chirp and return its censored body.
///
/// The payload is decoded from raw bytes so a missing or unexpected
/// Content-Type does not change the outcome.
pub async fn validate_chirp(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Accepted>, ApiError> {
    match state.validator.validate_json(&body) {
        Ok(accepted) => {
            debug!(length = accepted.cleaned_body.chars().count(), "Chirp accepted");
            state.metrics.record_chirp(ChirpOutcome::Accepted);
            Ok(Json(accepted))
        }
        Err(rejection) => {
            info!(reason = %rejection, "Chirp rejected");
            let outcome = match rejection {
                ChirpRejection::TooLong { .. } => ChirpOutcome::TooLong,
                ChirpRejection::Malformed => ChirpOutcome::Malformed,
            };
            state.metrics.record_chirp(outcome);
            Err(rejection.into())
        }
    }
}

/// Create a user from `{"email": ...}`.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let req: CreateUserRequest = decode_json_object(&body).map_err(|err| {
        debug!(error = %err, "Invalid user payload");
        ApiError::InvalidRequest
    })?;
    let email = req.email.unwrap_or_default();

    let user = state.users.create_user(&email).await.map_err(|err| {
        state.metrics.record_store_failure("create_user");
        ApiError::CreateUserFailed(err)
    })?;

    info!(id = %user.id, "User created");
    state.metrics.record_user_created();
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// Admin dashboard showing the hit count.
pub async fn admin_metrics(State(state): State<Arc<AppState>>) -> Html<String> {
    let hits = state.hits.read();
    Html(format!(
        r#"
<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {hits} times!</p>
  </body>
</html>
"#
    ))
}

/// Reset the hit counter and delete all users.
///
/// Only allowed when the platform is `dev`; otherwise nothing changes.
pub async fn admin_reset(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    if !state.config.is_dev() {
        warn!(platform = %state.config.platform, "Reset refused outside dev platform");
        return Err(ApiError::Forbidden);
    }

    state.hits.reset();

    let removed = state.users.delete_all_users().await.map_err(|err| {
        state.metrics.record_store_failure("delete_all_users");
        ApiError::ResetFailed(err)
    })?;

    info!(removed, "Metrics and users reset");
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "Metrics and users reset",
    )
        .into_response())
}

/// Prometheus scrape endpoint.
pub async fn prometheus_metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.render(state.hits.read()) {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "Failed to render metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// HEAD on a GET-only route; axum would otherwise answer it with the GET handler.
pub async fn method_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

/// Anything unrouted goes to the app.
pub async fn redirect_to_app() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/app/")]).into_response()
}
