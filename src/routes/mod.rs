//! HTTP surface: route assembly and shared request plumbing.
//!
//! The auth endpoints own registration and login; the data routers run
//! behind [`optional_auth`] so a verified identity is available to
//! handlers without yet gating access (the web client sends a token on
//! every request, but the data endpoints are open by contract).

pub mod auth;
pub mod expenses;
pub mod meals;
pub mod pantry;
pub mod shopping;
pub mod stats;

use axum::{
    extract::{FromRequest, Request},
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::{optional_auth, require_auth};
use crate::error::ApiError;
use crate::state::AppState;

/// JSON extractor that reports malformed bodies as a 400 validation
/// error instead of axum's default 422.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: serde::de::DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidJson(value)),
            Err(rejection) => Err(ApiError::bad_request(format!(
                "Invalid data: {}",
                rejection.body_text()
            ))),
        }
    }
}

/// Parses a path id. A string that is not a UUID can never name a
/// stored record, so callers treat `None` as not-found rather than as a
/// malformed request.
pub(crate) fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Builds the full `/api` router.
pub fn api_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .merge(
            Router::new()
                .route("/auth/me", get(auth::me))
                .layer(middleware::from_fn_with_state(state.clone(), require_auth)),
        );

    let data_routes = Router::new()
        .route("/pantry", get(pantry::list).post(pantry::create))
        .route("/pantry/{id}", put(pantry::update).delete(pantry::remove))
        .route("/shopping", get(shopping::list).post(shopping::create))
        .route(
            "/shopping/{id}",
            put(shopping::update).delete(shopping::remove),
        )
        .route("/meals", get(meals::list).post(meals::create))
        .route("/meals/{id}", delete(meals::remove))
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route("/stats", get(stats::stats))
        .route("/expiring-soon", get(stats::expiring_soon))
        .layer(middleware::from_fn_with_state(state.clone(), optional_auth));

    let api = Router::new()
        .route("/health", get(health))
        .merge(auth_routes)
        .merge(data_routes)
        .with_state(state);

    Router::new().nest("/api", api)
}
