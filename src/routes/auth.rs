//! Account endpoints: register, login, current user, logout.

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};

use super::ValidJson;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::UserProfile;
use crate::state::AppState;

const MIN_PASSWORD_CHARS: usize = 6;

/// Both fields optional so a missing one reads as a 400 with a clear
/// message rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    username: Option<String>,
    password: Option<String>,
}

impl CredentialsRequest {
    fn into_fields(self) -> Result<(String, String), ApiError> {
        match (self.username, self.password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Ok((u, p)),
            _ => Err(ApiError::bad_request("Username and password required")),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    user: UserProfile,
    token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: &'static str,
}

pub async fn register(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (username, password) = body.into_fields()?;

    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ApiError::bad_request(
            "Password must be at least 6 characters",
        ));
    }

    let user = state.store.create_user(&username, &password)?;
    let token = state.tokens.issue(user.id);

    tracing::info!(username = %user.username, "registered new user");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserProfile::from(&user),
            token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<CredentialsRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (username, password) = body.into_fields()?;

    // One message for both unknown-user and wrong-password
    let user = state
        .store
        .validate_credentials(&username, &password)
        .ok_or(ApiError::unauthorized("Invalid username or password"))?;

    let token = state.tokens.issue(user.id);

    Ok(Json(AuthResponse {
        user: UserProfile::from(&user),
        token,
    }))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserProfile>, ApiError> {
    let user = state
        .store
        .get_user(auth.user_id)
        .ok_or(ApiError::not_found("User not found"))?;

    Ok(Json(UserProfile::from(&user)))
}

/// Tokens are stateless bearers, so there is nothing to revoke
/// server-side; the client discards its copy.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Logged out successfully",
    })
}
