//! Expense tracking endpoints.

use axum::{extract::State, http::StatusCode, Json};

use super::ValidJson;
use crate::error::ApiError;
use crate::models::{Expense, NewExpense};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Json<Vec<Expense>> {
    Json(state.store.all_expenses())
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(new): ValidJson<NewExpense>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    new.validate().map_err(ApiError::bad_request)?;

    Ok((StatusCode::CREATED, Json(state.store.create_expense(new))))
}
