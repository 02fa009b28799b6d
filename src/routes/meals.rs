//! Meal plan endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::{parse_id, ValidJson};
use crate::error::ApiError;
use crate::models::{MealPlan, NewMealPlan};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Json<Vec<MealPlan>> {
    Json(state.store.all_meal_plans())
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(new): ValidJson<NewMealPlan>,
) -> Result<(StatusCode, Json<MealPlan>), ApiError> {
    new.validate().map_err(ApiError::bad_request)?;

    Ok((StatusCode::CREATED, Json(state.store.create_meal_plan(new))))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = parse_id(&id).is_some_and(|id| state.store.delete_meal_plan(id));

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Meal plan not found"))
    }
}
