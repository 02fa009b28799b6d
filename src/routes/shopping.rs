//! Shopping list CRUD endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::{parse_id, ValidJson};
use crate::error::ApiError;
use crate::models::{NewShoppingItem, ShoppingItem, ShoppingItemPatch};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Json<Vec<ShoppingItem>> {
    Json(state.store.all_shopping_items())
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(new): ValidJson<NewShoppingItem>,
) -> Result<(StatusCode, Json<ShoppingItem>), ApiError> {
    new.validate().map_err(ApiError::bad_request)?;

    Ok((
        StatusCode::CREATED,
        Json(state.store.create_shopping_item(new)),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(patch): ValidJson<ShoppingItemPatch>,
) -> Result<Json<ShoppingItem>, ApiError> {
    patch.validate().map_err(ApiError::bad_request)?;

    parse_id(&id)
        .and_then(|id| state.store.update_shopping_item(id, patch))
        .map(Json)
        .ok_or(ApiError::not_found("Item not found"))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = parse_id(&id).is_some_and(|id| state.store.delete_shopping_item(id));

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Item not found"))
    }
}
