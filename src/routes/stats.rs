//! Dashboard endpoints: aggregate statistics and the expiring-soon
//! list. Both are derived queries computed from current store state.

use axum::{extract::State, Json};

use crate::models::PantryItem;
use crate::state::AppState;
use crate::storage::Stats;

/// The dashboard's fixed alert window.
const EXPIRING_SOON_DAYS: i64 = 7;

pub async fn stats(State(state): State<AppState>) -> Json<Stats> {
    Json(state.store.stats())
}

pub async fn expiring_soon(State(state): State<AppState>) -> Json<Vec<PantryItem>> {
    Json(state.store.expiring_within(EXPIRING_SOON_DAYS))
}
