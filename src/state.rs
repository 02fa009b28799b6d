use std::sync::Arc;

use crate::auth::TokenService;
use crate::storage::Store;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(store: Arc<Store>, tokens: TokenService) -> Self {
        Self { store, tokens }
    }
}
