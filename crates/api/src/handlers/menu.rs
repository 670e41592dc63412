use axum::extract::State;
use axum::Json;
use cafe_core::menu::{MenuItem, MAX_SELECTIONS};
use serde::Serialize;

use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub items: Vec<MenuItem>,
    pub max_selections: usize,
}

/// GET /api/v1/menu
pub async fn get_menu(State(state): State<AppState>) -> Json<DataResponse<MenuResponse>> {
    Json(DataResponse {
        data: MenuResponse {
            items: state.menu.items.clone(),
            max_selections: MAX_SELECTIONS,
        },
    })
}
