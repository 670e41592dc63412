//! Handler for the landing page event info and countdown.

use axum::extract::State;
use axum::Json;
use cafe_core::countdown::{countdown, phase, Countdown, EventPhase};
use cafe_core::types::Timestamp;
use chrono::Utc;
use serde::Serialize;

use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EventInfo {
    pub name: String,
    pub venue: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub phase: EventPhase,
    pub countdown: Countdown,
    /// Lets clients correct for a skewed local clock.
    pub server_time: Timestamp,
}

/// GET /api/v1/event
pub async fn get_event(State(state): State<AppState>) -> Json<DataResponse<EventInfo>> {
    let event = &state.config.event;
    let now = Utc::now();

    Json(DataResponse {
        data: EventInfo {
            name: event.name.clone(),
            venue: event.venue.clone(),
            starts_at: event.starts_at,
            ends_at: event.ends_at,
            phase: phase(now, event.starts_at, event.ends_at),
            countdown: countdown(now, event.starts_at),
            server_time: now,
        },
    })
}
