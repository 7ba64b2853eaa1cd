//! Daily entry API endpoints.

use api_types::daily_entry::{DailyEntryCreated, DailyEntryNew, DailyEntryView, UndoResponse};
use axum::{Json, extract::State, http::StatusCode};
use engine::MoneyCents;

use crate::{ServerError, people::person_view, server::ServerState};

pub(crate) fn entry_view(entry: &engine::DailyEntry) -> DailyEntryView {
    DailyEntryView {
        id: entry.id,
        date: entry.date,
        egg_price_minor: entry.egg_price.cents(),
        total_eggs: entry.total_eggs,
        total_cost_minor: entry.total_cost.cents(),
    }
}

pub async fn daily_entry_new(
    State(state): State<ServerState>,
    Json(payload): Json<DailyEntryNew>,
) -> Result<(StatusCode, Json<DailyEntryCreated>), ServerError> {
    let (entry, people) = state
        .engine
        .submit_daily_entry(
            payload.date,
            MoneyCents::new(payload.egg_price_minor),
            &payload.allocations,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DailyEntryCreated {
            entry: entry_view(&entry),
            people: people.into_iter().map(person_view).collect(),
        }),
    ))
}

pub async fn daily_entry_undo(
    State(state): State<ServerState>,
) -> Result<Json<UndoResponse>, ServerError> {
    let entry = state.engine.undo_last_daily_entry().await?;
    Ok(Json(UndoResponse {
        entry: entry_view(&entry),
    }))
}
