//! Report API endpoints.

use api_types::report::{DailyHistoryRow, DueView, DuesResponse, PersonHistoryRow, TotalBalance};
use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub async fn daily_history(
    State(state): State<ServerState>,
) -> Result<Json<Vec<DailyHistoryRow>>, ServerError> {
    let rows = state.engine.daily_history().await?;
    Ok(Json(
        rows.into_iter()
            .map(|row| DailyHistoryRow {
                date: row.date,
                egg_price_minor: row.egg_price.cents(),
                total_eggs: row.total_eggs,
                total_cost_minor: row.total_cost.cents(),
            })
            .collect(),
    ))
}

pub async fn person_history(
    State(state): State<ServerState>,
    Path(person_id): Path<Uuid>,
) -> Result<Json<Vec<PersonHistoryRow>>, ServerError> {
    let rows = state.engine.person_history(person_id).await?;
    Ok(Json(
        rows.into_iter()
            .map(|row| PersonHistoryRow {
                date: row.date,
                eggs: row.eggs,
                amount_minor: row.amount.cents(),
            })
            .collect(),
    ))
}

pub async fn dues(State(state): State<ServerState>) -> Result<Json<DuesResponse>, ServerError> {
    let dues = state.engine.dues().await?;
    Ok(Json(DuesResponse {
        dues: dues
            .into_iter()
            .map(|due| DueView {
                name: due.name,
                amount_minor: due.amount.cents(),
            })
            .collect(),
    }))
}

pub async fn total_balance(
    State(state): State<ServerState>,
) -> Result<Json<TotalBalance>, ServerError> {
    let totals = state.engine.total_balance().await?;
    Ok(Json(TotalBalance {
        total_credit_minor: totals.total_credit.cents(),
        total_due_minor: totals.total_due.cents(),
        net_balance_minor: totals.net_balance.cents(),
    }))
}
