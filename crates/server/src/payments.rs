//! Payment API endpoints.

use api_types::payment::{PaymentNew, PaymentRecorded};
use axum::{Json, extract::State, http::StatusCode};
use engine::MoneyCents;

use crate::{ServerError, people::person_view, server::ServerState};

pub async fn payment_new(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentNew>,
) -> Result<(StatusCode, Json<PaymentRecorded>), ServerError> {
    let (_, person) = state
        .engine
        .record_payment(payload.person_id, MoneyCents::new(payload.amount_minor))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PaymentRecorded {
            person: person_view(person),
        }),
    ))
}
