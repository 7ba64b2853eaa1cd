//! People API endpoints.

use api_types::person::{PersonNew, PersonRename, PersonView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub(crate) fn person_view(person: engine::Person) -> PersonView {
    PersonView {
        id: person.id,
        name: person.name,
        total_eggs: person.total_eggs,
        balance_minor: person.balance.cents(),
    }
}

pub async fn person_new(
    State(state): State<ServerState>,
    Json(payload): Json<PersonNew>,
) -> Result<(StatusCode, Json<PersonView>), ServerError> {
    let person = state.engine.register_person(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(person_view(person))))
}

pub async fn person_get(
    State(state): State<ServerState>,
    Path(person_id): Path<Uuid>,
) -> Result<Json<PersonView>, ServerError> {
    let person = state.engine.person(person_id).await?;
    Ok(Json(person_view(person)))
}

pub async fn people_list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<PersonView>>, ServerError> {
    let people = state.engine.list_people().await?;
    Ok(Json(people.into_iter().map(person_view).collect()))
}

pub async fn person_rename(
    State(state): State<ServerState>,
    Path(person_id): Path<Uuid>,
    Json(payload): Json<PersonRename>,
) -> Result<Json<PersonView>, ServerError> {
    let person = state.engine.rename_person(person_id, &payload.name).await?;
    Ok(Json(person_view(person)))
}
