use axum::extract::State;
use axum::Json;

use crate::error::ApiResult;
use crate::extract::JsonBody;
use crate::person::{
    person_manager::PersonManager,
    person_types::{Person, PersonInput},
};
use crate::store::Store;

pub async fn person_create(
    State(store): State<Store>,
    JsonBody(input): JsonBody<PersonInput>,
) -> ApiResult<Json<Person>> {
    let person = store
        .with_connection(move |conn| PersonManager::create(conn, input))
        .await?;
    tracing::info!(id = person.id, "Created person");
    Ok(Json(person))
}
