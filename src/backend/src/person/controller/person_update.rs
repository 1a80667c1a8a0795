use axum::extract::State;
use axum::Json;

use crate::error::ApiResult;
use crate::extract::{JsonBody, PathId};
use crate::person::{
    person_manager::PersonManager,
    person_types::{Person, PersonInput},
};
use crate::store::Store;

/// Echoes the submitted fields under the path id, whether or not a row changed.
/// A path id that is not an integer echoes as `0`.
pub async fn person_update(
    State(store): State<Store>,
    PathId(id): PathId,
    JsonBody(input): JsonBody<PersonInput>,
) -> ApiResult<Json<Person>> {
    let echo_id = id.parse::<i64>().unwrap_or_default();

    let (changed, input) = store
        .with_connection(move |conn| {
            PersonManager::update(conn, &id, &input).map(|changed| (changed, input))
        })
        .await?;

    if changed == 0 {
        tracing::debug!(id = echo_id, "Update matched no rows");
    }

    Ok(Json(Person::from_input(echo_id, input)))
}
