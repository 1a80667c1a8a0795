use axum::extract::State;
use axum::Json;

use crate::error::ApiResult;
use crate::extract::PathId;
use crate::person::{person_manager::PersonManager, person_types::Person};
use crate::store::Store;

/// A missing row is reported as a store error (500), not 404.
pub async fn person_get(
    State(store): State<Store>,
    PathId(id): PathId,
) -> ApiResult<Json<Person>> {
    let person = store
        .with_connection(move |conn| PersonManager::get(conn, &id))
        .await?;
    Ok(Json(person))
}
