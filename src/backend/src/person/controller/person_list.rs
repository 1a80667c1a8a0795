use axum::extract::State;
use axum::Json;

use crate::error::ApiResult;
use crate::person::{person_manager::PersonManager, person_types::Person};
use crate::store::Store;

pub async fn person_list(State(store): State<Store>) -> ApiResult<Json<Vec<Person>>> {
    let people = store.with_connection(PersonManager::list).await?;
    Ok(Json(people))
}
