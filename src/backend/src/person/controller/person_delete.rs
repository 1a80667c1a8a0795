use axum::extract::State;
use axum::Json;

use crate::error::ApiResult;
use crate::extract::PathId;
use crate::person::{person_manager::PersonManager, person_types::DeleteResponse};
use crate::store::Store;

pub async fn person_delete(
    State(store): State<Store>,
    PathId(id): PathId,
) -> ApiResult<Json<DeleteResponse>> {
    let removed = {
        let id = id.clone();
        store
            .with_connection(move |conn| PersonManager::delete(conn, &id))
            .await?
    };

    if removed == 0 {
        tracing::debug!(id = %id, "Delete matched no rows");
    }

    Ok(Json(DeleteResponse::for_id(&id)))
}
