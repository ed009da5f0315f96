use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{User, UserPayload, USER_FIELDS};
use crate::{
    error::ApiError,
    payload::{Created, JsonObject},
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users.list().await?))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<User>, ApiError> {
    let user = state.users.find(id).await?.ok_or_else(|| {
        warn!(id, "user not found");
        ApiError::NotFound { resource: "user", id }
    })?;
    Ok(Json(user))
}

#[instrument(skip(state, body))]
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<JsonObject>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let user: UserPayload = USER_FIELDS.parse(body)?;
    let id = state.users.insert(&user).await?;
    info!(id, "user created");
    Ok((StatusCode::CREATED, Json(Created { id })))
}

#[instrument(skip(state, body))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: Result<Json<JsonObject>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let user: UserPayload = USER_FIELDS.parse(body)?;
    match state.users.update(id, &user).await? {
        0 => {
            warn!(id, "update on missing user");
            Err(ApiError::NotFound { resource: "user", id })
        }
        _ => {
            info!(id, "user updated");
            Ok(StatusCode::NO_CONTENT)
        }
    }
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    match state.users.delete(id).await? {
        0 => {
            warn!(id, "delete on missing user");
            Err(ApiError::NotFound { resource: "user", id })
        }
        _ => {
            info!(id, "user deleted");
            Ok(StatusCode::NO_CONTENT)
        }
    }
}
