use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{Movie, MoviePayload, MOVIE_FIELDS};
use crate::{
    error::ApiError,
    payload::{Created, JsonObject},
    state::AppState,
};

pub fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route(
            "/movies/:id",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
}

#[instrument(skip(state))]
pub async fn list_movies(State(state): State<AppState>) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state.movies.list().await?;
    Ok(Json(movies))
}

#[instrument(skip(state))]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Movie>, ApiError> {
    match state.movies.find(id).await? {
        Some(movie) => Ok(Json(movie)),
        None => {
            warn!(id, "movie not found");
            Err(ApiError::NotFound { resource: "movie", id })
        }
    }
}

#[instrument(skip(state, body))]
pub async fn create_movie(
    State(state): State<AppState>,
    body: Result<Json<JsonObject>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let movie: MoviePayload = MOVIE_FIELDS.parse(body)?;
    let id = state.movies.insert(&movie).await?;
    info!(id, title = %movie.title, "movie created");
    Ok((StatusCode::CREATED, Json(Created { id })))
}

#[instrument(skip(state, body))]
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: Result<Json<JsonObject>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let movie: MoviePayload = MOVIE_FIELDS.parse(body)?;
    if state.movies.update(id, &movie).await? == 0 {
        warn!(id, "update on missing movie");
        return Err(ApiError::NotFound { resource: "movie", id });
    }
    info!(id, "movie updated");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if state.movies.delete(id).await? == 0 {
        warn!(id, "delete on missing movie");
        return Err(ApiError::NotFound { resource: "movie", id });
    }
    info!(id, "movie deleted");
    Ok(StatusCode::NO_CONTENT)
}
