use axum::extract::{Extension, State};
use serde::Serialize;

use crate::db::{AppState, queries};
use crate::error::{AppError, Result};
use crate::extractors::{Json, Path};
use crate::jwt::ClaimsSet;
use crate::models::{CreateMovie, Movie, UpdateMovie};

#[derive(Debug, Serialize)]
pub struct MovieList {
    pub success: bool,
    pub movies: Vec<Movie>,
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub success: bool,
    pub movie: Movie,
}

pub async fn list_movies(State(state): State<AppState>) -> Result<Json<MovieList>> {
    let conn = state.db.get()?;
    let movies = queries::list_movies(&conn).map_err(AppError::read_failed)?;
    Ok(Json(MovieList {
        success: true,
        movies,
    }))
}

pub async fn create_movie(
    State(state): State<AppState>,
    Extension(claims): Extension<ClaimsSet>,
    Json(input): Json<CreateMovie>,
) -> Result<Json<MovieResponse>> {
    let conn = state.db.get()?;
    let movie = queries::create_movie(&conn, &input).map_err(AppError::write_failed)?;

    tracing::info!("Movie {} created by {}", movie.id, claims.subject);

    Ok(Json(MovieResponse {
        success: true,
        movie,
    }))
}

pub async fn update_movie(
    State(state): State<AppState>,
    Extension(claims): Extension<ClaimsSet>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateMovie>,
) -> Result<Json<MovieResponse>> {
    let conn = state.db.get()?;

    queries::get_movie_by_id(&conn, id)?
        .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", id)))?;

    let release_date = input
        .release_date()
        .map_err(|e| AppError::BadRequest(format!("release_date: {}", e)))?;

    let updated = queries::update_movie(&conn, id, input.title(), release_date)
        .map_err(AppError::write_failed)?;
    if !updated {
        return Err(AppError::NotFound(format!("Movie {} not found", id)));
    }

    let movie = queries::get_movie_by_id(&conn, id)?
        .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", id)))?;

    tracing::info!("Movie {} updated by {}", id, claims.subject);

    Ok(Json(MovieResponse {
        success: true,
        movie,
    }))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    Extension(claims): Extension<ClaimsSet>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let conn = state.db.get()?;

    queries::get_movie_by_id(&conn, id)?
        .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", id)))?;

    let deleted = queries::delete_movie(&conn, id).map_err(AppError::write_failed)?;
    if !deleted {
        return Err(AppError::NotFound(format!("Movie {} not found", id)));
    }

    tracing::info!("Movie {} deleted by {}", id, claims.subject);

    Ok(Json(serde_json::json!({ "success": true, "delete": id })))
}
