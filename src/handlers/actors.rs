use axum::extract::{Extension, State};
use serde::Serialize;

use crate::db::{AppState, queries};
use crate::error::{AppError, Result};
use crate::extractors::{Json, Path};
use crate::jwt::ClaimsSet;
use crate::models::{Actor, CreateActor, UpdateActor};

#[derive(Debug, Serialize)]
pub struct ActorList {
    pub success: bool,
    pub actors: Vec<Actor>,
}

#[derive(Debug, Serialize)]
pub struct ActorResponse {
    pub success: bool,
    pub actor: Actor,
}

pub async fn list_actors(State(state): State<AppState>) -> Result<Json<ActorList>> {
    let conn = state.db.get()?;
    let actors = queries::list_actors(&conn).map_err(AppError::read_failed)?;
    Ok(Json(ActorList {
        success: true,
        actors,
    }))
}

pub async fn create_actor(
    State(state): State<AppState>,
    Extension(claims): Extension<ClaimsSet>,
    Json(input): Json<CreateActor>,
) -> Result<Json<ActorResponse>> {
    let conn = state.db.get()?;
    let actor = queries::create_actor(&conn, &input).map_err(AppError::write_failed)?;

    tracing::info!("Actor {} created by {}", actor.id, claims.subject);

    Ok(Json(ActorResponse {
        success: true,
        actor,
    }))
}

pub async fn update_actor(
    State(state): State<AppState>,
    Extension(claims): Extension<ClaimsSet>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateActor>,
) -> Result<Json<ActorResponse>> {
    let conn = state.db.get()?;

    let updated = queries::update_actor(&conn, id, &input).map_err(AppError::write_failed)?;
    if !updated {
        return Err(AppError::NotFound(format!("Actor {} not found", id)));
    }

    let actor = queries::get_actor_by_id(&conn, id)?
        .ok_or_else(|| AppError::NotFound(format!("Actor {} not found", id)))?;

    tracing::info!("Actor {} updated by {}", id, claims.subject);

    Ok(Json(ActorResponse {
        success: true,
        actor,
    }))
}

pub async fn delete_actor(
    State(state): State<AppState>,
    Extension(claims): Extension<ClaimsSet>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let conn = state.db.get()?;

    queries::get_actor_by_id(&conn, id)?
        .ok_or_else(|| AppError::NotFound(format!("Actor {} not found", id)))?;

    let deleted = queries::delete_actor(&conn, id).map_err(AppError::write_failed)?;
    if !deleted {
        return Err(AppError::NotFound(format!("Actor {} not found", id)));
    }

    tracing::info!("Actor {} deleted by {}", id, claims.subject);

    Ok(Json(serde_json::json!({ "success": true, "delete": id })))
}
