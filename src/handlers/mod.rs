mod actors;
mod movies;

pub use actors::*;
pub use movies::*;

use axum::{
    Json, Router, middleware,
    routing::{delete, get, patch, post},
};
use serde::Serialize;

use crate::db::AppState;
use crate::middleware::{PermissionGate, require_permission};
use crate::models::Permission;

#[derive(Serialize)]
struct Welcome {
    message: &'static str,
}

async fn index() -> Json<Welcome> {
    Json(Welcome {
        message: "Hello, welcome to Capstone project",
    })
}

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        // Actors
        .route(
            "/actors",
            get(list_actors).route_layer(middleware::from_fn_with_state(
                PermissionGate::new(state.clone(), Permission::GetActors),
                require_permission,
            )),
        )
        .route(
            "/actors",
            post(create_actor).route_layer(middleware::from_fn_with_state(
                PermissionGate::new(state.clone(), Permission::PostActors),
                require_permission,
            )),
        )
        .route(
            "/actors/{id}",
            patch(update_actor).route_layer(middleware::from_fn_with_state(
                PermissionGate::new(state.clone(), Permission::PatchActors),
                require_permission,
            )),
        )
        .route(
            "/actors/{id}",
            delete(delete_actor).route_layer(middleware::from_fn_with_state(
                PermissionGate::new(state.clone(), Permission::DeleteActors),
                require_permission,
            )),
        )
        // Movies
        .route(
            "/movies",
            get(list_movies).route_layer(middleware::from_fn_with_state(
                PermissionGate::new(state.clone(), Permission::GetMovies),
                require_permission,
            )),
        )
        .route(
            "/movies",
            post(create_movie).route_layer(middleware::from_fn_with_state(
                PermissionGate::new(state.clone(), Permission::PostMovies),
                require_permission,
            )),
        )
        .route(
            "/movies/{id}",
            patch(update_movie).route_layer(middleware::from_fn_with_state(
                PermissionGate::new(state.clone(), Permission::PatchMovies),
                require_permission,
            )),
        )
        .route(
            "/movies/{id}",
            delete(delete_movie).route_layer(middleware::from_fn_with_state(
                PermissionGate::new(state.clone(), Permission::DeleteMovies),
                require_permission,
            )),
        )
}
