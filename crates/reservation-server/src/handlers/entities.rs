//! Candidate and recruiter handlers
//!
//! Both kinds expose the same routes; handlers are generic over the entity
//! and pick their service through [`HasEntityService`].

use super::ApiError;
use crate::services::{HasEntityService, ReservationService};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use reservation_core::{ContactPatch, ContactRequest, ContactResponse, Entity};

/// `/` and `/:id` routes for one entity kind
pub fn routes<E>() -> Router<AppState>
where
    E: Entity,
    ReservationService: HasEntityService<E>,
{
    Router::new()
        .route("/", get(list::<E>).post(add::<E>))
        .route(
            "/:id",
            get(fetch::<E>)
                .put(update::<E>)
                .patch(patch::<E>)
                .delete(remove::<E>),
        )
}

pub async fn list<E>(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactResponse>>, ApiError>
where
    E: Entity,
    ReservationService: HasEntityService<E>,
{
    let entities = state.service.of::<E>().list().await?;
    Ok(Json(entities))
}

pub async fn add<E>(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError>
where
    E: Entity,
    ReservationService: HasEntityService<E>,
{
    let Json(req) = payload?;
    let created = state.service.of::<E>().add(req).await?;
    Ok(Json(created))
}

pub async fn fetch<E>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContactResponse>, ApiError>
where
    E: Entity,
    ReservationService: HasEntityService<E>,
{
    let entity = state.service.of::<E>().get(&id).await?;
    Ok(Json(entity))
}

pub async fn update<E>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError>
where
    E: Entity,
    ReservationService: HasEntityService<E>,
{
    let Json(req) = payload?;
    state.service.of::<E>().update(&id, req).await?;
    Ok(StatusCode::OK)
}

pub async fn patch<E>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ContactPatch>, JsonRejection>,
) -> Result<StatusCode, ApiError>
where
    E: Entity,
    ReservationService: HasEntityService<E>,
{
    let Json(patch) = payload?;
    state.service.of::<E>().patch(&id, patch).await?;
    Ok(StatusCode::OK)
}

pub async fn remove<E>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    E: Entity,
    ReservationService: HasEntityService<E>,
{
    state.service.of::<E>().delete(&id).await?;
    Ok(StatusCode::OK)
}
