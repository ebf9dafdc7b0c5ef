// Plant listing HTTP routes
//
// Creating and mutating listings is nursery-only; browsing the catalog is
// open to any authenticated identity.

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Router,
};
use uuid::Uuid;

use plantmarket_contracts::{CreatePlantRequest, Envelope, UpdatePlantRequest};

use crate::auth::{AuthUser, NurseryUser};
use crate::error::{to_data, ApiError};
use crate::extract::Json;
use crate::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/plants", post(create_plant).get(list_plants))
        .route("/v1/plants/own", get(list_own_plants))
        .route(
            "/v1/plants/:plant_id",
            put(update_plant).delete(delete_plant),
        )
        .with_state(state)
}

/// POST /v1/plants - Post a new listing
#[utoipa::path(
    post,
    path = "/v1/plants",
    request_body = CreatePlantRequest,
    responses(
        (status = 200, description = "Listing created", body = Envelope),
        (status = 403, description = "Not a nursery token or invalid price", body = Envelope)
    ),
    security(("bearer_token" = [])),
    tag = "plants"
)]
pub async fn create_plant(
    State(state): State<AppState>,
    NurseryUser(nursery): NurseryUser,
    Json(req): Json<CreatePlantRequest>,
) -> Result<Json<Envelope>, ApiError> {
    let plant = state.plants.create(nursery.id, req).await?;
    Ok(Json(Envelope::ok(
        "Plant posted successfully.",
        to_data(plant)?,
    )))
}

/// GET /v1/plants - All listings, any authenticated role
#[utoipa::path(
    get,
    path = "/v1/plants",
    responses(
        (status = 200, description = "All live listings", body = Envelope),
        (status = 401, description = "Not authenticated", body = Envelope)
    ),
    security(("bearer_token" = [])),
    tag = "plants"
)]
pub async fn list_plants(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Envelope>, ApiError> {
    let plants = state.plants.list_all().await?;
    Ok(Json(Envelope::ok(
        "Retrieved list of plants.",
        to_data(plants)?,
    )))
}

/// GET /v1/plants/own - The calling nursery's listings
#[utoipa::path(
    get,
    path = "/v1/plants/own",
    responses(
        (status = 200, description = "Caller's listings", body = Envelope),
        (status = 403, description = "Not a nursery token", body = Envelope)
    ),
    security(("bearer_token" = [])),
    tag = "plants"
)]
pub async fn list_own_plants(
    State(state): State<AppState>,
    NurseryUser(nursery): NurseryUser,
) -> Result<Json<Envelope>, ApiError> {
    let plants = state.plants.list_own(nursery.id).await?;
    Ok(Json(Envelope::ok(
        "Retrieved list of plants.",
        to_data(plants)?,
    )))
}

/// PUT /v1/plants/{plant_id} - Partial update of an owned listing
#[utoipa::path(
    put,
    path = "/v1/plants/{plant_id}",
    params(("plant_id" = Uuid, Path, description = "Plant ID")),
    request_body = UpdatePlantRequest,
    responses(
        (status = 200, description = "Updated listing", body = Envelope),
        (status = 403, description = "Missing, deleted, or not owned by caller", body = Envelope)
    ),
    security(("bearer_token" = [])),
    tag = "plants"
)]
pub async fn update_plant(
    State(state): State<AppState>,
    NurseryUser(nursery): NurseryUser,
    Path(plant_id): Path<Uuid>,
    Json(req): Json<UpdatePlantRequest>,
) -> Result<Json<Envelope>, ApiError> {
    let plant = state.plants.update(plant_id, nursery.id, req).await?;
    Ok(Json(Envelope::ok("Updated successfully.", to_data(plant)?)))
}

/// DELETE /v1/plants/{plant_id} - Soft-delete an owned listing
#[utoipa::path(
    delete,
    path = "/v1/plants/{plant_id}",
    params(("plant_id" = Uuid, Path, description = "Plant ID")),
    responses(
        (status = 200, description = "Listing deleted", body = Envelope),
        (status = 403, description = "Missing, deleted, or not owned by caller", body = Envelope)
    ),
    security(("bearer_token" = [])),
    tag = "plants"
)]
pub async fn delete_plant(
    State(state): State<AppState>,
    NurseryUser(nursery): NurseryUser,
    Path(plant_id): Path<Uuid>,
) -> Result<Json<Envelope>, ApiError> {
    state.plants.delete(plant_id, nursery.id).await?;
    Ok(Json(Envelope::ok_empty("Deletion successful.")))
}
