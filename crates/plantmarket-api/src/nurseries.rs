// Nursery account HTTP routes
//
// Same surface as the buyer routes, against the disjoint nurseries table.
// Nursery name and rating are not updatable through the profile endpoint.

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};

use plantmarket_contracts::{
    Envelope, LoginRequest, RegisterNurseryRequest, UpdateNurseryRequest,
};

use crate::auth::NurseryUser;
use crate::error::{to_data, ApiError};
use crate::extract::Json;
use crate::services::UserService;
use crate::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/nurseries/register", post(register_nursery))
        .route("/v1/nurseries/login", post(login_nursery))
        .route(
            "/v1/nurseries/me",
            get(get_nursery).put(update_nursery).delete(delete_nursery),
        )
        .with_state(state)
}

/// POST /v1/nurseries/register - Create a nursery account
#[utoipa::path(
    post,
    path = "/v1/nurseries/register",
    request_body = RegisterNurseryRequest,
    responses(
        (status = 200, description = "Nursery registered", body = Envelope),
        (status = 403, description = "Email already registered", body = Envelope)
    ),
    tag = "nurseries"
)]
pub async fn register_nursery(
    State(state): State<AppState>,
    Json(req): Json<RegisterNurseryRequest>,
) -> Result<Json<Envelope>, ApiError> {
    state.users.register_nursery(req).await?;
    Ok(Json(Envelope::ok_empty(
        "User(Nursery) registered successfully.",
    )))
}

/// POST /v1/nurseries/login - Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/v1/nurseries/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; data carries user_id and jwt_token", body = Envelope),
        (status = 401, description = "Wrong password", body = Envelope),
        (status = 403, description = "Unknown email", body = Envelope)
    ),
    tag = "nurseries"
)]
pub async fn login_nursery(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Envelope>, ApiError> {
    let data = state.users.login_nursery(req).await?;
    Ok(Json(Envelope::ok(
        "User logged in successfully.",
        to_data(data)?,
    )))
}

/// GET /v1/nurseries/me - Authenticated nursery's profile
#[utoipa::path(
    get,
    path = "/v1/nurseries/me",
    responses(
        (status = 200, description = "Profile data", body = Envelope),
        (status = 401, description = "Not authenticated", body = Envelope),
        (status = 403, description = "Not a nursery token", body = Envelope)
    ),
    security(("bearer_token" = [])),
    tag = "nurseries"
)]
pub async fn get_nursery(NurseryUser(row): NurseryUser) -> Result<Json<Envelope>, ApiError> {
    let nursery = UserService::row_to_nursery(row);
    Ok(Json(Envelope::ok("Retrieved user data.", to_data(nursery)?)))
}

/// PUT /v1/nurseries/me - Partial profile update
#[utoipa::path(
    put,
    path = "/v1/nurseries/me",
    request_body = UpdateNurseryRequest,
    responses(
        (status = 200, description = "Updated profile", body = Envelope),
        (status = 401, description = "Not authenticated", body = Envelope)
    ),
    security(("bearer_token" = [])),
    tag = "nurseries"
)]
pub async fn update_nursery(
    State(state): State<AppState>,
    NurseryUser(row): NurseryUser,
    Json(req): Json<UpdateNurseryRequest>,
) -> Result<Json<Envelope>, ApiError> {
    let nursery = state
        .users
        .update_nursery(row.id, req)
        .await?
        .ok_or_else(|| ApiError::not_found("User does not exist."))?;

    Ok(Json(Envelope::ok(
        "User updated successfully.",
        to_data(nursery)?,
    )))
}

/// DELETE /v1/nurseries/me - Soft-delete the account
#[utoipa::path(
    delete,
    path = "/v1/nurseries/me",
    responses(
        (status = 200, description = "Account deleted", body = Envelope),
        (status = 401, description = "Not authenticated", body = Envelope)
    ),
    security(("bearer_token" = [])),
    tag = "nurseries"
)]
pub async fn delete_nursery(
    State(state): State<AppState>,
    NurseryUser(row): NurseryUser,
) -> Result<Json<Envelope>, ApiError> {
    if !state.users.delete_nursery(row.id).await? {
        return Err(ApiError::not_found("User does not exist."));
    }
    Ok(Json(Envelope::ok_empty("User deleted successfully.")))
}
