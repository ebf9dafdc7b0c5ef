// Buyer account HTTP routes

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};

use plantmarket_contracts::{
    Envelope, LoginRequest, RegisterBuyerRequest, UpdateBuyerRequest,
};

use crate::auth::BuyerUser;
use crate::error::{to_data, ApiError};
use crate::extract::Json;
use crate::services::UserService;
use crate::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/buyers/register", post(register_buyer))
        .route("/v1/buyers/login", post(login_buyer))
        .route(
            "/v1/buyers/me",
            get(get_buyer).put(update_buyer).delete(delete_buyer),
        )
        .with_state(state)
}

/// POST /v1/buyers/register - Create a buyer account
#[utoipa::path(
    post,
    path = "/v1/buyers/register",
    request_body = RegisterBuyerRequest,
    responses(
        (status = 200, description = "Buyer registered", body = Envelope),
        (status = 403, description = "Email already registered", body = Envelope)
    ),
    tag = "buyers"
)]
pub async fn register_buyer(
    State(state): State<AppState>,
    Json(req): Json<RegisterBuyerRequest>,
) -> Result<Json<Envelope>, ApiError> {
    state.users.register_buyer(req).await?;
    Ok(Json(Envelope::ok_empty(
        "User(Buyer) registered successfully.",
    )))
}

/// POST /v1/buyers/login - Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/v1/buyers/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; data carries user_id and jwt_token", body = Envelope),
        (status = 401, description = "Wrong password", body = Envelope),
        (status = 403, description = "Unknown email", body = Envelope)
    ),
    tag = "buyers"
)]
pub async fn login_buyer(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Envelope>, ApiError> {
    let data = state.users.login_buyer(req).await?;
    Ok(Json(Envelope::ok(
        "User logged in successfully.",
        to_data(data)?,
    )))
}

/// GET /v1/buyers/me - Authenticated buyer's profile
#[utoipa::path(
    get,
    path = "/v1/buyers/me",
    responses(
        (status = 200, description = "Profile data", body = Envelope),
        (status = 401, description = "Not authenticated", body = Envelope),
        (status = 403, description = "Not a buyer token", body = Envelope)
    ),
    security(("bearer_token" = [])),
    tag = "buyers"
)]
pub async fn get_buyer(BuyerUser(row): BuyerUser) -> Result<Json<Envelope>, ApiError> {
    let buyer = UserService::row_to_buyer(row);
    Ok(Json(Envelope::ok("Retrieved user data.", to_data(buyer)?)))
}

/// PUT /v1/buyers/me - Partial profile update
#[utoipa::path(
    put,
    path = "/v1/buyers/me",
    request_body = UpdateBuyerRequest,
    responses(
        (status = 200, description = "Updated profile", body = Envelope),
        (status = 401, description = "Not authenticated", body = Envelope)
    ),
    security(("bearer_token" = [])),
    tag = "buyers"
)]
pub async fn update_buyer(
    State(state): State<AppState>,
    BuyerUser(row): BuyerUser,
    Json(req): Json<UpdateBuyerRequest>,
) -> Result<Json<Envelope>, ApiError> {
    let buyer = state
        .users
        .update_buyer(row.id, req)
        .await?
        .ok_or_else(|| ApiError::not_found("User does not exist."))?;

    Ok(Json(Envelope::ok(
        "User updated successfully.",
        to_data(buyer)?,
    )))
}

/// DELETE /v1/buyers/me - Soft-delete the account
#[utoipa::path(
    delete,
    path = "/v1/buyers/me",
    responses(
        (status = 200, description = "Account deleted", body = Envelope),
        (status = 401, description = "Not authenticated", body = Envelope)
    ),
    security(("bearer_token" = [])),
    tag = "buyers"
)]
pub async fn delete_buyer(
    State(state): State<AppState>,
    BuyerUser(row): BuyerUser,
) -> Result<Json<Envelope>, ApiError> {
    if !state.users.delete_buyer(row.id).await? {
        return Err(ApiError::not_found("User does not exist."));
    }
    Ok(Json(Envelope::ok_empty("User deleted successfully.")))
}
