// Cart HTTP routes (buyer-only)

use axum::{
    extract::{Path, State},
    routing::{delete, post},
    Router,
};
use uuid::Uuid;

use plantmarket_contracts::{Envelope, UpsertCartRequest};

use crate::auth::BuyerUser;
use crate::error::{to_data, ApiError};
use crate::extract::Json;
use crate::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/cart", post(upsert_cart_item).get(list_cart))
        .route("/v1/cart/:cart_id", delete(delete_cart_item))
        .with_state(state)
}

/// POST /v1/cart - Add a plant to the cart or replace its quantity
#[utoipa::path(
    post,
    path = "/v1/cart",
    request_body = UpsertCartRequest,
    responses(
        (status = 200, description = "Cart row created or replaced", body = Envelope),
        (status = 403, description = "Not a buyer token, unknown plant, or bad quantity", body = Envelope)
    ),
    security(("bearer_token" = [])),
    tag = "cart"
)]
pub async fn upsert_cart_item(
    State(state): State<AppState>,
    BuyerUser(buyer): BuyerUser,
    Json(req): Json<UpsertCartRequest>,
) -> Result<Json<Envelope>, ApiError> {
    let item = state.cart.upsert(buyer.id, req).await?;
    Ok(Json(Envelope::ok(
        "Cart updated successfully.",
        to_data(item)?,
    )))
}

/// GET /v1/cart - The calling buyer's cart
#[utoipa::path(
    get,
    path = "/v1/cart",
    responses(
        (status = 200, description = "Cart contents", body = Envelope),
        (status = 403, description = "Not a buyer token", body = Envelope)
    ),
    security(("bearer_token" = [])),
    tag = "cart"
)]
pub async fn list_cart(
    State(state): State<AppState>,
    BuyerUser(buyer): BuyerUser,
) -> Result<Json<Envelope>, ApiError> {
    let items = state.cart.list(buyer.id).await?;
    Ok(Json(Envelope::ok("Retrieved cart.", to_data(items)?)))
}

/// DELETE /v1/cart/{cart_id} - Remove one cart row
#[utoipa::path(
    delete,
    path = "/v1/cart/{cart_id}",
    params(("cart_id" = Uuid, Path, description = "Cart item ID")),
    responses(
        (status = 200, description = "Cart row removed", body = Envelope),
        (status = 403, description = "Missing or not owned by caller", body = Envelope)
    ),
    security(("bearer_token" = [])),
    tag = "cart"
)]
pub async fn delete_cart_item(
    State(state): State<AppState>,
    BuyerUser(buyer): BuyerUser,
    Path(cart_id): Path<Uuid>,
) -> Result<Json<Envelope>, ApiError> {
    state.cart.remove(cart_id, buyer.id).await?;
    Ok(Json(Envelope::ok_empty("Deletion successful.")))
}
