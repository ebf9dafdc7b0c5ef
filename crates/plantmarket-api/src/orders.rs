// Order HTTP routes
//
// Placement and the buyer's order list are buyer-only; the received list
// and status updates belong to the nursery owning the ordered plant.

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Router,
};
use uuid::Uuid;

use plantmarket_contracts::{Envelope, PlaceOrderRequest, UpdateOrderStatusRequest};

use crate::auth::{BuyerUser, NurseryUser};
use crate::error::{to_data, ApiError};
use crate::extract::Json;
use crate::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/orders", post(place_order).get(list_orders))
        .route("/v1/orders/received", get(list_received_orders))
        .route("/v1/orders/:order_id/status", put(update_order_status))
        .with_state(state)
}

/// POST /v1/orders - Place an order for a plant
#[utoipa::path(
    post,
    path = "/v1/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 200, description = "Order placed", body = Envelope),
        (status = 403, description = "Not a buyer token, unknown plant, or out of stock", body = Envelope)
    ),
    security(("bearer_token" = [])),
    tag = "orders"
)]
pub async fn place_order(
    State(state): State<AppState>,
    BuyerUser(buyer): BuyerUser,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<Json<Envelope>, ApiError> {
    let order = state.orders.place(buyer.id, req).await?;
    Ok(Json(Envelope::ok(
        "Order placed successfully.",
        to_data(order)?,
    )))
}

/// GET /v1/orders - The calling buyer's orders
#[utoipa::path(
    get,
    path = "/v1/orders",
    responses(
        (status = 200, description = "Caller's orders", body = Envelope),
        (status = 403, description = "Not a buyer token", body = Envelope)
    ),
    security(("bearer_token" = [])),
    tag = "orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    BuyerUser(buyer): BuyerUser,
) -> Result<Json<Envelope>, ApiError> {
    let orders = state.orders.list_for_buyer(buyer.id).await?;
    Ok(Json(Envelope::ok(
        "Retrieved list of orders.",
        to_data(orders)?,
    )))
}

/// GET /v1/orders/received - Orders on the calling nursery's listings
#[utoipa::path(
    get,
    path = "/v1/orders/received",
    responses(
        (status = 200, description = "Orders received by the caller", body = Envelope),
        (status = 403, description = "Not a nursery token", body = Envelope)
    ),
    security(("bearer_token" = [])),
    tag = "orders"
)]
pub async fn list_received_orders(
    State(state): State<AppState>,
    NurseryUser(nursery): NurseryUser,
) -> Result<Json<Envelope>, ApiError> {
    let orders = state.orders.list_received(nursery.id).await?;
    Ok(Json(Envelope::ok(
        "Retrieved list of received orders.",
        to_data(orders)?,
    )))
}

/// PUT /v1/orders/{order_id}/status - Move an order to a new status
#[utoipa::path(
    put,
    path = "/v1/orders/{order_id}/status",
    params(("order_id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Envelope),
        (status = 403, description = "Missing, not owned by caller, or already terminal", body = Envelope)
    ),
    security(("bearer_token" = [])),
    tag = "orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    NurseryUser(nursery): NurseryUser,
    Path(order_id): Path<Uuid>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> Result<Json<Envelope>, ApiError> {
    let order = state.orders.update_status(order_id, nursery.id, req).await?;
    Ok(Json(Envelope::ok(
        "Order status updated successfully.",
        to_data(order)?,
    )))
}
