// Order service
//
// Buyers place and view their orders; the nursery owning the plant sees the
// order on its received list and drives the status forward.

use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use plantmarket_contracts::{Order, OrderStatus, PlaceOrderRequest, UpdateOrderStatusRequest};
use plantmarket_storage::{CreateOrder, Database, OrderRow};

use crate::error::ApiError;

const ORDER_MISSING: &str = "Order does not exist.";

pub struct OrderService {
    db: Arc<Database>,
}

impl OrderService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn place(&self, buyer_id: Uuid, req: PlaceOrderRequest) -> Result<Order, ApiError> {
        if req.quantity < 1 {
            return Err(ApiError::validation("Quantity must be at least 1."));
        }

        let plant = self
            .db
            .get_plant(req.plant_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Plant does not exist."))?;

        if !plant.in_stock {
            return Err(ApiError::validation("Plant is out of stock."));
        }

        let row = self
            .db
            .create_order(CreateOrder {
                buyer_id,
                plant_id: req.plant_id,
                quantity: req.quantity,
            })
            .await?;

        // Ordering a plant supersedes having it in the cart. Best effort:
        // the order already exists either way.
        if let Err(e) = self.db.delete_cart_item_by_plant(buyer_id, req.plant_id).await {
            tracing::warn!(order_id = %row.id, "failed to clear cart row after order: {}", e);
        }

        Self::row_to_order(row)
    }

    pub async fn list_for_buyer(&self, buyer_id: Uuid) -> Result<Vec<Order>, ApiError> {
        let rows = self.db.list_orders_for_buyer(buyer_id).await?;
        rows.into_iter().map(Self::row_to_order).collect()
    }

    pub async fn list_received(&self, nursery_id: Uuid) -> Result<Vec<Order>, ApiError> {
        let rows = self.db.list_orders_received(nursery_id).await?;
        rows.into_iter().map(Self::row_to_order).collect()
    }

    pub async fn update_status(
        &self,
        order_id: Uuid,
        nursery_id: Uuid,
        req: UpdateOrderStatusRequest,
    ) -> Result<Order, ApiError> {
        // The update itself refuses to touch terminal orders, so there is
        // no window for a concurrent request to resurrect one. A miss is
        // disambiguated by re-reading.
        if let Some(row) = self
            .db
            .update_order_status(order_id, nursery_id, &req.status.to_string())
            .await?
        {
            return Self::row_to_order(row);
        }

        let current = self
            .db
            .get_order_for_nursery(order_id, nursery_id)
            .await?
            .ok_or_else(|| ApiError::not_found(ORDER_MISSING))?;

        let current_status = parse_status(&current.status)?;
        if current_status.is_terminal() {
            Err(ApiError::validation(format!(
                "Order is already {current_status}."
            )))
        } else {
            Err(ApiError::not_found(ORDER_MISSING))
        }
    }

    fn row_to_order(row: OrderRow) -> Result<Order, ApiError> {
        Ok(Order {
            id: row.id,
            plant_id: row.plant_id,
            plant_name: row.plant_name,
            price: row.price,
            quantity: row.quantity,
            status: parse_status(&row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn parse_status(raw: &str) -> Result<OrderStatus, ApiError> {
    OrderStatus::from_str(raw).map_err(|e| ApiError::Internal(anyhow::Error::new(e)))
}
