// Cart service
//
// The add/replace path is a single upsert keyed on (buyer, plant); the
// storage layer's unique constraint makes concurrent identical requests
// converge on one row.

use std::sync::Arc;
use uuid::Uuid;

use plantmarket_contracts::{CartItem, UpsertCartRequest};
use plantmarket_storage::{CartItemRow, Database, UpsertCartItem};

use crate::error::ApiError;

pub struct CartService {
    db: Arc<Database>,
}

impl CartService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn upsert(
        &self,
        buyer_id: Uuid,
        req: UpsertCartRequest,
    ) -> Result<CartItem, ApiError> {
        if req.quantity < 1 {
            return Err(ApiError::validation("Quantity must be at least 1."));
        }

        // Reject unknown and soft-deleted plants up front; the FK alone
        // would let a deleted listing into the cart
        self.db
            .get_plant(req.plant_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Plant does not exist."))?;

        let row = self
            .db
            .upsert_cart_item(UpsertCartItem {
                buyer_id,
                plant_id: req.plant_id,
                quantity: req.quantity,
            })
            .await?;

        Ok(Self::row_to_item(row))
    }

    pub async fn list(&self, buyer_id: Uuid) -> Result<Vec<CartItem>, ApiError> {
        let rows = self.db.list_cart_items(buyer_id).await?;
        Ok(rows.into_iter().map(Self::row_to_item).collect())
    }

    pub async fn remove(&self, cart_id: Uuid, buyer_id: Uuid) -> Result<(), ApiError> {
        if self.db.delete_cart_item(cart_id, buyer_id).await? {
            Ok(())
        } else {
            Err(ApiError::not_found("Cart item does not exist."))
        }
    }

    fn row_to_item(row: CartItemRow) -> CartItem {
        CartItem {
            id: row.id,
            plant_id: row.plant_id,
            plant_name: row.plant_name,
            price: row.price,
            in_stock: row.in_stock,
            quantity: row.quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
