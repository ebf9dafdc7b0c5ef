// Cart DTOs
//
// A buyer holds at most one cart row per plant; posting the same plant
// again replaces the quantity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Cart row joined with the listing it points at.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub id: Uuid,
    pub plant_id: Uuid,
    pub plant_name: String,
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub in_stock: bool,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to add a plant to the cart or replace its quantity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpsertCartRequest {
    pub plant_id: Uuid,
    pub quantity: i32,
}
