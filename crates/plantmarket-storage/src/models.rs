// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Account models
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct BuyerRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct NurseryRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub about: String,
    pub rating: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateBuyer {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateNursery {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub about: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBuyer {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateNursery {
    pub about: Option<String>,
}

// ============================================
// Plant models
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct PlantRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub in_stock: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreatePlant {
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub in_stock: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePlant {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub in_stock: Option<bool>,
}

// ============================================
// Cart models
// ============================================

/// Cart row joined with its listing for display.
#[derive(Debug, Clone, FromRow)]
pub struct CartItemRow {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub plant_id: Uuid,
    pub plant_name: String,
    pub price: Decimal,
    pub in_stock: bool,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UpsertCartItem {
    pub buyer_id: Uuid,
    pub plant_id: Uuid,
    pub quantity: i32,
}

// ============================================
// Order models
// ============================================

/// Order row joined with its listing for display.
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub plant_id: Uuid,
    pub plant_name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub buyer_id: Uuid,
    pub plant_id: Uuid,
    pub quantity: i32,
}
