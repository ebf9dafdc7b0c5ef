// Plant listing DTOs
//
// A plant is owned by exactly one nursery. Stock is a boolean flag, not a
// counted resource.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Plant {
    pub id: Uuid,
    /// Owning nursery.
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
}

/// Request to create a listing. Owner comes from the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePlantRequest {
    pub name: String,
    pub description: String,
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

/// Partial listing update. Ownership is not reassignable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePlantRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults_in_stock() {
        let req: CreatePlantRequest = serde_json::from_str(
            r#"{"name": "Monstera", "description": "Large leaves", "price": "24.99"}"#,
        )
        .unwrap();
        assert!(req.in_stock);
        assert_eq!(req.price.to_string(), "24.99");
    }

    #[test]
    fn test_update_request_all_fields_optional() {
        let req: UpdatePlantRequest = serde_json::from_str("{}").unwrap();
        assert!(req.name.is_none());
        assert!(req.price.is_none());
        assert!(req.in_stock.is_none());
    }
}
