// Plant listing service
//
// All mutations are scoped by the owning nursery; a plant owned by another
// nursery is reported as missing rather than as forbidden.

use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use plantmarket_contracts::{CreatePlantRequest, Plant, UpdatePlantRequest};
use plantmarket_storage::{CreatePlant, Database, PlantRow, UpdatePlant};

use crate::error::ApiError;

const PLANT_MISSING: &str = "Plant does not exist.";

pub struct PlantService {
    db: Arc<Database>,
}

impl PlantService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn create(&self, owner_id: Uuid, req: CreatePlantRequest) -> Result<Plant, ApiError> {
        validate_price(req.price)?;

        let input = CreatePlant {
            owner_id,
            name: req.name,
            description: req.description,
            price: req.price,
            in_stock: req.in_stock,
        };
        let row = self.db.create_plant(input).await?;
        Ok(Self::row_to_plant(row))
    }

    pub async fn list_all(&self) -> Result<Vec<Plant>, ApiError> {
        let rows = self.db.list_plants().await?;
        Ok(rows.into_iter().map(Self::row_to_plant).collect())
    }

    pub async fn list_own(&self, owner_id: Uuid) -> Result<Vec<Plant>, ApiError> {
        let rows = self.db.list_plants_by_owner(owner_id).await?;
        Ok(rows.into_iter().map(Self::row_to_plant).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        req: UpdatePlantRequest,
    ) -> Result<Plant, ApiError> {
        if let Some(price) = req.price {
            validate_price(price)?;
        }

        let input = UpdatePlant {
            name: req.name,
            description: req.description,
            price: req.price,
            in_stock: req.in_stock,
        };
        let row = self
            .db
            .update_plant(id, owner_id, input)
            .await?
            .ok_or_else(|| ApiError::not_found(PLANT_MISSING))?;

        Ok(Self::row_to_plant(row))
    }

    pub async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<(), ApiError> {
        if self.db.soft_delete_plant(id, owner_id).await? {
            Ok(())
        } else {
            Err(ApiError::not_found(PLANT_MISSING))
        }
    }

    fn row_to_plant(row: PlantRow) -> Plant {
        Plant {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            description: row.description,
            price: row.price,
            in_stock: row.in_stock,
            created_at: row.created_at,
        }
    }
}

// Column is NUMERIC(5,2); reject out-of-range prices before the database does
fn validate_price(price: Decimal) -> Result<(), ApiError> {
    let max = Decimal::new(99999, 2); // 999.99
    if price <= Decimal::ZERO || price > max {
        return Err(ApiError::validation(
            "Price must be between 0.01 and 999.99.",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_bounds() {
        assert!(validate_price(Decimal::new(1, 2)).is_ok()); // 0.01
        assert!(validate_price(Decimal::new(99999, 2)).is_ok()); // 999.99
        assert!(validate_price(Decimal::ZERO).is_err());
        assert!(validate_price(Decimal::new(-500, 2)).is_err());
        assert!(validate_price(Decimal::new(100000, 2)).is_err()); // 1000.00
    }
}
