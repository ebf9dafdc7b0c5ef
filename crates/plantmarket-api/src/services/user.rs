// Account service: registration, credential issuance, profile CRUD
//
// Login keeps "unknown email" and "wrong password" as distinct failures;
// both deny access but they are different error kinds with different
// status codes.

use std::sync::Arc;
use uuid::Uuid;

use plantmarket_contracts::{
    Buyer, LoginData, LoginRequest, Nursery, Rating, RegisterBuyerRequest, RegisterNurseryRequest,
    Role, UpdateBuyerRequest, UpdateNurseryRequest,
};
use plantmarket_storage::{
    hash_password, verify_password, BuyerRow, CreateBuyer, CreateNursery, Database, NurseryRow,
    UpdateBuyer, UpdateNursery,
};

use crate::auth::TokenCodec;
use crate::error::ApiError;

pub struct UserService {
    db: Arc<Database>,
    codec: TokenCodec,
}

impl UserService {
    pub fn new(db: Arc<Database>, codec: TokenCodec) -> Self {
        Self { db, codec }
    }

    pub async fn register_buyer(&self, req: RegisterBuyerRequest) -> Result<(), ApiError> {
        let input = CreateBuyer {
            email: req.email,
            password_hash: hash_password(&req.password)?,
            first_name: req.first_name,
            middle_name: req.middle_name,
            last_name: req.last_name,
        };

        match self.db.create_buyer(input).await? {
            // Registration deliberately returns no account data
            Some(_) => Ok(()),
            None => Err(ApiError::conflict(
                "User(Buyer) with this email already exists.",
            )),
        }
    }

    pub async fn register_nursery(&self, req: RegisterNurseryRequest) -> Result<(), ApiError> {
        let input = CreateNursery {
            email: req.email,
            password_hash: hash_password(&req.password)?,
            name: req.name,
            about: req.about.unwrap_or_default(),
        };

        match self.db.create_nursery(input).await? {
            Some(_) => Ok(()),
            None => Err(ApiError::conflict(
                "User(Nursery) with this email already exists.",
            )),
        }
    }

    pub async fn login_buyer(&self, req: LoginRequest) -> Result<LoginData, ApiError> {
        let row = self
            .db
            .get_buyer_by_email(&req.email)
            .await?
            .ok_or_else(|| ApiError::not_found("User does not exist."))?;

        self.issue_token(row.id, Role::Buyer, &req.password, &row.password_hash)
    }

    pub async fn login_nursery(&self, req: LoginRequest) -> Result<LoginData, ApiError> {
        let row = self
            .db
            .get_nursery_by_email(&req.email)
            .await?
            .ok_or_else(|| ApiError::not_found("User does not exist."))?;

        self.issue_token(row.id, Role::Nursery, &req.password, &row.password_hash)
    }

    fn issue_token(
        &self,
        user_id: Uuid,
        role: Role,
        password: &str,
        password_hash: &str,
    ) -> Result<LoginData, ApiError> {
        if !verify_password(password, password_hash)? {
            return Err(ApiError::InvalidCredentials);
        }

        let jwt_token = self
            .codec
            .encode(user_id, role)
            .map_err(|e| ApiError::Internal(anyhow::Error::new(e)))?;

        Ok(LoginData { user_id, jwt_token })
    }

    pub async fn update_buyer(
        &self,
        id: Uuid,
        req: UpdateBuyerRequest,
    ) -> Result<Option<Buyer>, ApiError> {
        let input = UpdateBuyer {
            first_name: req.first_name,
            middle_name: req.middle_name,
            last_name: req.last_name,
        };
        let row = self.db.update_buyer(id, input).await?;
        Ok(row.map(Self::row_to_buyer))
    }

    pub async fn update_nursery(
        &self,
        id: Uuid,
        req: UpdateNurseryRequest,
    ) -> Result<Option<Nursery>, ApiError> {
        let input = UpdateNursery { about: req.about };
        let row = self.db.update_nursery(id, input).await?;
        Ok(row.map(Self::row_to_nursery))
    }

    pub async fn delete_buyer(&self, id: Uuid) -> Result<bool, ApiError> {
        Ok(self.db.soft_delete_buyer(id).await?)
    }

    pub async fn delete_nursery(&self, id: Uuid) -> Result<bool, ApiError> {
        Ok(self.db.soft_delete_nursery(id).await?)
    }

    pub fn row_to_buyer(row: BuyerRow) -> Buyer {
        Buyer {
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            middle_name: row.middle_name,
            last_name: row.last_name,
            created_at: row.created_at,
        }
    }

    pub fn row_to_nursery(row: NurseryRow) -> Nursery {
        Nursery {
            id: row.id,
            email: row.email,
            name: row.name,
            about: row.about,
            rating: Rating::from(row.rating.as_str()),
            created_at: row.created_at,
        }
    }
}
