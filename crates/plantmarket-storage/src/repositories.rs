// Repository layer for database operations
//
// One buyer/nursery lookup never falls through to the other table: the two
// account populations are disjoint and every query names exactly one of them.

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::*;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    /// Apply embedded migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // ============================================
    // Buyers
    // ============================================

    /// Insert a buyer. Returns `None` when the email is already taken;
    /// the unique constraint is the only duplicate check, so two concurrent
    /// registrations cannot both succeed.
    pub async fn create_buyer(&self, input: CreateBuyer) -> Result<Option<BuyerRow>> {
        let row = sqlx::query_as::<_, BuyerRow>(
            r#"
            INSERT INTO buyers (email, password_hash, first_name, middle_name, last_name)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, password_hash, first_name, middle_name, last_name, is_deleted, created_at
            "#,
        )
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(&input.first_name)
        .bind(&input.middle_name)
        .bind(&input.last_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_buyer(&self, id: Uuid) -> Result<Option<BuyerRow>> {
        let row = sqlx::query_as::<_, BuyerRow>(
            r#"
            SELECT id, email, password_hash, first_name, middle_name, last_name, is_deleted, created_at
            FROM buyers
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_buyer_by_email(&self, email: &str) -> Result<Option<BuyerRow>> {
        let row = sqlx::query_as::<_, BuyerRow>(
            r#"
            SELECT id, email, password_hash, first_name, middle_name, last_name, is_deleted, created_at
            FROM buyers
            WHERE email = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update_buyer(&self, id: Uuid, input: UpdateBuyer) -> Result<Option<BuyerRow>> {
        let row = sqlx::query_as::<_, BuyerRow>(
            r#"
            UPDATE buyers
            SET
                first_name = COALESCE($2, first_name),
                middle_name = COALESCE($3, middle_name),
                last_name = COALESCE($4, last_name)
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING id, email, password_hash, first_name, middle_name, last_name, is_deleted, created_at
            "#,
        )
        .bind(id)
        .bind(&input.first_name)
        .bind(&input.middle_name)
        .bind(&input.last_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn soft_delete_buyer(&self, id: Uuid) -> Result<bool> {
        // Rows are kept for bookkeeping; the flag hides the account everywhere
        let result = sqlx::query(
            r#"
            UPDATE buyers
            SET is_deleted = TRUE
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // ============================================
    // Nurseries
    // ============================================

    /// Insert a nursery. Returns `None` when the email is already taken.
    pub async fn create_nursery(&self, input: CreateNursery) -> Result<Option<NurseryRow>> {
        let row = sqlx::query_as::<_, NurseryRow>(
            r#"
            INSERT INTO nurseries (email, password_hash, name, about)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, password_hash, name, about, rating, is_deleted, created_at
            "#,
        )
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(&input.name)
        .bind(&input.about)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_nursery(&self, id: Uuid) -> Result<Option<NurseryRow>> {
        let row = sqlx::query_as::<_, NurseryRow>(
            r#"
            SELECT id, email, password_hash, name, about, rating, is_deleted, created_at
            FROM nurseries
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_nursery_by_email(&self, email: &str) -> Result<Option<NurseryRow>> {
        let row = sqlx::query_as::<_, NurseryRow>(
            r#"
            SELECT id, email, password_hash, name, about, rating, is_deleted, created_at
            FROM nurseries
            WHERE email = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update_nursery(
        &self,
        id: Uuid,
        input: UpdateNursery,
    ) -> Result<Option<NurseryRow>> {
        let row = sqlx::query_as::<_, NurseryRow>(
            r#"
            UPDATE nurseries
            SET about = COALESCE($2, about)
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING id, email, password_hash, name, about, rating, is_deleted, created_at
            "#,
        )
        .bind(id)
        .bind(&input.about)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn soft_delete_nursery(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE nurseries
            SET is_deleted = TRUE
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // ============================================
    // Plants
    // ============================================

    pub async fn create_plant(&self, input: CreatePlant) -> Result<PlantRow> {
        let row = sqlx::query_as::<_, PlantRow>(
            r#"
            INSERT INTO plants (owner_id, name, description, price, in_stock)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, name, description, price, in_stock, is_deleted, created_at
            "#,
        )
        .bind(input.owner_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.in_stock)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_plant(&self, id: Uuid) -> Result<Option<PlantRow>> {
        let row = sqlx::query_as::<_, PlantRow>(
            r#"
            SELECT id, owner_id, name, description, price, in_stock, is_deleted, created_at
            FROM plants
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_plants(&self) -> Result<Vec<PlantRow>> {
        let rows = sqlx::query_as::<_, PlantRow>(
            r#"
            SELECT id, owner_id, name, description, price, in_stock, is_deleted, created_at
            FROM plants
            WHERE is_deleted = FALSE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn list_plants_by_owner(&self, owner_id: Uuid) -> Result<Vec<PlantRow>> {
        let rows = sqlx::query_as::<_, PlantRow>(
            r#"
            SELECT id, owner_id, name, description, price, in_stock, is_deleted, created_at
            FROM plants
            WHERE owner_id = $1 AND is_deleted = FALSE
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Partial update scoped to the owning nursery. A plant that exists but
    /// belongs to someone else updates nothing, indistinguishable from
    /// a missing plant.
    pub async fn update_plant(
        &self,
        id: Uuid,
        owner_id: Uuid,
        input: UpdatePlant,
    ) -> Result<Option<PlantRow>> {
        let row = sqlx::query_as::<_, PlantRow>(
            r#"
            UPDATE plants
            SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                in_stock = COALESCE($6, in_stock)
            WHERE id = $1 AND owner_id = $2 AND is_deleted = FALSE
            RETURNING id, owner_id, name, description, price, in_stock, is_deleted, created_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.in_stock)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn soft_delete_plant(&self, id: Uuid, owner_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE plants
            SET is_deleted = TRUE
            WHERE id = $1 AND owner_id = $2 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // ============================================
    // Cart
    // ============================================

    /// Atomic create-or-replace keyed on (buyer, plant). Two identical
    /// concurrent requests land on the same row thanks to the unique
    /// constraint; there is no read-then-write window.
    pub async fn upsert_cart_item(&self, input: UpsertCartItem) -> Result<CartItemRow> {
        let row = sqlx::query_as::<_, CartItemRow>(
            r#"
            WITH upserted AS (
                INSERT INTO cart_items (buyer_id, plant_id, quantity)
                VALUES ($1, $2, $3)
                ON CONFLICT (buyer_id, plant_id)
                DO UPDATE SET quantity = EXCLUDED.quantity, updated_at = NOW()
                RETURNING id, buyer_id, plant_id, quantity, created_at, updated_at
            )
            SELECT u.id, u.buyer_id, u.plant_id, p.name AS plant_name, p.price, p.in_stock,
                   u.quantity, u.created_at, u.updated_at
            FROM upserted u
            JOIN plants p ON p.id = u.plant_id
            "#,
        )
        .bind(input.buyer_id)
        .bind(input.plant_id)
        .bind(input.quantity)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_cart_items(&self, buyer_id: Uuid) -> Result<Vec<CartItemRow>> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            r#"
            SELECT c.id, c.buyer_id, c.plant_id, p.name AS plant_name, p.price, p.in_stock,
                   c.quantity, c.created_at, c.updated_at
            FROM cart_items c
            JOIN plants p ON p.id = c.plant_id
            WHERE c.buyer_id = $1 AND p.is_deleted = FALSE
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(buyer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn delete_cart_item(&self, id: Uuid, buyer_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND buyer_id = $2")
            .bind(id)
            .bind(buyer_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Drop the cart row for a plant after the buyer orders it.
    pub async fn delete_cart_item_by_plant(&self, buyer_id: Uuid, plant_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cart_items WHERE buyer_id = $1 AND plant_id = $2")
            .bind(buyer_id)
            .bind(plant_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ============================================
    // Orders
    // ============================================

    pub async fn create_order(&self, input: CreateOrder) -> Result<OrderRow> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            WITH placed AS (
                INSERT INTO orders (buyer_id, plant_id, quantity)
                VALUES ($1, $2, $3)
                RETURNING id, buyer_id, plant_id, quantity, status, created_at, updated_at
            )
            SELECT o.id, o.buyer_id, o.plant_id, p.name AS plant_name, p.price,
                   o.quantity, o.status, o.created_at, o.updated_at
            FROM placed o
            JOIN plants p ON p.id = o.plant_id
            "#,
        )
        .bind(input.buyer_id)
        .bind(input.plant_id)
        .bind(input.quantity)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_orders_for_buyer(&self, buyer_id: Uuid) -> Result<Vec<OrderRow>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT o.id, o.buyer_id, o.plant_id, p.name AS plant_name, p.price,
                   o.quantity, o.status, o.created_at, o.updated_at
            FROM orders o
            JOIN plants p ON p.id = o.plant_id
            WHERE o.buyer_id = $1
            ORDER BY o.created_at DESC
            "#,
        )
        .bind(buyer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Orders placed against the nursery's own listings.
    pub async fn list_orders_received(&self, nursery_id: Uuid) -> Result<Vec<OrderRow>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT o.id, o.buyer_id, o.plant_id, p.name AS plant_name, p.price,
                   o.quantity, o.status, o.created_at, o.updated_at
            FROM orders o
            JOIN plants p ON p.id = o.plant_id
            WHERE p.owner_id = $1
            ORDER BY o.created_at DESC
            "#,
        )
        .bind(nursery_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Fetch an order only if its plant belongs to the given nursery.
    pub async fn get_order_for_nursery(
        &self,
        order_id: Uuid,
        nursery_id: Uuid,
    ) -> Result<Option<OrderRow>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT o.id, o.buyer_id, o.plant_id, p.name AS plant_name, p.price,
                   o.quantity, o.status, o.created_at, o.updated_at
            FROM orders o
            JOIN plants p ON p.id = o.plant_id
            WHERE o.id = $1 AND p.owner_id = $2
            "#,
        )
        .bind(order_id)
        .bind(nursery_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Status update scoped to the nursery owning the plant. The terminal
    /// guard lives in the WHERE clause so a concurrent update that lands
    /// `delivered` or `cancelled` first can never be overwritten; callers
    /// re-read on a miss to tell "terminal" from "not found".
    pub async fn update_order_status(
        &self,
        order_id: Uuid,
        nursery_id: Uuid,
        status: &str,
    ) -> Result<Option<OrderRow>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            UPDATE orders o
            SET status = $3, updated_at = NOW()
            FROM plants p
            WHERE o.id = $1 AND p.id = o.plant_id AND p.owner_id = $2
              AND o.status NOT IN ('delivered', 'cancelled')
            RETURNING o.id, o.buyer_id, o.plant_id, p.name AS plant_name, p.price,
                      o.quantity, o.status, o.created_at, o.updated_at
            "#,
        )
        .bind(order_id)
        .bind(nursery_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
