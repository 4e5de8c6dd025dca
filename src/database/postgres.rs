use async_trait::async_trait;
use sqlx::PgPool;

use crate::types::SortOrder;
use super::manager::DatabaseError;
use super::models::{
    Admin, Booking, Customer, NewAdmin, Notification, NotificationFilter, NotificationUpdate,
    Review, ReviewFilter, Service, ServiceFilter, ServiceProvider,
};
use super::store::Store;

const CUSTOMER_COLUMNS: &str = "id, name, username, email, password_hash, created_at";
const PROVIDER_COLUMNS: &str = "id, name, username, email, password_hash, service_type, phone, address, latitude, longitude, created_at";
const SERVICE_COLUMNS: &str = "id, name, description, price, image_url, provider_id, created_at";
const BOOKING_COLUMNS: &str = "id, customer_id, service_id, status, scheduled_date, image_url, created_at";
const REVIEW_COLUMNS: &str = "id, customer_id, service_id, booking_id, rating, content, created_at";
const NOTIFICATION_COLUMNS: &str = "id, provider_id, booking_id, message, is_read, created_at";
const ADMIN_COLUMNS: &str = "id, email, username, name, password_hash, created_at";

/// Postgres-backed store over one shared pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn order_clause(order: SortOrder) -> String {
    format!("ORDER BY created_at {dir}, id {dir}", dir = order.sql())
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_many_customers(&self, ids: Option<&[i32]>) -> Result<Vec<Customer>, DatabaseError> {
        let sql = format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE ($1::int4[] IS NULL OR id = ANY($1)) {}",
            order_clause(SortOrder::Asc)
        );
        let rows = sqlx::query_as::<_, Customer>(&sql)
            .bind(ids.map(|s| s.to_vec()))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_unique_customer(&self, email: &str) -> Result<Option<Customer>, DatabaseError> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE email = $1");
        let row = sqlx::query_as::<_, Customer>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_many_providers(
        &self,
        ids: Option<&[i32]>,
        order: SortOrder,
    ) -> Result<Vec<ServiceProvider>, DatabaseError> {
        let sql = format!(
            "SELECT {PROVIDER_COLUMNS} FROM service_providers WHERE ($1::int4[] IS NULL OR id = ANY($1)) {}",
            order_clause(order)
        );
        let rows = sqlx::query_as::<_, ServiceProvider>(&sql)
            .bind(ids.map(|s| s.to_vec()))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_unique_provider(&self, email: &str) -> Result<Option<ServiceProvider>, DatabaseError> {
        let sql = format!("SELECT {PROVIDER_COLUMNS} FROM service_providers WHERE email = $1");
        let row = sqlx::query_as::<_, ServiceProvider>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_many_services(
        &self,
        filter: &ServiceFilter,
        order: SortOrder,
    ) -> Result<Vec<Service>, DatabaseError> {
        let sql = format!(
            "SELECT {SERVICE_COLUMNS} FROM services \
             WHERE ($1::int4[] IS NULL OR id = ANY($1)) {}",
            order_clause(order)
        );
        let rows = sqlx::query_as::<_, Service>(&sql)
            .bind(filter.ids.clone())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_many_bookings(
        &self,
        ids: Option<&[i32]>,
        order: SortOrder,
    ) -> Result<Vec<Booking>, DatabaseError> {
        let sql = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE ($1::int4[] IS NULL OR id = ANY($1)) {}",
            order_clause(order)
        );
        let rows = sqlx::query_as::<_, Booking>(&sql)
            .bind(ids.map(|s| s.to_vec()))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_many_reviews(
        &self,
        filter: &ReviewFilter,
        order: SortOrder,
    ) -> Result<Vec<Review>, DatabaseError> {
        let sql = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE ($1::int4[] IS NULL OR service_id = ANY($1)) {}",
            order_clause(order)
        );
        let rows = sqlx::query_as::<_, Review>(&sql)
            .bind(filter.service_ids.clone())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_unique_admin(&self, email: &str) -> Result<Option<Admin>, DatabaseError> {
        let sql = format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE email = $1");
        let row = sqlx::query_as::<_, Admin>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_admin(&self, data: NewAdmin) -> Result<Admin, DatabaseError> {
        let sql = format!(
            "INSERT INTO admins (email, username, name, password_hash) VALUES ($1, $2, $3, $4) RETURNING {ADMIN_COLUMNS}"
        );
        sqlx::query_as::<_, Admin>(&sql)
            .bind(&data.email)
            .bind(&data.username)
            .bind(&data.name)
            .bind(&data.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx(e, &format!("admin email {}", data.email)))
    }

    async fn find_unique_notification(&self, id: i32) -> Result<Option<Notification>, DatabaseError> {
        let sql = format!("SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = $1");
        let row = sqlx::query_as::<_, Notification>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_notification(
        &self,
        id: i32,
        data: &NotificationUpdate,
    ) -> Result<Notification, DatabaseError> {
        let sql = format!(
            "UPDATE notifications SET is_read = COALESCE($2, is_read) WHERE id = $1 RETURNING {NOTIFICATION_COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&sql)
            .bind(id)
            .bind(data.is_read)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("notification {}", id)))
    }

    async fn update_many_notifications(
        &self,
        filter: &NotificationFilter,
        data: &NotificationUpdate,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = COALESCE($3, is_read) \
             WHERE ($1::int4 IS NULL OR provider_id = $1) AND ($2::bool IS NULL OR is_read = $2)",
        )
        .bind(filter.provider_id)
        .bind(filter.is_read)
        .bind(data.is_read)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
