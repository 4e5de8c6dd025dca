use async_trait::async_trait;

use crate::types::SortOrder;
use super::manager::DatabaseError;
use super::models::{
    Admin, Booking, Customer, NewAdmin, Notification, NotificationFilter, NotificationUpdate,
    Review, ReviewFilter, Service, ServiceFilter, ServiceProvider,
};

/// Typed operations over the marketplace tables.
///
/// Every method is a single statement; callers get no multi-statement
/// transaction. `ids: None` means "no id restriction".
#[async_trait]
pub trait Store: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;

    async fn find_many_customers(&self, ids: Option<&[i32]>) -> Result<Vec<Customer>, DatabaseError>;
    async fn find_unique_customer(&self, email: &str) -> Result<Option<Customer>, DatabaseError>;

    async fn find_many_providers(
        &self,
        ids: Option<&[i32]>,
        order: SortOrder,
    ) -> Result<Vec<ServiceProvider>, DatabaseError>;
    async fn find_unique_provider(&self, email: &str) -> Result<Option<ServiceProvider>, DatabaseError>;

    async fn find_many_services(
        &self,
        filter: &ServiceFilter,
        order: SortOrder,
    ) -> Result<Vec<Service>, DatabaseError>;

    async fn find_many_bookings(
        &self,
        ids: Option<&[i32]>,
        order: SortOrder,
    ) -> Result<Vec<Booking>, DatabaseError>;

    async fn find_many_reviews(
        &self,
        filter: &ReviewFilter,
        order: SortOrder,
    ) -> Result<Vec<Review>, DatabaseError>;

    async fn find_unique_admin(&self, email: &str) -> Result<Option<Admin>, DatabaseError>;
    async fn create_admin(&self, data: NewAdmin) -> Result<Admin, DatabaseError>;

    async fn find_unique_notification(&self, id: i32) -> Result<Option<Notification>, DatabaseError>;
    /// Fails with `NotFound` when no row has this id.
    async fn update_notification(
        &self,
        id: i32,
        data: &NotificationUpdate,
    ) -> Result<Notification, DatabaseError>;
    /// Returns the number of rows changed.
    async fn update_many_notifications(
        &self,
        filter: &NotificationFilter,
        data: &NotificationUpdate,
    ) -> Result<u64, DatabaseError>;
}
