use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::types::SortOrder;
use super::manager::DatabaseError;
use super::models::{
    Admin, Booking, Customer, NewAdmin, NewBooking, NewCustomer, NewNotification, NewReview,
    NewService, NewServiceProvider, Notification, NotificationFilter, NotificationUpdate,
    Review, ReviewFilter, Service, ServiceFilter, ServiceProvider,
};
use super::store::Store;

#[derive(Default)]
struct Tables {
    customers: Vec<Customer>,
    providers: Vec<ServiceProvider>,
    services: Vec<Service>,
    bookings: Vec<Booking>,
    reviews: Vec<Review>,
    notifications: Vec<Notification>,
    admins: Vec<Admin>,
}

/// In-process store with the same constraints as the SQL schema
/// (unique emails, foreign keys). Rows are never deleted, so ids are
/// `len + 1`.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

trait Timestamped {
    fn sort_key(&self) -> (DateTime<Utc>, i32);
}

macro_rules! timestamped {
    ($($ty:ty),*) => {
        $(impl Timestamped for $ty {
            fn sort_key(&self) -> (DateTime<Utc>, i32) {
                (self.created_at, self.id)
            }
        })*
    };
}

timestamped!(Customer, ServiceProvider, Service, Booking, Review, Notification, Admin);

fn sorted<T: Timestamped>(mut rows: Vec<T>, order: SortOrder) -> Vec<T> {
    rows.sort_by_key(|r| r.sort_key());
    if order == SortOrder::Desc {
        rows.reverse();
    }
    rows
}

fn in_ids(ids: Option<&[i32]>, id: i32) -> bool {
    ids.map_or(true, |ids| ids.contains(&id))
}

fn next_id<T>(rows: &[T]) -> i32 {
    rows.len() as i32 + 1
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_customer(&self, data: NewCustomer) -> Result<Customer, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.customers.iter().any(|c| c.email == data.email) {
            return Err(DatabaseError::UniqueViolation(format!("customer email {}", data.email)));
        }
        let row = Customer {
            id: next_id(&tables.customers),
            name: data.name,
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            created_at: Utc::now(),
        };
        tables.customers.push(row.clone());
        Ok(row)
    }

    pub async fn insert_provider(&self, data: NewServiceProvider) -> Result<ServiceProvider, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.providers.iter().any(|p| p.email == data.email) {
            return Err(DatabaseError::UniqueViolation(format!("provider email {}", data.email)));
        }
        let row = ServiceProvider {
            id: next_id(&tables.providers),
            name: data.name,
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            service_type: data.service_type,
            phone: data.phone,
            address: data.address,
            latitude: data.latitude,
            longitude: data.longitude,
            created_at: Utc::now(),
        };
        tables.providers.push(row.clone());
        Ok(row)
    }

    pub async fn insert_service(&self, data: NewService) -> Result<Service, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.providers.iter().any(|p| p.id == data.provider_id) {
            return Err(DatabaseError::ForeignKey(format!("provider {}", data.provider_id)));
        }
        let row = Service {
            id: next_id(&tables.services),
            name: data.name,
            description: data.description,
            price: data.price,
            image_url: data.image_url,
            provider_id: data.provider_id,
            created_at: Utc::now(),
        };
        tables.services.push(row.clone());
        Ok(row)
    }

    pub async fn insert_booking(&self, data: NewBooking) -> Result<Booking, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.customers.iter().any(|c| c.id == data.customer_id) {
            return Err(DatabaseError::ForeignKey(format!("customer {}", data.customer_id)));
        }
        if !tables.services.iter().any(|s| s.id == data.service_id) {
            return Err(DatabaseError::ForeignKey(format!("service {}", data.service_id)));
        }
        let row = Booking {
            id: next_id(&tables.bookings),
            customer_id: data.customer_id,
            service_id: data.service_id,
            status: data.status,
            scheduled_date: data.scheduled_date,
            image_url: data.image_url,
            created_at: Utc::now(),
        };
        tables.bookings.push(row.clone());
        Ok(row)
    }

    /// The cited booking must belong to the same customer and service.
    pub async fn insert_review(&self, data: NewReview) -> Result<Review, DatabaseError> {
        let mut tables = self.tables.write().await;
        let booking = tables
            .bookings
            .iter()
            .find(|b| b.id == data.booking_id)
            .ok_or_else(|| DatabaseError::ForeignKey(format!("booking {}", data.booking_id)))?;
        if booking.customer_id != data.customer_id || booking.service_id != data.service_id {
            return Err(DatabaseError::ForeignKey(format!(
                "booking {} does not match customer {} / service {}",
                data.booking_id, data.customer_id, data.service_id
            )));
        }
        if tables.reviews.iter().any(|r| r.booking_id == data.booking_id) {
            return Err(DatabaseError::UniqueViolation(format!("review for booking {}", data.booking_id)));
        }
        let row = Review {
            id: next_id(&tables.reviews),
            customer_id: data.customer_id,
            service_id: data.service_id,
            booking_id: data.booking_id,
            rating: data.rating,
            content: data.content,
            created_at: Utc::now(),
        };
        tables.reviews.push(row.clone());
        Ok(row)
    }

    pub async fn insert_notification(&self, data: NewNotification) -> Result<Notification, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.providers.iter().any(|p| p.id == data.provider_id) {
            return Err(DatabaseError::ForeignKey(format!("provider {}", data.provider_id)));
        }
        let row = Notification {
            id: next_id(&tables.notifications),
            provider_id: data.provider_id,
            booking_id: data.booking_id,
            message: data.message,
            is_read: false,
            created_at: Utc::now(),
        };
        tables.notifications.push(row.clone());
        Ok(row)
    }

    pub async fn admins(&self) -> Vec<Admin> {
        self.tables.read().await.admins.clone()
    }

    pub async fn notifications(&self, filter: &NotificationFilter) -> Vec<Notification> {
        let tables = self.tables.read().await;
        tables
            .notifications
            .iter()
            .filter(|n| filter.matches(n))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn find_many_customers(&self, ids: Option<&[i32]>) -> Result<Vec<Customer>, DatabaseError> {
        let tables = self.tables.read().await;
        let rows = tables
            .customers
            .iter()
            .filter(|c| in_ids(ids, c.id))
            .cloned()
            .collect();
        Ok(sorted(rows, SortOrder::Asc))
    }

    async fn find_unique_customer(&self, email: &str) -> Result<Option<Customer>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.customers.iter().find(|c| c.email == email).cloned())
    }

    async fn find_many_providers(
        &self,
        ids: Option<&[i32]>,
        order: SortOrder,
    ) -> Result<Vec<ServiceProvider>, DatabaseError> {
        let tables = self.tables.read().await;
        let rows = tables
            .providers
            .iter()
            .filter(|p| in_ids(ids, p.id))
            .cloned()
            .collect();
        Ok(sorted(rows, order))
    }

    async fn find_unique_provider(&self, email: &str) -> Result<Option<ServiceProvider>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.providers.iter().find(|p| p.email == email).cloned())
    }

    async fn find_many_services(
        &self,
        filter: &ServiceFilter,
        order: SortOrder,
    ) -> Result<Vec<Service>, DatabaseError> {
        let tables = self.tables.read().await;
        let rows = tables
            .services
            .iter()
            .filter(|s| in_ids(filter.ids.as_deref(), s.id))
            .cloned()
            .collect();
        Ok(sorted(rows, order))
    }

    async fn find_many_bookings(
        &self,
        ids: Option<&[i32]>,
        order: SortOrder,
    ) -> Result<Vec<Booking>, DatabaseError> {
        let tables = self.tables.read().await;
        let rows = tables
            .bookings
            .iter()
            .filter(|b| in_ids(ids, b.id))
            .cloned()
            .collect();
        Ok(sorted(rows, order))
    }

    async fn find_many_reviews(
        &self,
        filter: &ReviewFilter,
        order: SortOrder,
    ) -> Result<Vec<Review>, DatabaseError> {
        let tables = self.tables.read().await;
        let rows = tables
            .reviews
            .iter()
            .filter(|r| in_ids(filter.service_ids.as_deref(), r.service_id))
            .cloned()
            .collect();
        Ok(sorted(rows, order))
    }

    async fn find_unique_admin(&self, email: &str) -> Result<Option<Admin>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.admins.iter().find(|a| a.email == email).cloned())
    }

    async fn create_admin(&self, data: NewAdmin) -> Result<Admin, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.admins.iter().any(|a| a.email == data.email) {
            return Err(DatabaseError::UniqueViolation(format!("admin email {}", data.email)));
        }
        let row = Admin {
            id: next_id(&tables.admins),
            email: data.email,
            username: data.username,
            name: data.name,
            password_hash: data.password_hash,
            created_at: Utc::now(),
        };
        tables.admins.push(row.clone());
        Ok(row)
    }

    async fn find_unique_notification(&self, id: i32) -> Result<Option<Notification>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.notifications.iter().find(|n| n.id == id).cloned())
    }

    async fn update_notification(
        &self,
        id: i32,
        data: &NotificationUpdate,
    ) -> Result<Notification, DatabaseError> {
        let mut tables = self.tables.write().await;
        let row = tables
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| DatabaseError::NotFound(format!("notification {}", id)))?;
        if let Some(flag) = data.is_read {
            row.is_read = flag;
        }
        Ok(row.clone())
    }

    async fn update_many_notifications(
        &self,
        filter: &NotificationFilter,
        data: &NotificationUpdate,
    ) -> Result<u64, DatabaseError> {
        let mut tables = self.tables.write().await;
        let mut count = 0;
        for row in tables.notifications.iter_mut().filter(|n| filter.matches(n)) {
            if let Some(flag) = data.is_read {
                row.is_read = flag;
            }
            count += 1;
        }
        Ok(count)
    }
}
