pub mod admin;
pub mod booking;
pub mod customer;
pub mod notification;
pub mod provider;
pub mod review;
pub mod service;

pub use admin::{Admin, AdminSummary, NewAdmin};
pub use booking::{Booking, BookingStatus, NewBooking};
pub use customer::{Customer, CustomerSummary, NewCustomer};
pub use notification::{NewNotification, Notification, NotificationFilter, NotificationUpdate};
pub use provider::{GeoPoint, NewServiceProvider, ProviderSummary, ServiceProvider};
pub use review::{NewReview, Review, ReviewFilter};
pub use service::{NewService, Service, ServiceFilter};
