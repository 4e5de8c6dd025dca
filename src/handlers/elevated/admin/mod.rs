// Read-only oversight listings for the admin console.

pub mod bookings;
pub mod providers;
pub mod reviews;
pub mod services;

pub use bookings::list as bookings_list;
pub use providers::list as providers_list;
pub use reviews::list as reviews_list;
pub use services::list as services_list;
