use std::collections::HashMap;

use crate::types::SortOrder;
use super::manager::DatabaseError;
use super::models::{
    Booking, CustomerSummary, ProviderSummary, Review, ReviewFilter, Service, ServiceFilter,
};
use super::shape::{
    BookingRecord, BookingShape, ProviderFields, ReviewRecord, ReviewShape, ReviewsInclude,
    ServiceRecord, ServiceShape,
};
use super::store::Store;

/// Resolves query shapes over a `Store`: one query for the root rows, then
/// one batched query per requested relation.
pub struct Repository<'a> {
    store: &'a dyn Store,
}

fn unique_ids<T>(rows: &[T], key: impl Fn(&T) -> i32) -> Vec<i32> {
    let mut ids: Vec<i32> = rows.iter().map(key).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

impl<'a> Repository<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    pub async fn providers(&self, fields: ProviderFields, order: SortOrder) -> Result<Vec<ProviderSummary>, DatabaseError> {
        let with_location = fields == ProviderFields::WithLocation;
        let rows = self.store.find_many_providers(None, order).await?;
        Ok(rows.iter().map(|p| ProviderSummary::project(p, with_location)).collect())
    }

    pub async fn services(&self, shape: &ServiceShape) -> Result<Vec<ServiceRecord>, DatabaseError> {
        let services = self
            .store
            .find_many_services(&ServiceFilter::default(), shape.order)
            .await?;
        self.attach_to_services(services, shape).await
    }

    pub async fn bookings(&self, shape: &BookingShape) -> Result<Vec<BookingRecord>, DatabaseError> {
        let bookings = self.store.find_many_bookings(None, shape.order).await?;

        let services = match &shape.service {
            Some(service_shape) => self.services_by_id(&bookings, |b| b.service_id, service_shape).await?,
            None => HashMap::new(),
        };
        let customers = if shape.customer {
            self.customers_by_id(&unique_ids(&bookings, |b| b.customer_id)).await?
        } else {
            HashMap::new()
        };

        Ok(bookings
            .into_iter()
            .map(|booking| BookingRecord {
                service: services.get(&booking.service_id).cloned(),
                customer: customers.get(&booking.customer_id).cloned(),
                booking,
            })
            .collect())
    }

    pub async fn reviews(&self, shape: &ReviewShape) -> Result<Vec<ReviewRecord>, DatabaseError> {
        let reviews = self
            .store
            .find_many_reviews(&ReviewFilter::default(), shape.order)
            .await?;

        let services = match &shape.service {
            Some(service_shape) => self.services_by_id(&reviews, |r| r.service_id, service_shape).await?,
            None => HashMap::new(),
        };
        let customers = if shape.customer {
            self.customers_by_id(&unique_ids(&reviews, |r| r.customer_id)).await?
        } else {
            HashMap::new()
        };
        let bookings: HashMap<i32, Booking> = if shape.booking {
            let ids = unique_ids(&reviews, |r| r.booking_id);
            self.store
                .find_many_bookings(Some(&ids), SortOrder::Asc)
                .await?
                .into_iter()
                .map(|b| (b.id, b))
                .collect()
        } else {
            HashMap::new()
        };

        Ok(reviews
            .into_iter()
            .map(|review| ReviewRecord {
                customer: customers.get(&review.customer_id).cloned(),
                service: services.get(&review.service_id).cloned(),
                booking: bookings.get(&review.booking_id).cloned(),
                review,
            })
            .collect())
    }

    async fn services_by_id<T>(
        &self,
        rows: &[T],
        key: impl Fn(&T) -> i32,
        shape: &ServiceShape,
    ) -> Result<HashMap<i32, ServiceRecord>, DatabaseError> {
        let filter = ServiceFilter {
            ids: Some(unique_ids(rows, key)),
        };
        let services = self.store.find_many_services(&filter, shape.order).await?;
        let records = self.attach_to_services(services, shape).await?;
        Ok(records.into_iter().map(|r| (r.service.id, r)).collect())
    }

    async fn attach_to_services(
        &self,
        services: Vec<Service>,
        shape: &ServiceShape,
    ) -> Result<Vec<ServiceRecord>, DatabaseError> {
        let providers: HashMap<i32, ProviderSummary> = match shape.provider {
            Some(fields) => {
                let with_location = fields == ProviderFields::WithLocation;
                let ids = unique_ids(&services, |s| s.provider_id);
                self.store
                    .find_many_providers(Some(&ids), SortOrder::Asc)
                    .await?
                    .iter()
                    .map(|p| (p.id, ProviderSummary::project(p, with_location)))
                    .collect()
            }
            None => HashMap::new(),
        };

        let mut reviews = match &shape.reviews {
            Some(include) => self.reviews_by_service(&services, include).await?,
            None => HashMap::new(),
        };

        Ok(services
            .into_iter()
            .map(|service| ServiceRecord {
                provider: providers.get(&service.provider_id).cloned(),
                reviews: shape
                    .reviews
                    .map(|_| reviews.remove(&service.id).unwrap_or_default()),
                service,
            })
            .collect())
    }

    async fn reviews_by_service(
        &self,
        services: &[Service],
        include: &ReviewsInclude,
    ) -> Result<HashMap<i32, Vec<ReviewRecord>>, DatabaseError> {
        let filter = ReviewFilter {
            service_ids: Some(unique_ids(services, |s| s.id)),
        };
        let reviews: Vec<Review> = self.store.find_many_reviews(&filter, include.order).await?;

        let customers = if include.customer {
            self.customers_by_id(&unique_ids(&reviews, |r| r.customer_id)).await?
        } else {
            HashMap::new()
        };

        // Pushing in query order keeps each group ordered.
        let mut grouped: HashMap<i32, Vec<ReviewRecord>> = HashMap::new();
        for review in reviews {
            grouped.entry(review.service_id).or_default().push(ReviewRecord {
                customer: customers.get(&review.customer_id).cloned(),
                service: None,
                booking: None,
                review,
            });
        }
        Ok(grouped)
    }

    async fn customers_by_id(&self, ids: &[i32]) -> Result<HashMap<i32, CustomerSummary>, DatabaseError> {
        let customers = self.store.find_many_customers(Some(ids)).await?;
        Ok(customers
            .iter()
            .map(|c| (c.id, CustomerSummary::from(c)))
            .collect())
    }
}
