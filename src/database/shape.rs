//! Declarative eager-loading shapes and the nested records they produce.
//!
//! Handlers name a shape constant; `Repository` resolves it. Identity rows
//! are only ever projected through their `*Summary` types, so no shape can
//! expose a credential hash.

use serde::Serialize;

use crate::types::SortOrder;
use super::models::{Booking, CustomerSummary, ProviderSummary, Review, Service};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFields {
    Basic,
    WithLocation,
}

#[derive(Debug, Clone, Copy)]
pub struct ReviewsInclude {
    pub customer: bool,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy)]
pub struct ServiceShape {
    pub provider: Option<ProviderFields>,
    pub reviews: Option<ReviewsInclude>,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy)]
pub struct BookingShape {
    pub service: Option<ServiceShape>,
    pub customer: bool,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy)]
pub struct ReviewShape {
    pub service: Option<ServiceShape>,
    pub customer: bool,
    pub booking: bool,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceRecord {
    #[serde(flatten)]
    pub service: Service,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<ReviewRecord>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewRecord {
    #[serde(flatten)]
    pub review: Review,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingRecord {
    #[serde(flatten)]
    pub booking: Booking,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerSummary>,
}
