#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{Duration as Age, Utc};
use reqwest::{redirect, StatusCode};

use servicehub_api::auth::{password::hash_password, SessionKeys, UserType};
use servicehub_api::config::AppConfig;
use servicehub_api::database::models::{
    BookingStatus, NewBooking, NewCustomer, NewNotification, NewReview, NewService, NewServiceProvider,
};
use servicehub_api::database::MemoryStore;
use servicehub_api::{app, AppState};

pub const PASSWORD: &str = "correct-horse-battery";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub keys: SessionKeys,
    pub client: reqwest::Client,
}

/// Rows seeded by `seed_marketplace`
pub struct Marketplace {
    pub customer_id: i32,
    pub customer_email: String,
    pub provider_id: i32,
    pub provider_email: String,
    pub other_provider_id: i32,
    pub other_provider_email: String,
    pub service_id: i32,
    pub booking_ids: Vec<i32>,
    pub review_ids: Vec<i32>,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        Self::start_with(|_| {}).await
    }

    /// Serve the router in-process on an unused port, backed by a fresh
    /// memory store.
    pub async fn start_with(configure: impl FnOnce(&mut AppConfig)) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::for_tests();
        config.server.port = port;
        configure(&mut config);

        let store = Arc::new(MemoryStore::new());
        let keys = SessionKeys::new(&config.security)?;
        let state = AppState::new(store.clone(), config, keys.clone());

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        let client = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .build()?;

        let server = Self {
            port,
            base_url,
            store,
            keys,
            client,
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn token(&self, id: i32, email: &str, user_type: UserType) -> String {
        let claims = self.keys.claims(id, email, "Test User", user_type);
        self.keys.generate_jwt(&claims).expect("sign test token")
    }

    pub async fn get_as(&self, path: &str, token: Option<&str>) -> Result<reqwest::Response> {
        let mut req = self.client.get(self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Ok(req.send().await?)
    }

    pub async fn patch_as(&self, path: &str, token: Option<&str>) -> Result<reqwest::Response> {
        let mut req = self.client.patch(self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Ok(req.send().await?)
    }

    /// One customer, two providers, a service owned by the first provider,
    /// two completed bookings and a review on each.
    pub async fn seed_marketplace(&self) -> Result<Marketplace> {
        let password_hash = hash_password(PASSWORD)?;

        let customer = self
            .store
            .insert_customer(NewCustomer {
                name: "Casey Customer".into(),
                username: "casey".into(),
                email: "casey@example.com".into(),
                password_hash: password_hash.clone(),
            })
            .await?;

        let provider = self
            .store
            .insert_provider(new_provider("pat@example.com", "Pat Plumber", &password_hash))
            .await?;
        let other = self
            .store
            .insert_provider(new_provider("olly@example.com", "Olly Electric", &password_hash))
            .await?;

        let service = self
            .store
            .insert_service(NewService {
                name: "Leak repair".into(),
                description: "Fix dripping taps and pipes".into(),
                price: 80.0,
                image_url: None,
                provider_id: provider.id,
            })
            .await?;

        let mut booking_ids = Vec::new();
        let mut review_ids = Vec::new();
        for (rating, content) in [(4, "Solid work"), (5, "Came back and fixed it for good")] {
            let booking = self
                .store
                .insert_booking(NewBooking {
                    customer_id: customer.id,
                    service_id: service.id,
                    status: BookingStatus::Completed,
                    scheduled_date: Utc::now() - Age::days(2),
                    image_url: None,
                })
                .await?;
            let review = self
                .store
                .insert_review(NewReview {
                    customer_id: customer.id,
                    service_id: service.id,
                    booking_id: booking.id,
                    rating,
                    content: content.into(),
                })
                .await?;
            booking_ids.push(booking.id);
            review_ids.push(review.id);
        }

        Ok(Marketplace {
            customer_id: customer.id,
            customer_email: customer.email,
            provider_id: provider.id,
            provider_email: provider.email,
            other_provider_id: other.id,
            other_provider_email: other.email,
            service_id: service.id,
            booking_ids,
            review_ids,
        })
    }

    pub async fn notify(&self, provider_id: i32, message: &str) -> Result<i32> {
        let row = self
            .store
            .insert_notification(NewNotification {
                provider_id,
                booking_id: None,
                message: message.into(),
            })
            .await?;
        Ok(row.id)
    }
}

fn new_provider(email: &str, name: &str, password_hash: &str) -> NewServiceProvider {
    NewServiceProvider {
        name: name.into(),
        username: name.to_lowercase().replace(' ', "-"),
        email: email.into(),
        password_hash: password_hash.into(),
        service_type: "plumbing".into(),
        phone: "555-0100".into(),
        address: "1 Main St".into(),
        latitude: Some(51.5),
        longitude: Some(-0.12),
    }
}
