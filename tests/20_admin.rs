mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use servicehub_api::auth::UserType;

use common::TestServer;

const ADMIN_LISTINGS: [&str; 4] = [
    "/api/admin/bookings",
    "/api/admin/providers",
    "/api/admin/reviews",
    "/api/admin/services",
];

#[tokio::test]
async fn admin_listings_require_a_session() -> Result<()> {
    let server = TestServer::start().await?;

    for path in ADMIN_LISTINGS {
        let res = server.get_as(path, None).await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{}", path);
        assert_eq!(res.json::<Value>().await?, json!({ "error": "Unauthorized" }));
    }
    Ok(())
}

#[tokio::test]
async fn admin_listings_reject_other_roles_identically() -> Result<()> {
    let server = TestServer::start().await?;
    let customer = server.token(1, "casey@example.com", UserType::Customer);
    let provider = server.token(1, "pat@example.com", UserType::ServiceProvider);

    for path in ADMIN_LISTINGS {
        for token in [&customer, &provider] {
            let res = server.get_as(path, Some(token)).await?;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{}", path);
            assert_eq!(res.json::<Value>().await?, json!({ "error": "Unauthorized" }));
        }
    }
    Ok(())
}

#[tokio::test]
async fn admin_bookings_include_service_provider_and_customer() -> Result<()> {
    let server = TestServer::start().await?;
    let seeded = server.seed_marketplace().await?;
    let admin = server.token(1, "admin@servicehub.local", UserType::Admin);

    let res = server.get_as("/api/admin/bookings", Some(&admin)).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let text = res.text().await?;
    assert!(!text.to_lowercase().contains("password"));

    let bookings: Vec<Value> = serde_json::from_str(&text)?;
    assert_eq!(bookings.len(), seeded.booking_ids.len());
    // Newest first
    assert_eq!(bookings[0]["id"], seeded.booking_ids[1]);
    assert_eq!(bookings[0]["status"], "completed");
    assert_eq!(bookings[0]["customer"]["id"], seeded.customer_id);
    assert_eq!(bookings[0]["service"]["id"], seeded.service_id);
    assert_eq!(bookings[0]["service"]["provider"]["id"], seeded.provider_id);
    Ok(())
}

#[tokio::test]
async fn admin_reviews_and_services_never_carry_credentials() -> Result<()> {
    let server = TestServer::start().await?;
    let seeded = server.seed_marketplace().await?;
    let admin = server.token(1, "admin@servicehub.local", UserType::Admin);

    let res = server.get_as("/api/admin/reviews", Some(&admin)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let text = res.text().await?;
    assert!(!text.to_lowercase().contains("password"));
    let reviews: Vec<Value> = serde_json::from_str(&text)?;
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0]["id"], seeded.review_ids[1]);
    assert_eq!(reviews[0]["booking"]["id"], seeded.booking_ids[1]);
    assert_eq!(reviews[0]["service"]["provider"]["email"], seeded.provider_email.as_str());

    let res = server.get_as("/api/admin/services", Some(&admin)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let text = res.text().await?;
    assert!(!text.to_lowercase().contains("password"));

    let res = server.get_as("/api/admin/providers", Some(&admin)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let providers: Vec<Value> = res.json().await?;
    assert_eq!(providers.len(), 2);
    assert!(providers.iter().all(|p| p.get("passwordHash").is_none()));
    Ok(())
}

#[tokio::test]
async fn build_phase_short_circuits_admin_bookings() -> Result<()> {
    let server = TestServer::start_with(|config| config.build_phase = true).await?;
    server.seed_marketplace().await?;

    // No session at all, still an empty list
    let res = server.get_as("/api/admin/bookings", None).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([]));

    // Other listings keep their guard
    let res = server.get_as("/api/admin/services", None).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn admin_setup_is_idempotent() -> Result<()> {
    let server = TestServer::start().await?;

    let first = server.client.post(server.url("/api/admin/setup")).send().await?;
    assert_eq!(first.status(), StatusCode::OK);
    let created = first.json::<Value>().await?;
    assert_eq!(created["email"], "admin@servicehub.local");
    assert!(created.get("passwordHash").is_none());

    let second = server.client.post(server.url("/api/admin/setup")).send().await?;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert_eq!(second.json::<Value>().await?, json!({ "error": "Admin user already exists" }));

    assert_eq!(server.store.admins().await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn concurrent_admin_setup_creates_one_row() -> Result<()> {
    let server = TestServer::start().await?;

    let mut handles = Vec::new();
    for _ in 0..4 {
        let client = server.client.clone();
        let url = server.url("/api/admin/setup");
        handles.push(tokio::spawn(async move { client.post(url).send().await }));
    }

    let mut created = 0;
    for handle in handles {
        let res = handle.await??;
        match res.status() {
            StatusCode::OK => created += 1,
            StatusCode::BAD_REQUEST => {}
            other => panic!("unexpected status {}", other),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(server.store.admins().await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn bootstrapped_admin_can_sign_in() -> Result<()> {
    let server = TestServer::start().await?;
    server.client.post(server.url("/api/admin/setup")).send().await?;

    let res = server
        .client
        .post(server.url("/api/auth/login"))
        .json(&json!({ "email": "admin@servicehub.local", "password": "admin123", "userType": "admin" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let token = res.json::<Value>().await?["token"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    let listing = server.get_as("/api/admin/providers", Some(&token)).await?;
    assert_eq!(listing.status(), StatusCode::OK);
    Ok(())
}
