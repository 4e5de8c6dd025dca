mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use servicehub_api::auth::UserType;
use servicehub_api::database::models::{NotificationFilter, NotificationUpdate};
use servicehub_api::database::Store;

use common::TestServer;

#[tokio::test]
async fn provider_marks_own_notification_read() -> Result<()> {
    let server = TestServer::start().await?;
    let seeded = server.seed_marketplace().await?;
    let id = server.notify(seeded.provider_id, "New booking request").await?;
    let token = server.token(seeded.provider_id, &seeded.provider_email, UserType::ServiceProvider);

    let res = server.patch_as(&format!("/api/notifications/{}", id), Some(&token)).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["id"], id);
    assert_eq!(body["isRead"], true);
    assert_eq!(body["providerId"], seeded.provider_id);
    Ok(())
}

#[tokio::test]
async fn foreign_notification_looks_missing_and_stays_unread() -> Result<()> {
    let server = TestServer::start().await?;
    let seeded = server.seed_marketplace().await?;
    let foreign = server.notify(seeded.other_provider_id, "Not yours").await?;
    let token = server.token(seeded.provider_id, &seeded.provider_email, UserType::ServiceProvider);

    let res = server.patch_as(&format!("/api/notifications/{}", foreign), Some(&token)).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({ "error": "Notification not found" }));

    // Same answer as an id that does not exist
    let res = server.patch_as("/api/notifications/9999", Some(&token)).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({ "error": "Notification not found" }));

    let unread = server
        .store
        .notifications(&NotificationFilter {
            provider_id: Some(seeded.other_provider_id),
            is_read: Some(false),
        })
        .await;
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].id, foreign);
    Ok(())
}

#[tokio::test]
async fn bad_notification_ids_are_400() -> Result<()> {
    let server = TestServer::start().await?;
    let seeded = server.seed_marketplace().await?;
    let token = server.token(seeded.provider_id, &seeded.provider_email, UserType::ServiceProvider);

    let res = server.patch_as("/api/notifications/abc", Some(&token)).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({ "error": "Invalid ID format" }));

    let res = server.patch_as("/api/notifications/", Some(&token)).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({ "error": "Missing ID parameter" }));
    Ok(())
}

#[tokio::test]
async fn notifications_require_provider_session() -> Result<()> {
    let server = TestServer::start().await?;
    let seeded = server.seed_marketplace().await?;
    let id = server.notify(seeded.provider_id, "New booking request").await?;
    let customer = server.token(seeded.customer_id, &seeded.customer_email, UserType::Customer);

    for token in [None, Some(customer.as_str())] {
        let res = server.patch_as(&format!("/api/notifications/{}", id), token).await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = server.patch_as("/api/notifications/mark-all-read", token).await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
    Ok(())
}

#[tokio::test]
async fn provider_without_row_gets_404() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.token(42, "nobody@example.com", UserType::ServiceProvider);

    let res = server.patch_as("/api/notifications/mark-all-read", Some(&token)).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({ "error": "Provider not found" }));
    Ok(())
}

#[tokio::test]
async fn mark_all_read_counts_only_own_unread() -> Result<()> {
    let server = TestServer::start().await?;
    let seeded = server.seed_marketplace().await?;

    // 3 unread and 2 already read for the caller, 1 unread for someone else
    let mut own = Vec::new();
    for n in 0..5 {
        own.push(server.notify(seeded.provider_id, &format!("Booking {}", n)).await?);
    }
    let read = NotificationUpdate { is_read: Some(true) };
    for id in &own[3..] {
        server.store.update_notification(*id, &read).await?;
    }
    server.notify(seeded.other_provider_id, "Someone else's").await?;
    let token = server.token(seeded.provider_id, &seeded.provider_email, UserType::ServiceProvider);

    let res = server.patch_as("/api/notifications/mark-all-read", Some(&token)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await?,
        json!({ "message": "All notifications marked as read", "count": 3 })
    );

    let caller = |is_read| NotificationFilter {
        provider_id: Some(seeded.provider_id),
        is_read,
    };
    assert!(server.store.notifications(&caller(Some(false))).await.is_empty());
    let all = server.store.notifications(&caller(None)).await;
    assert_eq!(all.len(), own.len());
    assert!(all.iter().all(|n| n.is_read));

    let res = server.patch_as("/api/notifications/mark-all-read", Some(&token)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["count"], 0);

    let untouched = server
        .store
        .notifications(&NotificationFilter {
            provider_id: Some(seeded.other_provider_id),
            is_read: Some(false),
        })
        .await;
    assert_eq!(untouched.len(), 1);
    Ok(())
}
