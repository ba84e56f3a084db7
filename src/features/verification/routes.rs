use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::verification::handlers;
use crate::features::verification::services::VerificationService;

/// Create routes for the reviewer queue
pub fn routes(service: Arc<VerificationService>) -> Router {
    Router::new()
        .route("/verification/checkouts", get(handlers::list_checkouts))
        .route(
            "/verification/checkouts/{id}",
            patch(handlers::update_checkout_status),
        )
        .route("/verification/items", get(handlers::list_items))
        .route("/verification/items/{id}", patch(handlers::update_item_status))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::VerificationConfig;
    use crate::core::database::create_test_pool;
    use crate::features::checkouts::services::CreatedCheckout;
    use crate::features::checkouts::CheckoutService;
    use crate::shared::test_helpers::{bulk_checkout, review_checkout};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::Utc;
    use serde_json::{json, Value};
    use sqlx::SqlitePool;

    async fn setup() -> (TestServer, CheckoutService) {
        let pool: SqlitePool = create_test_pool().await;
        let service = VerificationService::new(pool.clone(), VerificationConfig::default());
        let server = TestServer::new(routes(Arc::new(service))).unwrap();
        (server, CheckoutService::new(pool))
    }

    async fn review(checkouts: &CheckoutService, items: &[&str]) -> CreatedCheckout {
        checkouts
            .create(&review_checkout(Utc::now(), items))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_approve_moves_session_between_tabs() {
        let (server, checkouts) = setup().await;
        let created = review(&checkouts, &["Lamp", "Rug"]).await;

        let pending: Value = server
            .get("/verification/checkouts")
            .add_query_param("status", "pending")
            .await
            .json();
        assert_eq!(pending["meta"]["total"], json!(1));
        assert_eq!(pending["data"]["checkouts"][0]["id"], json!(created.checkout_id));
        assert_eq!(pending["data"]["stats"]["pending"], json!(1));

        let response = server
            .patch(&format!("/verification/checkouts/{}", created.checkout_id))
            .json(&json!({"status": "approved", "verifiedAt": "ignored"}))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["items_updated"], json!(2));
        assert_eq!(body["data"]["outcome"], json!("updated"));

        let approved: Value = server
            .get("/verification/checkouts")
            .add_query_param("status", "approved")
            .await
            .json();
        assert_eq!(approved["data"]["checkouts"][0]["status"], json!("approved"));
        assert_eq!(
            approved["data"]["stats"],
            json!({"pending": 0, "approved": 1, "flagged": 0})
        );
    }

    #[tokio::test]
    async fn test_session_update_errors_are_distinct() {
        let (server, checkouts) = setup().await;
        let empty = review(&checkouts, &[]).await;

        let no_items = server
            .patch(&format!("/verification/checkouts/{}", empty.checkout_id))
            .json(&json!({"status": "flagged"}))
            .await;
        no_items.assert_status_ok();
        let body: Value = no_items.json();
        assert_eq!(body["data"]["outcome"], json!("no_items"));
        assert_eq!(body["data"]["items_updated"], json!(0));

        server
            .patch("/verification/checkouts/999")
            .json(&json!({"status": "flagged"}))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let bad = server
            .patch(&format!("/verification/checkouts/{}", empty.checkout_id))
            .json(&json!({"status": "pending"}))
            .await;
        bad.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = bad.json();
        assert!(body["errors"][0].as_str().unwrap().starts_with("status: "));
    }

    #[tokio::test]
    async fn test_listing_rejects_bad_params() {
        let (server, _) = setup().await;

        server
            .get("/verification/checkouts")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .get("/verification/checkouts")
            .add_query_param("status", "done")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .get("/verification/items")
            .add_query_param("status", "pending")
            .add_query_param("limit", "0")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .get("/verification/checkouts")
            .add_query_param("status", "pending")
            .add_query_param("page", "abc")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_listing_bounds_window_and_far_pages() {
        let (server, checkouts) = setup().await;
        review(&checkouts, &["Lamp"]).await;

        let response = server
            .get("/verification/checkouts")
            .add_query_param("status", "approved")
            .add_query_param("windowDays", "1000000000000")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["errors"],
            json!(["windowDays: must be between 1 and 3650"])
        );

        let far: Value = server
            .get("/verification/checkouts")
            .add_query_param("status", "pending")
            .add_query_param("page", i64::MAX.to_string())
            .await
            .json();
        assert_eq!(far["data"]["checkouts"], json!([]));
        assert_eq!(far["meta"]["total"], json!(1));
    }

    #[tokio::test]
    async fn test_bulk_sessions_stay_out_of_queue() {
        let (server, checkouts) = setup().await;
        checkouts.create(&bulk_checkout(&["Lamp"])).await.unwrap();

        let body: Value = server
            .get("/verification/checkouts")
            .add_query_param("status", "pending")
            .add_query_param("lastMonthOnly", "false")
            .await
            .json();
        assert_eq!(body["meta"]["total"], json!(0));
        assert_eq!(body["data"]["checkouts"], json!([]));
    }

    #[tokio::test]
    async fn test_item_status_patch_and_item_queue() {
        let (server, checkouts) = setup().await;
        let created = review(&checkouts, &["Lamp", "Rug"]).await;

        let response = server
            .patch(&format!("/verification/items/{}", created.item_ids[1]))
            .json(&json!({"verification_status": "flagged", "verified_by": "desk-staff"}))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["verification_status"], json!("flagged"));
        assert_eq!(body["data"]["flagged"], json!(true));
        assert_eq!(body["data"]["verified_by"], json!("desk-staff"));

        let flagged: Value = server
            .get("/verification/items")
            .add_query_param("status", "flagged")
            .await
            .json();
        assert_eq!(flagged["meta"]["total"], json!(1));
        assert_eq!(flagged["data"]["items"][0]["id"], json!(created.item_ids[1]));
        assert_eq!(flagged["data"]["items"][0]["checkout_status"], json!("flagged"));
        assert_eq!(flagged["data"]["stats"]["flagged"], json!(1));

        server
            .patch(&format!("/verification/items/{}", created.item_ids[0]))
            .json(&json!({}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .patch("/verification/items/999")
            .json(&json!({"status": "approved"}))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
