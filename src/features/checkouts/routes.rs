use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::checkouts::handlers;
use crate::features::checkouts::services::CheckoutService;

/// Create routes for the checkouts feature
pub fn routes(service: Arc<CheckoutService>) -> Router {
    Router::new()
        .route("/api/checkouts", post(handlers::create_checkout))
        .route(
            "/api/checkouts/{id}",
            get(handlers::get_checkout).patch(handlers::update_checkout_contact),
        )
        .route("/api/items/{id}", patch(handlers::update_item_content))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::create_test_pool;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    async fn server() -> TestServer {
        let pool = create_test_pool().await;
        TestServer::new(routes(Arc::new(CheckoutService::new(pool)))).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_fetch_checkout() {
        let server = server().await;

        let created = server
            .post("/api/checkouts")
            .json(&json!({
                "year_range": "2024-2025",
                "owner_name": "Robin",
                "email": "robin@example.edu",
                "items": [
                    {"item_name": "Desk lamp"},
                    {"item_name": "Hangers", "item_quantity": 12}
                ]
            }))
            .await;
        created.assert_status(StatusCode::CREATED);

        let body: Value = created.json();
        let id = body["data"]["id"].as_i64().unwrap();
        assert_eq!(body["data"]["needs_approval"], json!(false));
        assert_eq!(body["data"]["status"], json!("pending"));
        assert_eq!(body["data"]["total_items"], json!(2));
        assert_eq!(body["data"]["items"][0]["item_quantity"], json!(1));
        assert_eq!(body["data"]["items"][1]["item_quantity"], json!(12));

        let fetched = server.get(&format!("/api/checkouts/{}", id)).await;
        fetched.assert_status_ok();
        let body: Value = fetched.json();
        assert_eq!(body["data"]["owner_name"], json!("Robin"));
    }

    #[tokio::test]
    async fn test_create_checkout_reports_field_errors() {
        let server = server().await;

        let response = server
            .post("/api/checkouts")
            .json(&json!({
                "year_range": "2024",
                "owner_name": "",
                "email": "robin@example.edu"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));
        assert_eq!(
            body["errors"],
            json!([
                "owner_name: must not be empty",
                "year_range: must look like 2025-2026"
            ])
        );
    }

    #[tokio::test]
    async fn test_unknown_checkout_is_404() {
        let server = server().await;
        server
            .get("/api/checkouts/77")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .patch("/api/checkouts/77")
            .json(&json!({"notes": "moved out"}))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_item_quantity_must_be_positive() {
        let server = server().await;
        server
            .patch("/api/items/1")
            .json(&json!({"item_quantity": 0}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
