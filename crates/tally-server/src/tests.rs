//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use tower::ServiceExt;

use tally_core::{Budget, Category, Transaction};

fn tx(id: i64, date: &str, category: Category, amount: f64) -> Transaction {
    let timestamp = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    Transaction {
        id,
        timestamp,
        text: format!("tx {}", id),
        category,
        amount,
        confidence: Some(0.9),
        corrected: false,
    }
}

fn sample_snapshot() -> Snapshot {
    Snapshot {
        transactions: vec![
            tx(1, "2024-01-02", Category::Income, 50000.0),
            tx(2, "2024-01-05", Category::Bills, 499.0),
            tx(3, "2024-01-12", Category::Travel, 1000.0),
            tx(4, "2024-02-05", Category::Bills, 499.0),
            tx(5, "2024-02-14", Category::Travel, 4000.0),
        ],
        budgets: vec![Budget {
            category: Category::Travel,
            monthly_limit: 2000.0,
        }],
    }
}

fn setup_test_app() -> Router {
    create_router(
        sample_snapshot(),
        AnalyticsConfig::default(),
        ServerConfig::default(),
    )
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ========== Summary API Tests ==========

#[tokio::test]
async fn test_get_summary_all() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/summary")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["total_income"], 50000.0);
    assert_eq!(json["total_expense"], 5998.0);
    assert_eq!(json["category_totals"]["Travel"], 5000.0);
    assert_eq!(
        json["months_available"],
        serde_json::json!(["2024-02", "2024-01"])
    );
}

#[tokio::test]
async fn test_get_summary_month_filter() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/summary?period=2024-02")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = get_body_json(response).await;
    assert_eq!(json["total_income"], 0.0);
    assert_eq!(json["total_expense"], 4499.0);
    // Income is absent from February, so its key is absent too
    assert!(json["category_totals"].get("Income").is_none());
}

#[tokio::test]
async fn test_get_summary_bad_period() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/summary?period=soon")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Invalid period"));
}

#[tokio::test]
async fn test_get_monthly_summary() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/monthly-summary")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = get_body_json(response).await;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["month"], "2024-01");
    assert_eq!(items[0]["net"], 50000.0 - 1499.0);
}

// ========== Transactions API Tests ==========

#[tokio::test]
async fn test_list_transactions_newest_first() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/transactions?limit=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = get_body_json(response).await;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], 5);
    assert_eq!(items[1]["id"], 4);
    assert_eq!(
        json["months_available"],
        serde_json::json!(["2024-02", "2024-01"])
    );
}

// ========== Insights API Tests ==========

#[tokio::test]
async fn test_get_insights_defaults_to_latest_month() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/insights")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = get_body_json(response).await;
    assert_eq!(json["period"], "2024-02");
    assert_eq!(json["top_category"]["category"], "Travel");
    // Travel: 4000 vs 1000 baseline
    let spikes = json["spikes"].as_array().unwrap();
    assert_eq!(spikes.len(), 1);
    assert_eq!(spikes[0]["category"], "Travel");
    assert_eq!(spikes[0]["ratio"], 4.0);
}

#[tokio::test]
async fn test_get_insights_empty_snapshot() {
    let app = create_router(
        Snapshot::default(),
        AnalyticsConfig::default(),
        ServerConfig::default(),
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/insights")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert!(json["period"].is_null());
    assert!(json["top_category"].is_null());
    assert_eq!(json["spikes"].as_array().unwrap().len(), 0);
}

// ========== Recurring API Tests ==========

#[tokio::test]
async fn test_list_recurring() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/recurring")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = get_body_json(response).await;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["category"], "Bills");
    assert_eq!(items[0]["amount"], 499.0);
    assert_eq!(items[0]["count"], 2);
}

#[tokio::test]
async fn test_list_recurring_with_threshold() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/recurring?min_occurrences=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = get_body_json(response).await;
    assert_eq!(json["items"].as_array().unwrap().len(), 0);
}

// ========== Budgets API Tests ==========

#[tokio::test]
async fn test_budget_status_latest_month() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/budgets/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = get_body_json(response).await;
    let statuses = json.as_array().unwrap();
    assert_eq!(statuses.len(), 1);
    // February: Travel 4000 of 2000
    assert_eq!(statuses[0]["category"], "Travel");
    assert_eq!(statuses[0]["spent"], 4000.0);
    assert_eq!(statuses[0]["ratio"], 2.0);
    assert_eq!(statuses[0]["status"], "over");
}

#[tokio::test]
async fn test_replace_budgets_round_trip() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "items": [
            {"category": "Food", "monthly_limit": 1500.0},
            {"category": "Bills", "monthly_limit": 600.0}
        ]
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/budgets")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 2);

    // The replacement is visible on subsequent reads
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/budgets")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = get_body_json(response).await;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["category"], "Food");
}

#[tokio::test]
async fn test_replace_budgets_rejects_income() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "items": [{"category": "Income", "monthly_limit": 100.0}]
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/budgets")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_replace_budgets_rejects_non_positive_limit() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "items": [{"category": "Food", "monthly_limit": 0.0}]
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/budgets")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Alerts API Tests ==========

#[tokio::test]
async fn test_list_alerts() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/alerts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = get_body_json(response).await;
    let items = json["items"].as_array().unwrap();
    // Travel over budget in February (critical) + recurring Bills (info)
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["severity"], "critical");
    assert_eq!(items[0]["kind"], "budget");
    assert_eq!(items[1]["severity"], "info");
    assert_eq!(items[1]["kind"], "recurring");
}
