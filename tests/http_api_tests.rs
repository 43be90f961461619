// tests/http_api_tests.rs

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use querybench_client::api::{HttpApi, QueryBenchApi};
use querybench_client::error::ApiError;
use url::Url;

/// Spawns a canned stand-in for the assessment backend on a random port
/// and returns a client pointed at it.
async fn spawn_stub() -> HttpApi {
    let app = Router::new()
        .route(
            "/api/v1/assignments/{id}/start_attempt/",
            post(|| async {
                Json(serde_json::json!({
                    "id": 42,
                    "assignment": 5,
                    "started_at": "2025-03-01T09:30:00Z",
                    "submitted_at": null,
                    "score": null
                }))
            }),
        )
        .route(
            "/api/v1/schema/",
            get(|| async {
                Json(serde_json::json!({
                    "tables": [{
                        "name": "orders",
                        "columns": [
                            {
                                "name": "order_id",
                                "type": "int",
                                "isNullable": false,
                                "isPrimaryKey": true,
                                "isForeignKey": false
                            },
                            {
                                "name": "customer_id",
                                "type": "int",
                                "isNullable": true,
                                "isPrimaryKey": false,
                                "isForeignKey": true,
                                "references": { "table": "customers", "column": "id" }
                            }
                        ]
                    }]
                }))
            }),
        )
        .route(
            "/api/v1/attempts/run_query/",
            post(|| async {
                Json(serde_json::json!({
                    "columns": ["order_id"],
                    "rows": [[1], [2], [3]],
                    "execution_time_ms": 12.5
                }))
            }),
        )
        .route(
            "/api/v1/attempts/validate_query/",
            post(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(serde_json::json!({ "detail": "Question has no stored solution" })),
                )
            }),
        )
        .route(
            "/api/v1/attempts/{id}/finalize/",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let base = Url::parse(&format!("http://127.0.0.1:{}/api/v1", port)).unwrap();
    HttpApi::new(base)
}

#[tokio::test]
async fn start_attempt_decodes_attempt() {
    let api = spawn_stub().await;

    let attempt = api.start_attempt(5).await.expect("attempt");
    assert_eq!(attempt.id, 42);
    assert_eq!(attempt.assignment, 5);
    assert!(attempt.submitted_at.is_none());
    assert!(attempt.score.is_none());
}

#[tokio::test]
async fn schema_decodes_camel_case_key_flags() {
    let api = spawn_stub().await;

    let schema = api.get_schema(7).await.expect("schema");
    assert_eq!(schema.tables.len(), 1);

    let columns = &schema.tables[0].columns;
    assert!(columns[0].is_primary_key);
    assert!(!columns[0].is_nullable);

    let fk = &columns[1];
    assert!(fk.is_foreign_key);
    let references = fk.references.as_ref().expect("fk target");
    assert_eq!(references.table, "customers");
    assert_eq!(references.column, "id");
}

#[tokio::test]
async fn run_query_decodes_result_without_error_field() {
    let api = spawn_stub().await;

    let result = api
        .run_query("SELECT order_id FROM orders ORDER BY order_id", Some(7))
        .await
        .expect("result");
    assert!(result.error.is_none());
    assert_eq!(result.columns, vec!["order_id"]);
    assert_eq!(result.rows.len(), 3);
    assert!(result.is_well_formed());
}

#[tokio::test]
async fn error_body_message_is_extracted() {
    let api = spawn_stub().await;

    let err = api
        .validate_query("SELECT 1 ORDER BY 1", 100, Some(7))
        .await
        .expect_err("validation should be rejected");

    match err {
        ApiError::Rejected { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Question has no stored solution");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status_message() {
    let api = spawn_stub().await;

    let err = api.finalize_attempt(42).await.expect_err("finalize fails");
    match err {
        ApiError::Rejected { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Request failed (500)");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
