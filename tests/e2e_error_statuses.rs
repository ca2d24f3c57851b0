use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::util::ServiceExt as _;

mod support;

use support::{ADMIN_TOKEN, EDITOR_TOKEN, STRANGER_TOKEN, assert_error_response, make_test_router, request};

/// Admin routes without a bearer token answer 401.
#[tokio::test]
async fn e2e_missing_token_returns_401() {
    let app = make_test_router();
    let req = request(Method::GET, "/api/v1/admin/categories", None, None);

    let resp = app.oneshot(req).await.unwrap();
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

#[tokio::test]
async fn e2e_unknown_token_returns_401() {
    let app = make_test_router();
    let req = request(Method::GET, "/api/v1/admin/categories", Some("1|nope"), None);

    let resp = app.oneshot(req).await.unwrap();
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

/// Authenticated callers without the permission answer 403, even for
/// payloads that would fail validation.
#[tokio::test]
async fn e2e_missing_permission_returns_403() {
    let app = make_test_router();
    let req = request(
        Method::POST,
        "/api/v1/admin/products",
        Some(STRANGER_TOKEN),
        Some(json!({ "name": "" })),
    );

    let resp = app.oneshot(req).await.unwrap();
    assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;
}

#[tokio::test]
async fn e2e_editor_cannot_publish_returns_403() {
    let app = make_test_router();
    let req = request(
        Method::POST,
        "/api/v1/admin/articles/1/publish",
        Some(EDITOR_TOKEN),
        Some(json!({ "publish": true })),
    );

    let resp = app.oneshot(req).await.unwrap();
    assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;
}

#[tokio::test]
async fn e2e_unknown_record_returns_404() {
    let app = make_test_router();
    let req = request(Method::GET, "/api/v1/admin/galleries/999", Some(ADMIN_TOKEN), None);

    let resp = app.oneshot(req).await.unwrap();
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
}

#[tokio::test]
async fn e2e_unknown_public_slug_returns_404() {
    let app = make_test_router();
    let req = request(Method::GET, "/api/v1/public/articles/nonexistent", None, None);

    let resp = app.oneshot(req).await.unwrap();
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
}

/// Rejected fields come back as a field-to-message map.
#[tokio::test]
async fn e2e_invalid_fields_return_422_with_field_map() {
    let app = make_test_router();
    let req = request(
        Method::POST,
        "/api/v1/admin/products",
        Some(ADMIN_TOKEN),
        Some(json!({ "name": "  ", "price": -5 })),
    );

    let resp = app.oneshot(req).await.unwrap();
    let body =
        assert_error_response(resp, StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable Entity")
            .await;
    let fields = body["fields"].as_object().expect("fields object");
    assert!(fields.contains_key("name"), "{body}");
    assert!(fields.contains_key("price"), "{body}");
}

#[tokio::test]
async fn e2e_gallery_without_image_returns_422() {
    let app = make_test_router();
    let req = request(
        Method::POST,
        "/api/v1/admin/galleries",
        Some(ADMIN_TOKEN),
        Some(json!({ "title": "Pameran" })),
    );

    let resp = app.oneshot(req).await.unwrap();
    let body =
        assert_error_response(resp, StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable Entity")
            .await;
    assert!(body["fields"].get("image").is_some(), "{body}");
}
