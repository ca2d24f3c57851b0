use axum::http::{Method, StatusCode};
use tower::util::ServiceExt as _;

mod support;

#[tokio::test]
async fn openapi_document_is_served() {
    let app = support::make_test_router();
    let req = support::request(Method::GET, "/api-docs/openapi.json", None, None);

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let doc = support::read_json(resp).await;
    let paths = doc["paths"].as_object().expect("paths object");
    assert!(paths.contains_key("/api/v1/admin/staff/{id}"));
    assert!(paths.contains_key("/api/v1/public/articles"));
    assert!(doc["components"]["securitySchemes"]["bearerAuth"].is_object());
    assert!(doc["components"]["schemas"]["ErrorResponse"].is_object());
}

#[test]
fn snapshot_is_written_to_the_configured_path() {
    let dir = std::env::temp_dir().join(format!("profil-cms-openapi-{}", std::process::id()));
    let path = dir.join("openapi.json");
    // SAFETY: this test binary has no other test reading the variable.
    unsafe { std::env::set_var("OPENAPI_SNAPSHOT_PATH", &path) };

    let written = profil_cms::presentation::http::openapi::write_openapi_snapshot().unwrap();
    assert_eq!(written, path.to_string_lossy());

    let raw = std::fs::read_to_string(&path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(doc["openapi"].as_str().unwrap().starts_with("3."));
    std::fs::remove_dir_all(&dir).ok();
}
