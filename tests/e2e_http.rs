use axum::http::{Method, StatusCode};
use serde_json::{Value, json};
use tower::util::ServiceExt as _;

mod support;

use support::{ADMIN_TOKEN, build_services, make_router_for, make_test_router, read_json, request};

async fn call(app: &axum::Router, req: axum::http::Request<axum::body::Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    if status == StatusCode::NO_CONTENT {
        return (status, Value::Null);
    }
    (status, read_json(resp).await)
}

#[tokio::test]
async fn e2e_health_is_public() {
    let app = make_test_router();
    let (status, body) = call(&app, request(Method::GET, "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn e2e_category_lifecycle() {
    let app = make_router_for(build_services());

    let (status, created) = call(
        &app,
        request(
            Method::POST,
            "/api/v1/admin/categories",
            Some(ADMIN_TOKEN),
            Some(json!({ "name": "Robot Beroda", "description": "Lomba robot" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["slug"], "robot-beroda");
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = call(
        &app,
        request(
            Method::PATCH,
            &format!("/api/v1/admin/categories/{id}"),
            Some(ADMIN_TOKEN),
            Some(json!({ "name": "Robot Beroda 2", "description": null })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["slug"], "robot-beroda-2");
    assert!(updated["description"].is_null());

    let (status, _) = call(
        &app,
        request(
            Method::DELETE,
            &format!("/api/v1/admin/categories/{id}"),
            Some(ADMIN_TOKEN),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, trashed) = call(
        &app,
        request(
            Method::GET,
            "/api/v1/admin/categories?trashed=only",
            Some(ADMIN_TOKEN),
            None,
        ),
    )
    .await;
    assert_eq!(trashed["meta"]["total"], 1);

    let (status, restored) = call(
        &app,
        request(
            Method::POST,
            &format!("/api/v1/admin/categories/{id}/restore"),
            Some(ADMIN_TOKEN),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(restored.get("deleted_at").is_none());

    for (method, suffix, expected) in [
        (Method::DELETE, "", StatusCode::NO_CONTENT),
        (Method::DELETE, "/force", StatusCode::NO_CONTENT),
        (Method::GET, "?trashed=with", StatusCode::NOT_FOUND),
    ] {
        let uri = format!("/api/v1/admin/categories/{id}{suffix}");
        let (status, _) = call(&app, request(method, &uri, Some(ADMIN_TOKEN), None)).await;
        assert_eq!(status, expected, "{uri}");
    }
}

#[tokio::test]
async fn e2e_list_carries_meta_and_sort() {
    let app = make_test_router();
    for name in ["Gamma", "Alpha", "Beta"] {
        let (status, _) = call(
            &app,
            request(
                Method::POST,
                "/api/v1/admin/tags",
                Some(ADMIN_TOKEN),
                Some(json!({ "name": name })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = call(
        &app,
        request(
            Method::GET,
            "/api/v1/admin/tags?sort_field=name&sort_direction=desc&per_page=2",
            Some(ADMIN_TOKEN),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Gamma", "Beta"]);
    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(body["meta"]["last_page"], 2);
    assert_eq!(body["meta"]["from"], 1);
    assert_eq!(body["meta"]["to"], 2);
    assert_eq!(body["sort"]["field"], "name");
    assert_eq!(body["sort"]["direction"], "desc");

    let (_, search) = call(
        &app,
        request(
            Method::GET,
            "/api/v1/admin/tags?search=alp&sort_field=bogus",
            Some(ADMIN_TOKEN),
            None,
        ),
    )
    .await;
    assert_eq!(search["meta"]["total"], 1);
    assert!(search.get("sort").is_none());
}

#[tokio::test]
async fn e2e_public_article_flow() {
    let app = make_test_router();

    let (_, cat) = call(
        &app,
        request(
            Method::POST,
            "/api/v1/admin/categories",
            Some(ADMIN_TOKEN),
            Some(json!({ "name": "Berita" })),
        ),
    )
    .await;
    let (status, article) = call(
        &app,
        request(
            Method::POST,
            "/api/v1/admin/articles",
            Some(ADMIN_TOKEN),
            Some(json!({
                "title": "Juara Nasional",
                "body": "Tim kami menang.",
                "category_id": cat["id"],
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(article["published"], false);

    let (_, listed) = call(&app, request(Method::GET, "/api/v1/public/articles", None, None)).await;
    assert_eq!(listed["meta"]["total"], 0);

    let (status, published) = call(
        &app,
        request(
            Method::POST,
            &format!("/api/v1/admin/articles/{}/publish", article["id"]),
            Some(ADMIN_TOKEN),
            Some(json!({ "publish": true })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(published["published_at"].is_string());

    let (_, listed) = call(
        &app,
        request(Method::GET, "/api/v1/public/articles?category=berita", None, None),
    )
    .await;
    assert_eq!(listed["meta"]["total"], 1);

    let (status, shown) = call(
        &app,
        request(Method::GET, "/api/v1/public/articles/juara-nasional", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shown["views"], 1);

    let (status, categories) =
        call(&app, request(Method::GET, "/api/v1/public/categories", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(categories["items"][0]["slug"], "berita");
}
