// src/presentation/http/routes.rs
use crate::domain::{
    article::Article,
    category::Category,
    division::{Division, SubDivision},
    gallery::Gallery,
    product::Product,
    staff::Staff,
    tag::Tag,
};
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{AdminResource, admin, articles, public},
    middleware::rate_limit::rate_limit_layer,
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Router-level settings taken from configuration.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Empty allows any origin.
    pub allowed_origins: Vec<String>,
    /// Requests per second per client IP on the public API; `0` disables.
    pub rate_limit_per_second: u64,
}

pub fn build_router(state: HttpState, options: &RouterOptions) -> Router {
    let admin = Router::new()
        .merge(admin_routes::<Article>())
        .merge(admin_routes::<Category>())
        .merge(admin_routes::<Tag>())
        .merge(admin_routes::<Division>())
        .merge(admin_routes::<SubDivision>())
        .merge(admin_routes::<Staff>())
        .merge(admin_routes::<Product>())
        .merge(admin_routes::<Gallery>())
        .route("/articles/{id}/publish", post(articles::set_publish_state));

    let public = Router::new()
        .route("/articles", get(public::list_articles))
        .route("/articles/{slug}", get(public::show_article))
        .merge(public_routes::<Category>())
        .merge(public_routes::<Tag>())
        .merge(public_routes::<Division>())
        .merge(public_routes::<SubDivision>())
        .merge(public_routes::<Staff>())
        .merge(public_routes::<Product>())
        .merge(public_routes::<Gallery>());
    let public = match rate_limit_layer(options.rate_limit_per_second) {
        Some(limiter) => public.layer(limiter),
        None => public,
    };

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .nest("/api/v1/admin", admin)
        .nest("/api/v1/public", public)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&options.allowed_origins))
        .layer(Extension(state))
}

fn admin_routes<R: AdminResource>() -> Router {
    let collection = format!("/{}", R::PATH);
    let item = format!("/{}/{{id}}", R::PATH);
    Router::new()
        .route(
            &collection,
            get(admin::list::<R>).post(admin::create::<R>),
        )
        .route(
            &item,
            get(admin::show::<R>)
                .patch(admin::update::<R>)
                .delete(admin::delete::<R>),
        )
        .route(&format!("{item}/restore"), post(admin::restore::<R>))
        .route(&format!("{item}/force"), delete(admin::force_delete::<R>))
}

fn public_routes<R: AdminResource>() -> Router {
    Router::new().route(&format!("/{}", R::PATH), get(public::list::<R>))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = StatusResponse)
    ),
    security(()),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
