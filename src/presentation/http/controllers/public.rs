// src/presentation/http/controllers/public.rs
//! Unauthenticated read endpoints for the public site.
use super::AdminResource;
use crate::application::{
    dto::{ArticleDto, ListResponse},
    queries::PublicArticleFilter,
};
use crate::domain::listing::ListParams;
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};

#[utoipa::path(
    get,
    path = "/api/v1/public/articles",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive search over title, excerpt and body"),
        ("category" = Option<String>, Query, description = "Category slug"),
        ("tag" = Option<String>, Query, description = "Tag slug"),
        ("sort_field" = Option<String>, Query, description = "Whitelisted sort column, newest first by default"),
        ("sort_direction" = Option<String>, Query, description = "`asc` or `desc`"),
        ("page" = Option<u32>, Query),
        ("per_page" = Option<u32>, Query)
    ),
    responses(
        (status = 200, description = "Published articles.", body = ListResponse<ArticleDto>)
    ),
    security(()),
    tag = "Public"
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<PublicArticleFilter>,
) -> HttpResult<Json<ListResponse<ArticleDto>>> {
    state
        .services
        .public_articles
        .list_published(&params, &filter)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/public/articles/{slug}",
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "Published article; the read is counted.", body = ArticleDto),
        (status = 404, description = "No published article with that slug.", body = ErrorResponse)
    ),
    security(()),
    tag = "Public"
)]
pub async fn show_article(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .public_articles
        .show_by_slug(&slug)
        .await
        .into_http()
        .map(Json)
}

/// Live records of one collection; `trashed` is ignored.
pub async fn list<R: AdminResource>(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<R::Filter>,
) -> HttpResult<Json<ListResponse<R::Dto>>> {
    R::services(&state.services)
        .queries
        .list_public(&params, &filter)
        .await
        .into_http()
        .map(Json)
}
