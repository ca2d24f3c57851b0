// src/presentation/http/controllers/articles.rs
use crate::application::{commands::articles::SetPublishStateCommand, dto::ArticleDto};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path};

#[utoipa::path(
    post,
    path = "/api/v1/admin/articles/{id}/publish",
    params(("id" = i64, Path, description = "Article id")),
    request_body = SetPublishStateCommand,
    responses(
        (status = 200, description = "Article with its new publish state.", body = ArticleDto),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse),
        (status = 403, description = "Missing `publish artikel`.", body = ErrorResponse),
        (status = 404, description = "No live article with that id.", body = ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn set_publish_state(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<SetPublishStateCommand>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .articles
        .commands
        .set_publish_state(&actor, id, payload)
        .await
        .into_http()
        .map(Json)
}
