// src/presentation/http/controllers/admin.rs
//! Permission-gated CRUD handlers shared by every managed collection.
use crate::application::{
    commands::ManagedRecord,
    dto::ListResponse,
    services::{ApplicationServices, RecordServices},
};
use crate::domain::{
    article::Article,
    category::Category,
    division::{Division, SubDivision},
    gallery::Gallery,
    listing::{ListParams, Trashed},
    product::Product,
    staff::Staff,
    tag::Tag,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::{Deserialize, de::DeserializeOwned};
use utoipa::ToSchema;

/// A collection served under `/api/v1/admin/{PATH}` and `/api/v1/public/{PATH}`.
pub trait AdminResource:
    ManagedRecord<
        Filter: DeserializeOwned,
        Dto: ToSchema,
        Create: ToSchema,
        Update: ToSchema,
    >
{
    const PATH: &'static str;
    const TAG: &'static str;

    fn services(services: &ApplicationServices) -> &RecordServices<Self>;
}

macro_rules! admin_resource {
    ($record:ty, $path:literal, $tag:literal, $field:ident) => {
        impl AdminResource for $record {
            const PATH: &'static str = $path;
            const TAG: &'static str = $tag;

            fn services(services: &ApplicationServices) -> &RecordServices<Self> {
                &services.$field
            }
        }
    };
}

admin_resource!(Article, "articles", "Articles", articles);
admin_resource!(Category, "categories", "Categories", categories);
admin_resource!(Tag, "tags", "Tags", tags);
admin_resource!(Division, "divisions", "Divisions", divisions);
admin_resource!(SubDivision, "sub-divisions", "Sub Divisions", sub_divisions);
admin_resource!(Staff, "staff", "Staff", staff);
admin_resource!(Product, "products", "Products", products);
admin_resource!(Gallery, "galleries", "Galleries", galleries);

#[derive(Debug, Default, Deserialize)]
pub struct ShowParams {
    #[serde(default)]
    pub trashed: Option<String>,
}

pub async fn list<R: AdminResource>(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Query(params): Query<ListParams>,
    Query(filter): Query<R::Filter>,
) -> HttpResult<Json<ListResponse<R::Dto>>> {
    R::services(&state.services)
        .queries
        .list(&actor, &params, &filter)
        .await
        .into_http()
        .map(Json)
}

pub async fn show<R: AdminResource>(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(id): Path<i64>,
    Query(params): Query<ShowParams>,
) -> HttpResult<Json<R::Dto>> {
    let trashed = Trashed::parse(params.trashed.as_deref());
    R::services(&state.services)
        .queries
        .get(&actor, id, trashed)
        .await
        .into_http()
        .map(Json)
}

pub async fn create<R: AdminResource>(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Json(payload): Json<R::Create>,
) -> HttpResult<(StatusCode, Json<R::Dto>)> {
    let created = R::services(&state.services)
        .commands
        .create(&actor, payload)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update<R: AdminResource>(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<R::Update>,
) -> HttpResult<Json<R::Dto>> {
    R::services(&state.services)
        .commands
        .update(&actor, id, payload)
        .await
        .into_http()
        .map(Json)
}

pub async fn delete<R: AdminResource>(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<StatusCode> {
    R::services(&state.services)
        .commands
        .delete(&actor, id)
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn restore<R: AdminResource>(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<R::Dto>> {
    R::services(&state.services)
        .commands
        .restore(&actor, id)
        .await
        .into_http()
        .map(Json)
}

pub async fn force_delete<R: AdminResource>(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<StatusCode> {
    R::services(&state.services)
        .commands
        .force_delete(&actor, id)
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}
