// src/presentation/http/openapi.rs
use crate::application::{
    commands::{
        articles::{CreateArticleCommand, SetPublishStateCommand, UpdateArticleCommand},
        categories::{CreateCategoryCommand, UpdateCategoryCommand},
        divisions::{
            CreateDivisionCommand, CreateSubDivisionCommand, UpdateDivisionCommand,
            UpdateSubDivisionCommand,
        },
        galleries::{CreateGalleryCommand, UpdateGalleryCommand},
        products::{CreateProductCommand, UpdateProductCommand},
        staff::{CreateStaffCommand, SocialLinkInput, UpdateStaffCommand},
        tags::{CreateTagCommand, UpdateTagCommand},
    },
    dto::{
        ArticleDto, CategoryDto, DivisionDto, GalleryDto, PageMetaDto, ProductDto, SocialLinkDto,
        SortDto, StaffDto, SubDivisionDto, TagDto,
    },
};
use crate::domain::{
    article::Article,
    category::Category,
    division::{Division, SubDivision},
    gallery::Gallery,
    product::Product,
    staff::Staff,
    tag::Tag,
};
use crate::presentation::http::{controllers::AdminResource, error::ErrorResponse};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::{env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    self as oa, Components, PathItem, Ref, RefOr, Required, ResponseBuilder,
    content::ContentBuilder,
    path::{OperationBuilder, Parameter, ParameterBuilder, ParameterIn},
    request_body::{RequestBody, RequestBodyBuilder},
    response::Response,
    schema::{Array, ObjectBuilder, Schema, SchemaType, Type},
    security::{Http, HttpAuthScheme, SecurityRequirement, SecurityScheme},
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::routes::health,
        crate::presentation::http::controllers::public::list_articles,
        crate::presentation::http::controllers::public::show_article,
        crate::presentation::http::controllers::articles::set_publish_state
    ),
    components(
        schemas(
            StatusResponse,
            ErrorResponse,
            PageMetaDto,
            SortDto,
            ArticleDto,
            CategoryDto,
            TagDto,
            DivisionDto,
            SubDivisionDto,
            StaffDto,
            SocialLinkDto,
            ProductDto,
            GalleryDto,
            CreateArticleCommand,
            UpdateArticleCommand,
            SetPublishStateCommand,
            CreateCategoryCommand,
            UpdateCategoryCommand,
            CreateTagCommand,
            UpdateTagCommand,
            CreateDivisionCommand,
            UpdateDivisionCommand,
            CreateSubDivisionCommand,
            UpdateSubDivisionCommand,
            CreateStaffCommand,
            UpdateStaffCommand,
            SocialLinkInput,
            CreateProductCommand,
            UpdateProductCommand,
            CreateGalleryCommand,
            UpdateGalleryCommand
        )
    ),
    tags(
        (name = "Public", description = "Unauthenticated read endpoints"),
        (name = "Articles", description = "Article management"),
        (name = "Categories", description = "Category management"),
        (name = "Tags", description = "Tag management"),
        (name = "Divisions", description = "Division management"),
        (name = "Sub Divisions", description = "Sub-division management"),
        (name = "Staff", description = "Staff management"),
        (name = "Products", description = "Product management"),
        (name = "Galleries", description = "Gallery management"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&SecurityAddon, &ResourcePaths),
    security(("bearerAuth" = [])),
    info(
        title = "Profil CMS API",
        description = "Organisation profile CMS backend",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut oa::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("<id>|<secret>".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));
    }
}

/// Adds the generic admin and public collection routes, which have no
/// per-handler annotations.
struct ResourcePaths;

impl Modify for ResourcePaths {
    fn modify(&self, openapi: &mut oa::OpenApi) {
        add_admin_paths::<Article>(openapi);
        add_admin_paths::<Category>(openapi);
        add_admin_paths::<Tag>(openapi);
        add_admin_paths::<Division>(openapi);
        add_admin_paths::<SubDivision>(openapi);
        add_admin_paths::<Staff>(openapi);
        add_admin_paths::<Product>(openapi);
        add_admin_paths::<Gallery>(openapi);

        add_public_list_path::<Category>(openapi);
        add_public_list_path::<Tag>(openapi);
        add_public_list_path::<Division>(openapi);
        add_public_list_path::<SubDivision>(openapi);
        add_public_list_path::<Staff>(openapi);
        add_public_list_path::<Product>(openapi);
        add_public_list_path::<Gallery>(openapi);
    }
}

fn schema_ref(name: &str) -> RefOr<Schema> {
    RefOr::Ref(Ref::from_schema_name(name))
}

fn response(description: &str, schema: Option<RefOr<Schema>>) -> RefOr<Response> {
    let mut builder = ResponseBuilder::new().description(description);
    if let Some(schema) = schema {
        let content = ContentBuilder::new().schema(Some(schema)).build();
        builder = builder.content("application/json", content);
    }
    RefOr::T(builder.build())
}

fn error_response(description: &str) -> RefOr<Response> {
    response(description, Some(schema_ref("ErrorResponse")))
}

fn list_schema(dto: &str) -> RefOr<Schema> {
    RefOr::T(Schema::Object(
        ObjectBuilder::new()
            .schema_type(SchemaType::Type(Type::Object))
            .property("items", Schema::Array(Array::new(schema_ref(dto))))
            .required("items")
            .property("meta", schema_ref("PageMetaDto"))
            .required("meta")
            .property("sort", schema_ref("SortDto"))
            .build(),
    ))
}

fn id_parameter() -> Parameter {
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .schema(Some(Schema::Object(
            ObjectBuilder::new()
                .schema_type(SchemaType::Type(Type::Integer))
                .build(),
        )))
        .build()
}

fn query_parameter(name: &str, description: &str) -> Parameter {
    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Query)
        .required(Required::False)
        .description(Some(description))
        .schema(Some(Schema::Object(
            ObjectBuilder::new()
                .schema_type(SchemaType::Type(Type::String))
                .build(),
        )))
        .build()
}

fn list_parameters(builder: OperationBuilder) -> OperationBuilder {
    builder
        .parameter(query_parameter("search", "Case-insensitive search over the searchable fields"))
        .parameter(query_parameter("sort_field", "Whitelisted sort column (alias `order_by`)"))
        .parameter(query_parameter("sort_direction", "`asc` or `desc`"))
        .parameter(query_parameter("page", "1-based page number"))
        .parameter(query_parameter("per_page", "Page size, 1 to 100"))
}

fn json_body(schema: &str) -> RequestBody {
    RequestBodyBuilder::new()
        .content(
            "application/json",
            ContentBuilder::new().schema(Some(schema_ref(schema))).build(),
        )
        .required(Some(Required::True))
        .build()
}

fn operation(tag: &str, id: String, summary: String) -> OperationBuilder {
    OperationBuilder::new()
        .tag(tag)
        .operation_id(Some(id))
        .summary(Some(summary))
        .response("401", error_response("Missing or invalid token."))
        .response("403", error_response("Permission denied."))
}

fn add_admin_paths<R: AdminResource>(openapi: &mut oa::OpenApi) {
    let dto = <R::Dto as ToSchema>::name();
    let create_schema = <R::Create as ToSchema>::name();
    let update_schema = <R::Update as ToSchema>::name();
    let key = R::PATH.replace('-', "_");
    let collection = format!("/api/v1/admin/{}", R::PATH);
    let item = format!("{collection}/{{id}}");

    let list = list_parameters(operation(R::TAG, format!("admin_list_{key}"), format!("List {}", R::PATH)))
        .parameter(query_parameter("trashed", "`with` or `only` to include trashed records"))
        .response("200", response("One page of records.", Some(list_schema(&dto))))
        .build();
    let create = operation(R::TAG, format!("admin_create_{key}"), format!("Create in {}", R::PATH))
        .request_body(Some(json_body(&create_schema)))
        .response("201", response("Created record.", Some(schema_ref(&dto))))
        .response("422", error_response("Rejected fields."))
        .build();
    let show = operation(R::TAG, format!("admin_show_{key}"), format!("Show one of {}", R::PATH))
        .parameter(id_parameter())
        .parameter(query_parameter("trashed", "`with` or `only` to include trashed records"))
        .response("200", response("The record.", Some(schema_ref(&dto))))
        .response("404", error_response("Not found."))
        .build();
    let update = operation(R::TAG, format!("admin_update_{key}"), format!("Update one of {}", R::PATH))
        .parameter(id_parameter())
        .request_body(Some(json_body(&update_schema)))
        .response("200", response("Updated record.", Some(schema_ref(&dto))))
        .response("404", error_response("Not found."))
        .response("422", error_response("Rejected fields."))
        .build();
    let delete = operation(R::TAG, format!("admin_delete_{key}"), format!("Move one of {} to the trash", R::PATH))
        .parameter(id_parameter())
        .response("204", response("Trashed.", None))
        .response("404", error_response("Not found."))
        .build();
    let restore = operation(R::TAG, format!("admin_restore_{key}"), format!("Restore one of {}", R::PATH))
        .parameter(id_parameter())
        .response("200", response("Restored record.", Some(schema_ref(&dto))))
        .response("404", error_response("Not found."))
        .response("422", error_response("Slug already taken by a live record."))
        .build();
    let force = operation(R::TAG, format!("admin_force_delete_{key}"), format!("Purge a trashed one of {}", R::PATH))
        .parameter(id_parameter())
        .response("204", response("Purged.", None))
        .response("400", error_response("Still referenced by other records."))
        .response("404", error_response("No trashed record with that id."))
        .build();

    set_operations(openapi, &collection, |item| {
        item.get = Some(list);
        item.post = Some(create);
    });
    set_operations(openapi, &item, |item| {
        item.get = Some(show);
        item.patch = Some(update);
        item.delete = Some(delete);
    });
    set_operations(openapi, &format!("{item}/restore"), |item| item.post = Some(restore));
    set_operations(openapi, &format!("{item}/force"), |item| item.delete = Some(force));
}

fn add_public_list_path<R: AdminResource>(openapi: &mut oa::OpenApi) {
    let dto = <R::Dto as ToSchema>::name();
    let list = list_parameters(
        OperationBuilder::new()
            .tag("Public")
            .operation_id(Some(format!("public_list_{}", R::PATH.replace('-', "_"))))
            .summary(Some(format!("List live {}", R::PATH))),
    )
    .security(SecurityRequirement::default())
    .response("200", response("One page of live records.", Some(list_schema(&dto))))
    .build();

    set_operations(openapi, &format!("/api/v1/public/{}", R::PATH), |item| {
        item.get = Some(list);
    });
}

fn set_operations(openapi: &mut oa::OpenApi, path: &str, apply: impl FnOnce(&mut PathItem)) {
    let item = openapi.paths.paths.entry(path.to_string()).or_default();
    apply(item);
}

pub fn docs_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}

/// Writes the OpenAPI document to `OPENAPI_SNAPSHOT_PATH`
/// (default `openapi.json`).
pub fn write_openapi_snapshot() -> std::io::Result<String> {
    let spec = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| "openapi.json".to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_generic_collection_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/v1/admin/categories"));
        assert!(paths.contains_key("/api/v1/admin/sub-divisions/{id}/restore"));
        assert!(paths.contains_key("/api/v1/admin/galleries/{id}/force"));
        assert!(paths.contains_key("/api/v1/public/staff"));
        assert!(paths.contains_key("/api/v1/public/articles/{slug}"));
        assert!(paths.contains_key("/api/v1/admin/articles/{id}/publish"));
        assert!(!paths.contains_key("/api/v1/public/articles/{id}"));
    }

    #[test]
    fn admin_article_item_has_patch_and_delete() {
        let doc = ApiDoc::openapi();
        let item = doc
            .paths
            .paths
            .get("/api/v1/admin/articles/{id}")
            .expect("article item path");
        assert!(item.get.is_some());
        assert!(item.patch.is_some());
        assert!(item.delete.is_some());
    }
}
