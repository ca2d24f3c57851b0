// src/application/dto/pagination.rs
use crate::domain::listing::{Page, PageMeta, SortDirection, SortState};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageMetaDto {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
    /// 1-based position of the first item; `null` on an empty page.
    pub from: Option<u64>,
    pub to: Option<u64>,
}

impl From<PageMeta> for PageMetaDto {
    fn from(meta: PageMeta) -> Self {
        Self {
            current_page: meta.current_page,
            last_page: meta.last_page,
            per_page: meta.per_page,
            total: meta.total,
            from: meta.from,
            to: meta.to,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SortDto {
    pub field: Option<String>,
    /// `asc` or `desc`.
    pub direction: String,
}

impl From<SortState> for SortDto {
    fn from(state: SortState) -> Self {
        let direction = match state.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        Self {
            field: state.field,
            direction: direction.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(bound(serialize = "T: Serialize"))]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub meta: PageMetaDto,
    /// Active sort column, when one from the whitelist was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortDto>,
}

impl<T> ListResponse<T> {
    pub fn from_page<R>(page: Page<R>, sort: Option<SortState>) -> Self
    where
        T: From<R>,
    {
        let page = page.map(T::from);
        Self {
            items: page.items,
            meta: page.meta.into(),
            sort: sort.map(Into::into),
        }
    }
}
