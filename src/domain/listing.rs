// src/domain/listing.rs
//! Filtering, ordering and offset pagination over a record collection.
//!
//! Raw request parameters are normalised against a per-entity [`ListSpec`]
//! into a [`ListQuery`]. Nothing here ever rejects input: unknown sort
//! fields fall back to `id ASC`, page numbers and sizes are clamped.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("desc" | "descending") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Which records a listing sees with respect to soft deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trashed {
    #[default]
    Without,
    With,
    Only,
}

impl Trashed {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("with") => Trashed::With,
            Some("only") => Trashed::Only,
            _ => Trashed::Without,
        }
    }

    pub fn admits(self, deleted_at: Option<DateTime<Utc>>) -> bool {
        match self {
            Trashed::Without => deleted_at.is_none(),
            Trashed::With => true,
            Trashed::Only => deleted_at.is_some(),
        }
    }
}

/// Searchable and sortable column whitelists of one entity.
#[derive(Debug, Clone, Copy)]
pub struct ListSpec {
    pub searchable: &'static [&'static str],
    pub sortable: &'static [&'static str],
}

impl ListSpec {
    pub fn sort_column(&self, raw: &str) -> Option<&'static str> {
        let raw = raw.trim();
        self.sortable.iter().copied().find(|column| *column == raw)
    }

    pub fn normalize(&self, params: &ListParams, default_per_page: u32) -> ListQuery {
        let search = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let sort = params
            .sort_field()
            .and_then(|raw| self.sort_column(raw))
            .map(|column| Sort {
                column,
                direction: SortDirection::parse(params.sort_direction.as_deref()),
            });

        let per_page = parse_number(params.per_page.as_deref())
            .map(|n| n.clamp(1, i64::from(MAX_PER_PAGE)))
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or_else(|| default_per_page.clamp(1, MAX_PER_PAGE));

        let page = parse_number(params.page.as_deref())
            .map(|n| n.clamp(1, i64::from(u32::MAX)))
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(1);

        ListQuery {
            search,
            sort,
            page,
            per_page,
            trashed: Trashed::parse(params.trashed.as_deref()),
        }
    }
}

fn parse_number(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}

/// Raw listing parameters as received from a query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort_field: Option<String>,
    #[serde(default)]
    pub order_by: Option<String>,
    #[serde(default)]
    pub sort_direction: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub per_page: Option<String>,
    #[serde(default)]
    pub trashed: Option<String>,
}

impl ListParams {
    pub fn sort_field(&self) -> Option<&str> {
        self.sort_field.as_deref().or(self.order_by.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub column: &'static str,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub sort: Option<Sort>,
    pub page: u32,
    pub per_page: u32,
    pub trashed: Trashed,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            sort: None,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            trashed: Trashed::Without,
        }
    }
}

impl ListQuery {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}

/// Column sort state kept by a list screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    /// Same column flips the direction, another column starts ascending.
    pub fn toggle(&self, field: &str) -> SortState {
        match &self.field {
            Some(active) if active == field => SortState {
                field: Some(active.clone()),
                direction: self.direction.flip(),
            },
            _ => SortState {
                field: Some(field.to_string()),
                direction: SortDirection::Asc,
            },
        }
    }
}

impl From<Sort> for SortState {
    fn from(sort: Sort) -> Self {
        Self {
            field: Some(sort.column.to_string()),
            direction: sort.direction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub from: Option<u64>,
    pub to: Option<u64>,
}

impl PageMeta {
    pub fn new(query: &ListQuery, total: u64, item_count: usize) -> Self {
        let per_page = u64::from(query.per_page.max(1));
        let last_page = u32::try_from(total.div_ceil(per_page).max(1)).unwrap_or(u32::MAX);
        let (from, to) = if item_count == 0 {
            (None, None)
        } else {
            let from = query.offset() + 1;
            (Some(from), Some(from + item_count as u64 - 1))
        };
        Self {
            current_page: query.page,
            last_page,
            per_page: query.per_page,
            total,
            from,
            to,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, query: &ListQuery, total: u64) -> Self {
        let meta = PageMeta::new(query, total, items.len());
        Self { items, meta }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

/// Comparable value of one sortable column. `Null` orders after every value,
/// as it does in Postgres for ascending sorts. `Text` compares case-folded
/// first, the way the database's linguistic collation does, with the exact
/// text as tie-break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey<'a> {
    Bool(bool),
    Int(i64),
    Time(DateTime<Utc>),
    Text(&'a str),
    Null,
}

impl SortKey<'_> {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Bool(_) => 0,
            SortKey::Int(_) => 1,
            SortKey::Time(_) => 2,
            SortKey::Text(_) => 3,
            SortKey::Null => 4,
        }
    }
}

impl Ord for SortKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            (SortKey::Int(a), SortKey::Int(b)) => a.cmp(b),
            (SortKey::Time(a), SortKey::Time(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
                .then_with(|| a.cmp(b)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a> From<Option<&'a str>> for SortKey<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(SortKey::Null, SortKey::Text)
    }
}

impl From<Option<DateTime<Utc>>> for SortKey<'_> {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(SortKey::Null, SortKey::Time)
    }
}

/// Field access used by the in-memory evaluator.
pub trait Listable {
    fn record_id(&self) -> i64;
    fn deleted_at(&self) -> Option<DateTime<Utc>>;
    fn search_text(&self, column: &str) -> Option<&str>;
    fn sort_key(&self, column: &str) -> SortKey<'_>;
}

/// Evaluates `query` over `records` in memory.
pub fn evaluate<'r, T, I, F>(records: I, spec: &ListSpec, query: &ListQuery, mut keep: F) -> Page<T>
where
    T: Listable + Clone + 'r,
    I: IntoIterator<Item = &'r T>,
    F: FnMut(&T) -> bool,
{
    let needle = query.search.as_deref().map(str::to_lowercase);

    let mut matched: Vec<&T> = records
        .into_iter()
        .filter(|record| query.trashed.admits(record.deleted_at()))
        .filter(|record| match &needle {
            Some(needle) => spec.searchable.iter().any(|column| {
                record
                    .search_text(column)
                    .is_some_and(|text| text.to_lowercase().contains(needle.as_str()))
            }),
            None => true,
        })
        .filter(|record| keep(record))
        .collect();

    matched.sort_by(|a, b| {
        let by_column = match query.sort {
            Some(sort) => {
                let ordering = a.sort_key(sort.column).cmp(&b.sort_key(sort.column));
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            }
            None => Ordering::Equal,
        };
        by_column.then_with(|| a.record_id().cmp(&b.record_id()))
    });

    let total = matched.len() as u64;
    let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
    let items = matched
        .into_iter()
        .skip(offset)
        .take(query.per_page as usize)
        .cloned()
        .collect();

    Page::new(items, query, total)
}
