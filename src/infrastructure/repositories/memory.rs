// src/infrastructure/repositories/memory.rs
//! Process-local store used by the `memory://` backend and by tests.
use crate::application::services::Repositories;
use crate::domain::{
    article::{Article, ArticleId, ArticleViewCounter},
    category::Category,
    division::{Division, DivisionId, SubDivision},
    errors::{DomainError, DomainResult},
    gallery::Gallery,
    listing::{ListQuery, Page, Trashed, evaluate},
    product::Product,
    record::{Record, RecordRepository},
    slug::Slug,
    staff::{Staff, sub_division_outside_division},
    tag::Tag,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

struct State<R> {
    next_id: i64,
    rows: BTreeMap<i64, R>,
}

impl<R> Default for State<R> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<R: Record> State<R> {
    /// Live slugs are unique per collection.
    fn ensure_slug_free(&self, slug: Option<&Slug>, except: Option<i64>) -> DomainResult<()> {
        let Some(slug) = slug else {
            return Ok(());
        };
        let taken = self.rows.values().any(|row| {
            row.deleted_at().is_none() && Some(row.id()) != except && row.slug() == Some(slug)
        });
        if taken {
            Err(DomainError::Uniqueness { field: "slug" })
        } else {
            Ok(())
        }
    }
}

/// Cross-collection check run on every written row.
type ReferenceCheck<R> = Box<dyn Fn(&R) -> DomainResult<()> + Send + Sync>;

pub struct InMemoryRecordRepository<R> {
    state: Mutex<State<R>>,
    check: Option<ReferenceCheck<R>>,
}

impl<R> Default for InMemoryRecordRepository<R> {
    fn default() -> Self {
        Self {
            state: Mutex::new(State::default()),
            check: None,
        }
    }
}

impl<R: Record> InMemoryRecordRepository<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `check` against each inserted or updated row while the store is locked.
    pub fn with_reference_check(
        check: impl Fn(&R) -> DomainResult<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            state: Mutex::new(State::default()),
            check: Some(Box::new(check)),
        }
    }

    fn check_references(&self, record: &R) -> DomainResult<()> {
        self.check.as_ref().map_or(Ok(()), |check| check(record))
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, State<R>>> {
        self.state
            .lock()
            .map_err(|_| DomainError::Persistence("in-memory store lock poisoned".into()))
    }
}

fn not_found<R: Record>(id: i64) -> DomainError {
    DomainError::NotFound(format!("{} {id} not found", R::RESOURCE))
}

#[async_trait]
impl<R: Record> RecordRepository<R> for InMemoryRecordRepository<R> {
    async fn insert(&self, new: R::New) -> DomainResult<R> {
        let mut state = self.lock()?;
        let id = state.next_id;
        let record = R::from_new(id, new)?;
        self.check_references(&record)?;
        state.ensure_slug_free(record.slug(), None)?;
        state.next_id += 1;
        state.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, record: &R) -> DomainResult<R> {
        let mut state = self.lock()?;
        let id = record.id();
        let mut next = record.clone();
        match state.rows.get(&id) {
            Some(stored) if stored.deleted_at().is_none() => next.merge_counters(stored),
            _ => return Err(not_found::<R>(id)),
        }
        self.check_references(&next)?;
        state.ensure_slug_free(next.slug(), Some(id))?;
        state.rows.insert(id, next.clone());
        Ok(next)
    }

    async fn find_by_id(&self, id: i64, trashed: Trashed) -> DomainResult<Option<R>> {
        let state = self.lock()?;
        Ok(state
            .rows
            .get(&id)
            .filter(|row| trashed.admits(row.deleted_at()))
            .cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<R>> {
        let state = self.lock()?;
        Ok(state
            .rows
            .values()
            .find(|row| row.deleted_at().is_none() && row.slug() == Some(slug))
            .cloned())
    }

    async fn list(&self, query: &ListQuery, filter: &R::Filter) -> DomainResult<Page<R>> {
        let state = self.lock()?;
        Ok(evaluate(state.rows.values(), &R::LIST, query, |row| {
            row.matches(filter)
        }))
    }

    async fn soft_delete(&self, id: i64, at: DateTime<Utc>) -> DomainResult<()> {
        let mut state = self.lock()?;
        if let Some(row) = state
            .rows
            .get_mut(&id)
            .filter(|row| row.deleted_at().is_none())
        {
            row.set_deleted_at(Some(at));
            row.touch(at);
        }
        Ok(())
    }

    async fn restore(&self, id: i64, at: DateTime<Utc>) -> DomainResult<R> {
        let mut state = self.lock()?;
        let slug = match state.rows.get(&id) {
            Some(row) if row.deleted_at().is_some() => row.slug().cloned(),
            _ => return Err(not_found::<R>(id)),
        };
        state.ensure_slug_free(slug.as_ref(), Some(id))?;

        let row = state.rows.get_mut(&id).ok_or_else(|| not_found::<R>(id))?;
        row.set_deleted_at(None);
        row.touch(at);
        Ok(row.clone())
    }

    async fn purge(&self, id: i64) -> DomainResult<()> {
        let mut state = self.lock()?;
        match state.rows.get(&id) {
            Some(row) if row.deleted_at().is_some() => {
                state.rows.remove(&id);
                Ok(())
            }
            _ => Err(not_found::<R>(id)),
        }
    }
}

#[async_trait]
impl ArticleViewCounter for InMemoryRecordRepository<Article> {
    async fn record_view(&self, id: ArticleId) -> DomainResult<Option<i64>> {
        let mut state = self.lock()?;
        Ok(state
            .rows
            .get_mut(&id.0)
            .filter(|article| article.is_publicly_visible())
            .map(|article| {
                article.views += 1;
                article.views
            }))
    }
}

impl InMemoryRecordRepository<SubDivision> {
    /// Division of a stored sub-division, trashed rows included.
    fn division_of(&self, id: i64) -> DomainResult<Option<DivisionId>> {
        Ok(self.lock()?.rows.get(&id).map(|row| row.division_id))
    }
}

/// Rejects staff whose sub-division is missing or sits under another division.
fn staff_sub_division_check(
    sub_divisions: Arc<InMemoryRecordRepository<SubDivision>>,
) -> impl Fn(&Staff) -> DomainResult<()> + Send + Sync + 'static {
    move |staff| {
        let Some(sub_division_id) = staff.sub_division_id else {
            return Ok(());
        };
        match sub_divisions.division_of(sub_division_id.0)? {
            None => Err(DomainError::MissingReference {
                field: "sub_division_id",
            }),
            Some(division_id) if division_id != staff.division_id => {
                Err(sub_division_outside_division())
            }
            Some(_) => Ok(()),
        }
    }
}

/// Fresh, empty stores for every collection. Of the foreign keys only the
/// staff sub-division pair is checked.
pub fn in_memory_repositories() -> Repositories {
    let articles = Arc::new(InMemoryRecordRepository::<Article>::new());
    let sub_divisions = Arc::new(InMemoryRecordRepository::<SubDivision>::new());
    Repositories {
        articles: articles.clone(),
        article_views: articles,
        categories: Arc::new(InMemoryRecordRepository::<Category>::new()),
        tags: Arc::new(InMemoryRecordRepository::<Tag>::new()),
        divisions: Arc::new(InMemoryRecordRepository::<Division>::new()),
        staff: Arc::new(InMemoryRecordRepository::<Staff>::with_reference_check(
            staff_sub_division_check(sub_divisions.clone()),
        )),
        sub_divisions,
        products: Arc::new(InMemoryRecordRepository::<Product>::new()),
        galleries: Arc::new(InMemoryRecordRepository::<Gallery>::new()),
    }
}
