use super::PublicArticleService;
use crate::{
    application::{
        dto::{ArticleDto, ListResponse},
        error::ApplicationResult,
    },
    domain::{
        article::{Article, ArticleFilter},
        listing::{ListParams, ListQuery, Page, Sort, SortDirection, SortState, Trashed},
        record::{Record, RecordRepository},
        slug::Slug,
    },
};
use serde::Deserialize;

/// Public article filters, by category and tag slug.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicArticleFilter {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

/// Resolves a slug filter to the id of a live record. `Ok(None)` means the
/// filter can match nothing.
async fn resolve<R: Record>(
    repo: &dyn RecordRepository<R>,
    raw: Option<&str>,
) -> ApplicationResult<Option<Option<i64>>> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(Some(None));
    };
    let Ok(slug) = Slug::new(raw) else {
        return Ok(None);
    };
    Ok(repo.find_by_slug(&slug).await?.map(|record| Some(record.id())))
}

impl PublicArticleService {
    /// Published, live articles; newest first unless a sort field is given.
    pub async fn list_published(
        &self,
        params: &ListParams,
        filter: &PublicArticleFilter,
    ) -> ApplicationResult<ListResponse<ArticleDto>> {
        let mut query = ListQuery {
            trashed: Trashed::Without,
            ..Article::LIST.normalize(params, self.default_per_page)
        };
        query.sort.get_or_insert(Sort {
            column: "published_at",
            direction: SortDirection::Desc,
        });
        let sort = query.sort.map(SortState::from);

        let category = resolve(self.categories.as_ref(), filter.category.as_deref()).await?;
        let tag = resolve(self.tags.as_ref(), filter.tag.as_deref()).await?;
        let (Some(category_id), Some(tag_id)) = (category, tag) else {
            let empty: Page<Article> = Page::new(Vec::new(), &query, 0);
            return Ok(ListResponse::from_page(empty, sort));
        };

        let article_filter = ArticleFilter {
            category_id,
            tag_id,
            ..ArticleFilter::published_only()
        };
        let page = self.articles.list(&query, &article_filter).await?;
        Ok(ListResponse::from_page(page, sort))
    }
}
