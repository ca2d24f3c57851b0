// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{ManagedRecord, RecordCommandService},
        dto::Actor,
        error::{ApplicationError, ApplicationResult},
        ports::{
            authentication::ActorResolver, authorization::Authorizer, time::Clock,
            util::SlugGenerator,
        },
        queries::{PublicArticleService, RecordQueryService},
    },
    domain::{
        article::{Article, ArticleViewCounter},
        category::Category,
        division::{Division, SubDivision},
        gallery::Gallery,
        product::Product,
        record::{Record, RecordRepository},
        staff::Staff,
        tag::Tag,
    },
};

/// Storage adapters for every collection, as handed over by the bootstrap.
#[derive(Clone)]
pub struct Repositories {
    pub articles: Arc<dyn RecordRepository<Article>>,
    pub article_views: Arc<dyn ArticleViewCounter>,
    pub categories: Arc<dyn RecordRepository<Category>>,
    pub tags: Arc<dyn RecordRepository<Tag>>,
    pub divisions: Arc<dyn RecordRepository<Division>>,
    pub sub_divisions: Arc<dyn RecordRepository<SubDivision>>,
    pub staff: Arc<dyn RecordRepository<Staff>>,
    pub products: Arc<dyn RecordRepository<Product>>,
    pub galleries: Arc<dyn RecordRepository<Gallery>>,
}

pub struct RecordServices<R: Record> {
    pub commands: Arc<RecordCommandService<R>>,
    pub queries: Arc<RecordQueryService<R>>,
}

impl<R: ManagedRecord> RecordServices<R> {
    fn new(
        repo: Arc<dyn RecordRepository<R>>,
        authorizer: &Arc<dyn Authorizer>,
        clock: &Arc<dyn Clock>,
        slugger: &Arc<dyn SlugGenerator>,
        default_per_page: u32,
    ) -> Self {
        let commands = Arc::new(RecordCommandService::new(
            Arc::clone(&repo),
            Arc::clone(authorizer),
            Arc::clone(clock),
            Arc::clone(slugger),
        ));
        let queries = Arc::new(RecordQueryService::new(
            repo,
            Arc::clone(authorizer),
            default_per_page,
        ));
        Self { commands, queries }
    }
}

pub struct ApplicationServices {
    pub articles: RecordServices<Article>,
    pub categories: RecordServices<Category>,
    pub tags: RecordServices<Tag>,
    pub divisions: RecordServices<Division>,
    pub sub_divisions: RecordServices<SubDivision>,
    pub staff: RecordServices<Staff>,
    pub products: RecordServices<Product>,
    pub galleries: RecordServices<Gallery>,
    pub public_articles: Arc<PublicArticleService>,
    actor_resolver: Arc<dyn ActorResolver>,
}

impl ApplicationServices {
    pub fn new(
        repos: Repositories,
        authorizer: Arc<dyn Authorizer>,
        actor_resolver: Arc<dyn ActorResolver>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
        default_per_page: u32,
    ) -> Self {
        let public_articles = Arc::new(PublicArticleService::new(
            Arc::clone(&repos.articles),
            Arc::clone(&repos.categories),
            Arc::clone(&repos.tags),
            Arc::clone(&repos.article_views),
            default_per_page,
        ));

        let Repositories {
            articles,
            article_views: _,
            categories,
            tags,
            divisions,
            sub_divisions,
            staff,
            products,
            galleries,
        } = repos;
        let per_page = default_per_page;

        Self {
            articles: RecordServices::new(articles, &authorizer, &clock, &slugger, per_page),
            categories: RecordServices::new(categories, &authorizer, &clock, &slugger, per_page),
            tags: RecordServices::new(tags, &authorizer, &clock, &slugger, per_page),
            divisions: RecordServices::new(divisions, &authorizer, &clock, &slugger, per_page),
            sub_divisions: RecordServices::new(
                sub_divisions,
                &authorizer,
                &clock,
                &slugger,
                per_page,
            ),
            staff: RecordServices::new(staff, &authorizer, &clock, &slugger, per_page),
            products: RecordServices::new(products, &authorizer, &clock, &slugger, per_page),
            galleries: RecordServices::new(galleries, &authorizer, &clock, &slugger, per_page),
            public_articles,
            actor_resolver,
        }
    }

    /// Resolves a raw bearer token; unknown tokens are `Unauthorized`.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<Actor> {
        self.actor_resolver
            .resolve(token)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("invalid or expired token"))
    }
}
