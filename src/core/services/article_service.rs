use crate::api::client::StockClient;
use crate::api::models::{Article, ArticleRequest};
use crate::core::cache::{CacheKey, Entity, QueryCache};
use crate::core::policy::{CachePolicy, Mutation, cache_policy};
use crate::error::ApiError;
use crate::{impl_delete_service, impl_get_by_code_service, impl_get_service, impl_list_service};

const BASE: &str = "/articles";

/// Article catalogue. Create/update submit multipart form data with the
/// scalar fields as query parameters because articles carry an optional
/// product image.
pub struct ArticleService {
    client: StockClient,
    cache: QueryCache,
}

impl ArticleService {
    pub fn new(client: StockClient, cache: QueryCache) -> Self {
        Self { client, cache }
    }

    pub async fn get_all(&self) -> Result<Vec<Article>, ApiError> {
        if let Some(cached) = self.cache.get(&CacheKey::List(Entity::Articles)) {
            return Ok(cached);
        }
        self.refetch_all().await
    }

    async fn refetch_all(&self) -> Result<Vec<Article>, ApiError> {
        let articles: Vec<Article> = self.client.get_json(&format!("{BASE}/showAll")).await?;
        self.cache.put(CacheKey::List(Entity::Articles), &articles);
        Ok(articles)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Article, ApiError> {
        let key = CacheKey::Item(Entity::Articles, id);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }
        let article: Article = self.client.get_json(&format!("{BASE}/id/{id}")).await?;
        self.cache.put(key, &article);
        Ok(article)
    }

    pub async fn get_by_code(&self, code: &str) -> Result<Article, ApiError> {
        self.client.get_json(&format!("{BASE}/code/{code}")).await
    }

    pub async fn create(&self, request: &ArticleRequest) -> Result<Article, ApiError> {
        let article = self
            .client
            .post_multipart(
                &format!("{BASE}/create"),
                &request.query(),
                "image",
                request.image.as_ref(),
            )
            .await?;
        self.settle(Mutation::Create).await?;
        Ok(article)
    }

    pub async fn update(&self, id: i64, request: &ArticleRequest) -> Result<Article, ApiError> {
        let article = self
            .client
            .put_multipart(
                &format!("{BASE}/update/{id}"),
                &request.query(),
                "image",
                request.image.as_ref(),
            )
            .await?;
        self.settle(Mutation::Update).await?;
        Ok(article)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("{BASE}/delete/{id}")).await?;
        self.cache.remove(&CacheKey::Item(Entity::Articles, id));
        self.settle(Mutation::Delete).await
    }

    async fn settle(&self, mutation: Mutation) -> Result<(), ApiError> {
        match cache_policy(mutation) {
            CachePolicy::Invalidate => self.cache.invalidate(Entity::Articles),
            CachePolicy::Refetch => {
                self.cache.invalidate(Entity::Articles);
                self.refetch_all().await?;
            }
        }
        Ok(())
    }
}

impl_list_service!(ArticleService, Article);
impl_get_service!(ArticleService, Article);
impl_get_by_code_service!(ArticleService, Article);
impl_delete_service!(ArticleService);
