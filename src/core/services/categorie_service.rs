use crate::api::client::StockClient;
use crate::api::models::{Categorie, CategorieRequest};
use crate::core::cache::{CacheKey, Entity, QueryCache};
use crate::core::policy::{CachePolicy, Mutation, cache_policy};
use crate::error::ApiError;
use crate::{impl_delete_service, impl_get_by_code_service, impl_get_service, impl_list_service};

const BASE: &str = "/categories";

pub struct CategorieService {
    client: StockClient,
    cache: QueryCache,
}

impl CategorieService {
    pub fn new(client: StockClient, cache: QueryCache) -> Self {
        Self { client, cache }
    }

    pub async fn get_all(&self) -> Result<Vec<Categorie>, ApiError> {
        if let Some(cached) = self.cache.get(&CacheKey::List(Entity::Categories)) {
            return Ok(cached);
        }
        self.refetch_all().await
    }

    async fn refetch_all(&self) -> Result<Vec<Categorie>, ApiError> {
        let categories: Vec<Categorie> = self.client.get_json(&format!("{BASE}/showAll")).await?;
        self.cache
            .put(CacheKey::List(Entity::Categories), &categories);
        Ok(categories)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Categorie, ApiError> {
        let key = CacheKey::Item(Entity::Categories, id);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }
        let categorie: Categorie = self.client.get_json(&format!("{BASE}/{id}")).await?;
        self.cache.put(key, &categorie);
        Ok(categorie)
    }

    pub async fn get_by_code(&self, code: &str) -> Result<Categorie, ApiError> {
        self.client.get_json(&format!("{BASE}/code/{code}")).await
    }

    pub async fn create(&self, request: &CategorieRequest) -> Result<Categorie, ApiError> {
        let categorie = self
            .client
            .post_json(&format!("{BASE}/create"), request)
            .await?;
        self.settle(Mutation::Create).await?;
        Ok(categorie)
    }

    pub async fn update(&self, id: i64, request: &CategorieRequest) -> Result<Categorie, ApiError> {
        let categorie = self
            .client
            .put_json(&format!("{BASE}/update/{id}"), request)
            .await?;
        self.settle(Mutation::Update).await?;
        Ok(categorie)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("{BASE}/delete/{id}")).await?;
        self.cache.remove(&CacheKey::Item(Entity::Categories, id));
        self.settle(Mutation::Delete).await
    }

    async fn settle(&self, mutation: Mutation) -> Result<(), ApiError> {
        match cache_policy(mutation) {
            CachePolicy::Invalidate => self.cache.invalidate(Entity::Categories),
            CachePolicy::Refetch => {
                self.cache.invalidate(Entity::Categories);
                self.refetch_all().await?;
            }
        }
        Ok(())
    }
}

impl_list_service!(CategorieService, Categorie);
impl_get_service!(CategorieService, Categorie);
impl_get_by_code_service!(CategorieService, Categorie);
impl_delete_service!(CategorieService);
