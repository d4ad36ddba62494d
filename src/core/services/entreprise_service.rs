use crate::api::client::StockClient;
use crate::api::models::{Entreprise, EntrepriseRequest};
use crate::core::cache::{CacheKey, Entity, QueryCache};
use crate::core::policy::{CachePolicy, Mutation, cache_policy};
use crate::error::ApiError;
use crate::{impl_delete_service, impl_get_service, impl_list_service};

const BASE: &str = "/entreprises";

pub struct EntrepriseService {
    client: StockClient,
    cache: QueryCache,
}

impl EntrepriseService {
    pub fn new(client: StockClient, cache: QueryCache) -> Self {
        Self { client, cache }
    }

    pub async fn get_all(&self) -> Result<Vec<Entreprise>, ApiError> {
        if let Some(cached) = self.cache.get(&CacheKey::List(Entity::Entreprises)) {
            return Ok(cached);
        }
        self.refetch_all().await
    }

    async fn refetch_all(&self) -> Result<Vec<Entreprise>, ApiError> {
        let entreprises: Vec<Entreprise> = self.client.get_json(&format!("{BASE}/showAll")).await?;
        self.cache
            .put(CacheKey::List(Entity::Entreprises), &entreprises);
        Ok(entreprises)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Entreprise, ApiError> {
        let key = CacheKey::Item(Entity::Entreprises, id);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }
        let record: Entreprise = self.client.get_json(&format!("{BASE}/{id}")).await?;
        self.cache.put(key, &record);
        Ok(record)
    }

    pub async fn create(&self, request: &EntrepriseRequest) -> Result<Entreprise, ApiError> {
        let record = self
            .client
            .post_multipart(
                &format!("{BASE}/create"),
                &request.query(),
                "photo",
                request.photo.as_ref(),
            )
            .await?;
        self.settle(Mutation::Create).await?;
        Ok(record)
    }

    pub async fn update(
        &self,
        id: i64,
        request: &EntrepriseRequest,
    ) -> Result<Entreprise, ApiError> {
        let record = self
            .client
            .put_multipart(
                &format!("{BASE}/update/{id}"),
                &request.query(),
                "photo",
                request.photo.as_ref(),
            )
            .await?;
        self.settle(Mutation::Update).await?;
        Ok(record)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("{BASE}/delete/{id}")).await?;
        self.cache.remove(&CacheKey::Item(Entity::Entreprises, id));
        self.settle(Mutation::Delete).await
    }

    async fn settle(&self, mutation: Mutation) -> Result<(), ApiError> {
        match cache_policy(mutation) {
            CachePolicy::Invalidate => self.cache.invalidate(Entity::Entreprises),
            CachePolicy::Refetch => {
                self.cache.invalidate(Entity::Entreprises);
                self.refetch_all().await?;
            }
        }
        Ok(())
    }
}

impl_list_service!(EntrepriseService, Entreprise);
impl_get_service!(EntrepriseService, Entreprise);
impl_delete_service!(EntrepriseService);
