use crate::api::client::StockClient;
use crate::api::models::{Vente, VenteRequest};
use crate::core::cache::{CacheKey, Entity, QueryCache};
use crate::core::policy::{CachePolicy, Mutation, cache_policy};
use crate::error::ApiError;
use crate::{impl_delete_service, impl_get_by_code_service, impl_get_service, impl_list_service};

const BASE: &str = "/ventes";

pub struct VenteService {
    client: StockClient,
    cache: QueryCache,
}

impl VenteService {
    pub fn new(client: StockClient, cache: QueryCache) -> Self {
        Self { client, cache }
    }

    pub async fn get_all(&self) -> Result<Vec<Vente>, ApiError> {
        if let Some(cached) = self.cache.get(&CacheKey::List(Entity::Ventes)) {
            return Ok(cached);
        }
        self.refetch_all().await
    }

    async fn refetch_all(&self) -> Result<Vec<Vente>, ApiError> {
        let ventes: Vec<Vente> = self.client.get_json(&format!("{BASE}/showAll")).await?;
        self.cache.put(CacheKey::List(Entity::Ventes), &ventes);
        Ok(ventes)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Vente, ApiError> {
        let key = CacheKey::Item(Entity::Ventes, id);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }
        let vente: Vente = self.client.get_json(&format!("{BASE}/{id}")).await?;
        self.cache.put(key, &vente);
        Ok(vente)
    }

    pub async fn get_by_code(&self, code: &str) -> Result<Vente, ApiError> {
        self.client.get_json(&format!("{BASE}/code/{code}")).await
    }

    pub async fn create(&self, request: &VenteRequest) -> Result<Vente, ApiError> {
        let vente = self
            .client
            .post_json(&format!("{BASE}/create"), request)
            .await?;
        self.settle(Mutation::Create).await?;
        Ok(vente)
    }

    pub async fn update(&self, id: i64, request: &VenteRequest) -> Result<Vente, ApiError> {
        let vente = self
            .client
            .put_json(&format!("{BASE}/update/{id}"), request)
            .await?;
        self.settle(Mutation::Update).await?;
        Ok(vente)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("{BASE}/delete/{id}")).await?;
        self.cache.remove(&CacheKey::Item(Entity::Ventes, id));
        self.settle(Mutation::Delete).await
    }

    async fn settle(&self, mutation: Mutation) -> Result<(), ApiError> {
        match cache_policy(mutation) {
            CachePolicy::Invalidate => self.cache.invalidate(Entity::Ventes),
            CachePolicy::Refetch => {
                self.cache.invalidate(Entity::Ventes);
                self.refetch_all().await?;
            }
        }
        Ok(())
    }
}

impl_list_service!(VenteService, Vente);
impl_get_service!(VenteService, Vente);
impl_get_by_code_service!(VenteService, Vente);
impl_delete_service!(VenteService);
