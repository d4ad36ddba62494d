use crate::api::client::StockClient;
use crate::api::models::{MvtStk, MvtStkRequest};
use crate::core::cache::{CacheKey, Entity, QueryCache};
use crate::core::policy::{CachePolicy, Mutation, cache_policy};
use crate::error::ApiError;
use crate::{impl_delete_service, impl_get_service, impl_list_service};

const BASE: &str = "/mvtstk";

/// Stock movement journal. Movements are append-mostly; updates exist on
/// the server for corrections.
pub struct MvtStkService {
    client: StockClient,
    cache: QueryCache,
}

impl MvtStkService {
    pub fn new(client: StockClient, cache: QueryCache) -> Self {
        Self { client, cache }
    }

    pub async fn get_all(&self) -> Result<Vec<MvtStk>, ApiError> {
        if let Some(cached) = self.cache.get(&CacheKey::List(Entity::MvtStk)) {
            return Ok(cached);
        }
        self.refetch_all().await
    }

    async fn refetch_all(&self) -> Result<Vec<MvtStk>, ApiError> {
        let mvts: Vec<MvtStk> = self.client.get_json(&format!("{BASE}/showAll")).await?;
        self.cache.put(CacheKey::List(Entity::MvtStk), &mvts);
        Ok(mvts)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<MvtStk, ApiError> {
        let key = CacheKey::Item(Entity::MvtStk, id);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }
        let mvt: MvtStk = self.client.get_json(&format!("{BASE}/{id}")).await?;
        self.cache.put(key, &mvt);
        Ok(mvt)
    }

    pub async fn create(&self, request: &MvtStkRequest) -> Result<MvtStk, ApiError> {
        let mvt = self
            .client
            .post_json(&format!("{BASE}/create"), request)
            .await?;
        self.settle(Mutation::Create).await?;
        Ok(mvt)
    }

    pub async fn update(&self, id: i64, request: &MvtStkRequest) -> Result<MvtStk, ApiError> {
        let mvt = self
            .client
            .put_json(&format!("{BASE}/update/{id}"), request)
            .await?;
        self.settle(Mutation::Update).await?;
        Ok(mvt)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("{BASE}/delete/{id}")).await?;
        self.cache.remove(&CacheKey::Item(Entity::MvtStk, id));
        self.settle(Mutation::Delete).await
    }

    async fn settle(&self, mutation: Mutation) -> Result<(), ApiError> {
        match cache_policy(mutation) {
            CachePolicy::Invalidate => self.cache.invalidate(Entity::MvtStk),
            CachePolicy::Refetch => {
                self.cache.invalidate(Entity::MvtStk);
                self.refetch_all().await?;
            }
        }
        Ok(())
    }
}

impl_list_service!(MvtStkService, MvtStk);
impl_get_service!(MvtStkService, MvtStk);
impl_delete_service!(MvtStkService);
