use crate::api::client::StockClient;
use crate::api::models::{Role, RoleRequest};
use crate::core::cache::{CacheKey, Entity, QueryCache};
use crate::core::policy::{CachePolicy, Mutation, cache_policy};
use crate::error::ApiError;
use crate::{impl_delete_service, impl_get_service, impl_list_service};

const BASE: &str = "/roles";

/// Role administration, ADMIN only at the command layer.
pub struct RoleService {
    client: StockClient,
    cache: QueryCache,
}

impl RoleService {
    pub fn new(client: StockClient, cache: QueryCache) -> Self {
        Self { client, cache }
    }

    pub async fn get_all(&self) -> Result<Vec<Role>, ApiError> {
        if let Some(cached) = self.cache.get(&CacheKey::List(Entity::Roles)) {
            return Ok(cached);
        }
        self.refetch_all().await
    }

    async fn refetch_all(&self) -> Result<Vec<Role>, ApiError> {
        let roles: Vec<Role> = self.client.get_json(&format!("{BASE}/showAll")).await?;
        self.cache.put(CacheKey::List(Entity::Roles), &roles);
        Ok(roles)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Role, ApiError> {
        let key = CacheKey::Item(Entity::Roles, id);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }
        let role: Role = self.client.get_json(&format!("{BASE}/{id}")).await?;
        self.cache.put(key, &role);
        Ok(role)
    }

    pub async fn create(&self, request: &RoleRequest) -> Result<Role, ApiError> {
        let role = self
            .client
            .post_json(&format!("{BASE}/create"), request)
            .await?;
        self.settle(Mutation::Create).await?;
        Ok(role)
    }

    pub async fn update(&self, id: i64, request: &RoleRequest) -> Result<Role, ApiError> {
        let role = self
            .client
            .put_json(&format!("{BASE}/update/{id}"), request)
            .await?;
        self.settle(Mutation::Update).await?;
        Ok(role)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("{BASE}/delete/{id}")).await?;
        self.cache.remove(&CacheKey::Item(Entity::Roles, id));
        self.settle(Mutation::Delete).await
    }

    async fn settle(&self, mutation: Mutation) -> Result<(), ApiError> {
        match cache_policy(mutation) {
            CachePolicy::Invalidate => self.cache.invalidate(Entity::Roles),
            CachePolicy::Refetch => {
                self.cache.invalidate(Entity::Roles);
                self.refetch_all().await?;
            }
        }
        Ok(())
    }
}

impl_list_service!(RoleService, Role);
impl_get_service!(RoleService, Role);
impl_delete_service!(RoleService);
