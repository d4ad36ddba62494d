use crate::api::client::StockClient;
use crate::api::models::{Utilisateur, UtilisateurRequest};
use crate::core::cache::{CacheKey, Entity, QueryCache};
use crate::core::policy::{CachePolicy, Mutation, cache_policy};
use crate::error::ApiError;
use crate::{impl_delete_service, impl_get_service, impl_list_service};

const BASE: &str = "/utilisateurs";

/// Account administration. Restricted to ADMIN and MANAGER at the command
/// layer; the server enforces its own checks on top.
pub struct UtilisateurService {
    client: StockClient,
    cache: QueryCache,
}

impl UtilisateurService {
    pub fn new(client: StockClient, cache: QueryCache) -> Self {
        Self { client, cache }
    }

    pub async fn get_all(&self) -> Result<Vec<Utilisateur>, ApiError> {
        if let Some(cached) = self.cache.get(&CacheKey::List(Entity::Utilisateurs)) {
            return Ok(cached);
        }
        self.refetch_all().await
    }

    async fn refetch_all(&self) -> Result<Vec<Utilisateur>, ApiError> {
        let utilisateurs: Vec<Utilisateur> =
            self.client.get_json(&format!("{BASE}/showAll")).await?;
        self.cache
            .put(CacheKey::List(Entity::Utilisateurs), &utilisateurs);
        Ok(utilisateurs)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Utilisateur, ApiError> {
        let key = CacheKey::Item(Entity::Utilisateurs, id);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }
        let record: Utilisateur = self.client.get_json(&format!("{BASE}/{id}")).await?;
        self.cache.put(key, &record);
        Ok(record)
    }

    pub async fn create(&self, request: &UtilisateurRequest) -> Result<Utilisateur, ApiError> {
        let record = self
            .client
            .post_multipart(
                &format!("{BASE}/create"),
                &request.query(),
                "image",
                request.image.as_ref(),
            )
            .await?;
        self.settle(Mutation::Create).await?;
        Ok(record)
    }

    pub async fn update(
        &self,
        id: i64,
        request: &UtilisateurRequest,
    ) -> Result<Utilisateur, ApiError> {
        let record = self
            .client
            .put_multipart(
                &format!("{BASE}/update/{id}"),
                &request.query(),
                "image",
                request.image.as_ref(),
            )
            .await?;
        self.settle(Mutation::Update).await?;
        Ok(record)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("{BASE}/delete/{id}")).await?;
        self.cache.remove(&CacheKey::Item(Entity::Utilisateurs, id));
        self.settle(Mutation::Delete).await
    }

    async fn settle(&self, mutation: Mutation) -> Result<(), ApiError> {
        match cache_policy(mutation) {
            CachePolicy::Invalidate => self.cache.invalidate(Entity::Utilisateurs),
            CachePolicy::Refetch => {
                self.cache.invalidate(Entity::Utilisateurs);
                self.refetch_all().await?;
            }
        }
        Ok(())
    }
}

impl_list_service!(UtilisateurService, Utilisateur);
impl_get_service!(UtilisateurService, Utilisateur);
impl_delete_service!(UtilisateurService);
