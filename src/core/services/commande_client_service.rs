use crate::api::client::StockClient;
use crate::api::models::{
    CommandeClient, CommandeClientRequest, LigneCommandeClient, LigneCommandeClientRequest,
};
use crate::core::cache::{CacheKey, Entity, QueryCache};
use crate::core::policy::{CachePolicy, Mutation, cache_policy};
use crate::error::ApiError;
use crate::{impl_delete_service, impl_get_by_code_service, impl_get_service, impl_list_service};

const BASE: &str = "/commandesclients";

/// Customer orders, including the order-line sub-resource. Line mutations
/// go through the same cache settlement as order mutations since cached
/// orders embed their lines.
pub struct CommandeClientService {
    client: StockClient,
    cache: QueryCache,
}

impl CommandeClientService {
    pub fn new(client: StockClient, cache: QueryCache) -> Self {
        Self { client, cache }
    }

    pub async fn get_all(&self) -> Result<Vec<CommandeClient>, ApiError> {
        if let Some(cached) = self.cache.get(&CacheKey::List(Entity::CommandesClients)) {
            return Ok(cached);
        }
        self.refetch_all().await
    }

    async fn refetch_all(&self) -> Result<Vec<CommandeClient>, ApiError> {
        let commandes: Vec<CommandeClient> =
            self.client.get_json(&format!("{BASE}/showAll")).await?;
        self.cache
            .put(CacheKey::List(Entity::CommandesClients), &commandes);
        Ok(commandes)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<CommandeClient, ApiError> {
        let key = CacheKey::Item(Entity::CommandesClients, id);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }
        let commande: CommandeClient = self.client.get_json(&format!("{BASE}/{id}")).await?;
        self.cache.put(key, &commande);
        Ok(commande)
    }

    pub async fn get_by_code(&self, code: &str) -> Result<CommandeClient, ApiError> {
        self.client.get_json(&format!("{BASE}/code/{code}")).await
    }

    pub async fn create(&self, request: &CommandeClientRequest) -> Result<CommandeClient, ApiError> {
        let commande = self
            .client
            .post_json(&format!("{BASE}/create"), request)
            .await?;
        self.settle(Mutation::Create).await?;
        Ok(commande)
    }

    pub async fn update(
        &self,
        id: i64,
        request: &CommandeClientRequest,
    ) -> Result<CommandeClient, ApiError> {
        let commande = self
            .client
            .put_json(&format!("{BASE}/update/{id}"), request)
            .await?;
        self.settle(Mutation::Update).await?;
        Ok(commande)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("{BASE}/delete/{id}")).await?;
        self.cache
            .remove(&CacheKey::Item(Entity::CommandesClients, id));
        self.settle(Mutation::Delete).await
    }

    pub async fn get_lignes(&self, commande_id: i64) -> Result<Vec<LigneCommandeClient>, ApiError> {
        self.client
            .get_json(&format!("{BASE}/{commande_id}/lignes"))
            .await
    }

    pub async fn add_ligne(
        &self,
        commande_id: i64,
        request: &LigneCommandeClientRequest,
    ) -> Result<LigneCommandeClient, ApiError> {
        let ligne = self
            .client
            .post_json(&format!("{BASE}/{commande_id}/lignes"), request)
            .await?;
        self.invalidate_commande(commande_id);
        self.settle(Mutation::Create).await?;
        Ok(ligne)
    }

    pub async fn update_ligne(
        &self,
        commande_id: i64,
        ligne_id: i64,
        request: &LigneCommandeClientRequest,
    ) -> Result<LigneCommandeClient, ApiError> {
        let ligne = self
            .client
            .put_json(&format!("{BASE}/{commande_id}/lignes/{ligne_id}"), request)
            .await?;
        self.invalidate_commande(commande_id);
        self.settle(Mutation::Update).await?;
        Ok(ligne)
    }

    pub async fn remove_ligne(&self, commande_id: i64, ligne_id: i64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("{BASE}/{commande_id}/lignes/{ligne_id}"))
            .await?;
        self.invalidate_commande(commande_id);
        self.settle(Mutation::Delete).await
    }

    pub async fn remove_all_lignes(&self, commande_id: i64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("{BASE}/{commande_id}/lignes"))
            .await?;
        self.invalidate_commande(commande_id);
        self.settle(Mutation::Delete).await
    }

    fn invalidate_commande(&self, commande_id: i64) {
        self.cache
            .remove(&CacheKey::Item(Entity::CommandesClients, commande_id));
    }

    async fn settle(&self, mutation: Mutation) -> Result<(), ApiError> {
        match cache_policy(mutation) {
            CachePolicy::Invalidate => self.cache.invalidate(Entity::CommandesClients),
            CachePolicy::Refetch => {
                self.cache.invalidate(Entity::CommandesClients);
                self.refetch_all().await?;
            }
        }
        Ok(())
    }
}

impl_list_service!(CommandeClientService, CommandeClient);
impl_get_service!(CommandeClientService, CommandeClient);
impl_get_by_code_service!(CommandeClientService, CommandeClient);
impl_delete_service!(CommandeClientService);
