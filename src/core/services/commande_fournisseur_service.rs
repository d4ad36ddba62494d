use crate::api::client::StockClient;
use crate::api::models::{
    CommandeFournisseur, CommandeFournisseurRequest, LigneCommandeFournisseur,
    LigneCommandeFournisseurRequest,
};
use crate::core::cache::{CacheKey, Entity, QueryCache};
use crate::core::policy::{CachePolicy, Mutation, cache_policy};
use crate::error::ApiError;
use crate::{impl_delete_service, impl_get_by_code_service, impl_get_service, impl_list_service};

const BASE: &str = "/commandesfournisseurs";
const LIGNES_BASE: &str = "/lignecommandefournisseurs";

/// Supplier orders. Unlike customer orders the lines are a top-level
/// resource on the server, so line mutations address them directly.
pub struct CommandeFournisseurService {
    client: StockClient,
    cache: QueryCache,
}

impl CommandeFournisseurService {
    pub fn new(client: StockClient, cache: QueryCache) -> Self {
        Self { client, cache }
    }

    pub async fn get_all(&self) -> Result<Vec<CommandeFournisseur>, ApiError> {
        if let Some(cached) = self
            .cache
            .get(&CacheKey::List(Entity::CommandesFournisseurs))
        {
            return Ok(cached);
        }
        self.refetch_all().await
    }

    async fn refetch_all(&self) -> Result<Vec<CommandeFournisseur>, ApiError> {
        let commandes: Vec<CommandeFournisseur> =
            self.client.get_json(&format!("{BASE}/showAll")).await?;
        self.cache
            .put(CacheKey::List(Entity::CommandesFournisseurs), &commandes);
        Ok(commandes)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<CommandeFournisseur, ApiError> {
        let key = CacheKey::Item(Entity::CommandesFournisseurs, id);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }
        let commande: CommandeFournisseur = self.client.get_json(&format!("{BASE}/{id}")).await?;
        self.cache.put(key, &commande);
        Ok(commande)
    }

    pub async fn get_by_code(&self, code: &str) -> Result<CommandeFournisseur, ApiError> {
        self.client.get_json(&format!("{BASE}/code/{code}")).await
    }

    pub async fn create(
        &self,
        request: &CommandeFournisseurRequest,
    ) -> Result<CommandeFournisseur, ApiError> {
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
        request: &CommandeFournisseurRequest,
    ) -> Result<CommandeFournisseur, ApiError> {
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
            .remove(&CacheKey::Item(Entity::CommandesFournisseurs, id));
        self.settle(Mutation::Delete).await
    }

    pub async fn add_ligne(
        &self,
        request: &LigneCommandeFournisseurRequest,
    ) -> Result<LigneCommandeFournisseur, ApiError> {
        let ligne = self
            .client
            .post_json(&format!("{LIGNES_BASE}/create"), request)
            .await?;
        self.settle(Mutation::Create).await?;
        Ok(ligne)
    }

    pub async fn update_ligne(
        &self,
        ligne_id: i64,
        request: &LigneCommandeFournisseurRequest,
    ) -> Result<LigneCommandeFournisseur, ApiError> {
        let ligne = self
            .client
            .put_json(&format!("{LIGNES_BASE}/update/{ligne_id}"), request)
            .await?;
        self.settle(Mutation::Update).await?;
        Ok(ligne)
    }

    pub async fn remove_ligne(&self, ligne_id: i64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("{LIGNES_BASE}/delete/{ligne_id}"))
            .await?;
        self.settle(Mutation::Delete).await
    }

    async fn settle(&self, mutation: Mutation) -> Result<(), ApiError> {
        match cache_policy(mutation) {
            CachePolicy::Invalidate => self.cache.invalidate(Entity::CommandesFournisseurs),
            CachePolicy::Refetch => {
                self.cache.invalidate(Entity::CommandesFournisseurs);
                self.refetch_all().await?;
            }
        }
        Ok(())
    }
}

impl_list_service!(CommandeFournisseurService, CommandeFournisseur);
impl_get_service!(CommandeFournisseurService, CommandeFournisseur);
impl_get_by_code_service!(CommandeFournisseurService, CommandeFournisseur);
impl_delete_service!(CommandeFournisseurService);
