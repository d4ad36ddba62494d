//! Resource service modules, one per domain entity. Each pairs the REST
//! endpoints with the shared query cache and the mutation consistency
//! policy from [`crate::core::policy`].

pub mod article_service;
pub mod auth_service;
pub mod categorie_service;
pub mod client_service;
pub mod commande_client_service;
pub mod commande_fournisseur_service;
pub mod entreprise_service;
pub mod fournisseur_service;
pub mod mvt_stk_service;
pub mod role_service;
pub mod traits;
pub mod utilisateur_service;
pub mod vente_service;
