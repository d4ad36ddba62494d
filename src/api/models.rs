//! DTOs mirrored from the gestion-de-stock backend.
//!
//! Field names follow the backend's camelCase wire format. Business
//! invariants (code uniqueness, stock non-negativity, order totals) are
//! enforced server-side; these records only carry data. Most records are
//! scoped to an owning `entrepriseId` (multi-tenant).

use crate::error::StorageError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adresse {
    #[serde(default)]
    pub id: Option<i64>,
    pub adresse1: String,
    #[serde(default)]
    pub adresse2: Option<String>,
    pub ville: String,
    pub code_postal: String,
    pub pays: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entreprise {
    pub id: i64,
    pub nom_entreprise: String,
    pub description: String,
    #[serde(default)]
    pub photo: Option<String>,
    pub email: String,
    pub adresse: Adresse,
    pub code_fiscal: String,
    pub num_tel: String,
    pub ste_web: String,
    #[serde(default)]
    pub creation_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Categorie {
    pub id: i64,
    pub code: String,
    pub designation: String,
    #[serde(default)]
    pub entreprise_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub code_article: String,
    pub designation: String,
    pub prix_unitaire: f64,
    pub taux_tva: f64,
    pub prix_unitaire_ttc: f64,
    #[serde(default)]
    pub photo: Option<String>,
    pub categorie: Categorie,
    #[serde(default)]
    pub entreprise: Option<Entreprise>,
}

/// Customer or supplier contact record; the backend uses the same shape
/// for both `/clients` and `/fournisseurs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub adresse: Adresse,
    #[serde(default)]
    pub photo: Option<String>,
    pub email: String,
    pub num_tel: String,
    #[serde(default)]
    pub entreprise: Option<Entreprise>,
}

pub type Client = Contact;
pub type Fournisseur = Contact;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandeClient {
    pub id: i64,
    pub code: String,
    pub date_commande: NaiveDate,
    pub entreprise_id: i64,
    #[serde(default)]
    pub client: Option<Client>,
    #[serde(default)]
    pub ligne_commande_clients: Vec<LigneCommandeClient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LigneCommandeClient {
    pub id: i64,
    pub article: Article,
    pub quantite: f64,
    pub prix_unitaire: f64,
    pub entreprise_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandeFournisseur {
    pub id: i64,
    pub code: String,
    pub date_commande: NaiveDate,
    pub entreprise_id: i64,
    #[serde(default)]
    pub fournisseur: Option<Fournisseur>,
    #[serde(default)]
    pub ligne_commande_fournisseurs: Vec<LigneCommandeFournisseur>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LigneCommandeFournisseur {
    pub id: i64,
    pub article: Article,
    pub quantite: f64,
    pub prix_unitaire: f64,
    pub entreprise_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vente {
    pub id: i64,
    pub code: String,
    pub date_vente: NaiveDate,
    #[serde(default)]
    pub commentaire: String,
    pub entreprise_id: i64,
    pub commande_id: i64,
    #[serde(default)]
    pub ligne_ventes: Vec<LigneVente>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LigneVente {
    pub id: i64,
    pub article: Article,
    pub quantite: f64,
    pub prix_unitaire: f64,
    pub entreprise_id: i64,
}

/// Inbound/outbound inventory change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeMvt {
    Entree,
    Sortie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MvtStk {
    pub id: i64,
    pub date_mvt: DateTime<Utc>,
    pub quantite: f64,
    pub type_mvt: TypeMvt,
    pub article: Article,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: i64,
    pub role_name: String,
    #[serde(default)]
    pub utilisateur_id: Option<i64>,
    #[serde(default)]
    pub entreprise_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Utilisateur {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    #[serde(default)]
    pub date_de_naissance: Option<NaiveDate>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub entreprise_id: Option<i64>,
    #[serde(default)]
    pub adresse: Option<Adresse>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

// Authentication models

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: Utilisateur,
}

// Request DTOs. Create and update share the same payload shape on this
// backend, so a single request type serves both operations.

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorieRequest {
    pub code: String,
    pub designation: String,
    pub entreprise_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandeClientRequest {
    pub code: String,
    pub date_commande: NaiveDate,
    pub entreprise_id: i64,
    pub client_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LigneCommandeClientRequest {
    pub commande_client_id: i64,
    pub article_id: i64,
    pub quantite: f64,
    pub prix_unitaire: f64,
    pub entreprise_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandeFournisseurRequest {
    pub code: String,
    pub date_commande: NaiveDate,
    pub entreprise_id: i64,
    pub fournisseur_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LigneCommandeFournisseurRequest {
    pub commande_fournisseur_id: i64,
    pub article_id: i64,
    pub quantite: f64,
    pub prix_unitaire: f64,
    pub entreprise_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenteRequest {
    pub code: String,
    pub date_vente: NaiveDate,
    pub commentaire: String,
    pub entreprise_id: i64,
    pub commande_id: i64,
    pub ligne_ventes: Vec<LigneVenteRequest>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LigneVenteRequest {
    pub article_id: i64,
    pub quantite: f64,
    pub prix_unitaire: f64,
    pub entreprise_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MvtStkRequest {
    pub date_mvt: DateTime<Utc>,
    pub quantite: f64,
    pub type_mvt: TypeMvt,
    pub article_id: i64,
    pub entreprise_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    pub role_name: String,
    pub utilisateur_id: i64,
    pub entreprise_id: i64,
}

/// File attachment for multipart create/update calls. Loaded eagerly so
/// the request builder stays synchronous.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn read(path: &Path) -> Result<Self, StorageError> {
        let bytes = std::fs::read(path).map_err(|source| StorageError::FileIo {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { file_name, bytes })
    }
}

// Entities with an optional photo/image submit create/update as multipart
// form data with scalar fields passed as query parameters. This is a
// backend convention, not a choice of this layer; `query()` builds those
// parameter pairs.

#[derive(Debug, Clone)]
pub struct ArticleRequest {
    pub code_article: String,
    pub designation: String,
    pub categorie_id: i64,
    pub entreprise_id: i64,
    pub prix_unitaire: f64,
    pub taux_tva: f64,
    pub prix_unitaire_ttc: f64,
    pub image: Option<FileUpload>,
}

impl ArticleRequest {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("codeArticle", self.code_article.clone()),
            ("designation", self.designation.clone()),
            ("categorieId", self.categorie_id.to_string()),
            ("entrepriseId", self.entreprise_id.to_string()),
            ("prixUnitaire", self.prix_unitaire.to_string()),
            ("tauxTva", self.taux_tva.to_string()),
            ("prixUnitaireTtc", self.prix_unitaire_ttc.to_string()),
        ]
    }
}

/// Shared request shape for `/clients` and `/fournisseurs`.
#[derive(Debug, Clone)]
pub struct ContactRequest {
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub adresse1: String,
    pub adresse2: Option<String>,
    pub ville: String,
    pub code_postal: String,
    pub pays: String,
    pub num_tel: String,
    pub entreprise_id: i64,
    pub photo: Option<FileUpload>,
}

impl ContactRequest {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("nom", self.nom.clone()),
            ("prenom", self.prenom.clone()),
            ("email", self.email.clone()),
            ("adresse1", self.adresse1.clone()),
            ("ville", self.ville.clone()),
            ("codePostal", self.code_postal.clone()),
            ("pays", self.pays.clone()),
            ("numTel", self.num_tel.clone()),
            ("entrepriseId", self.entreprise_id.to_string()),
        ];
        if let Some(adresse2) = &self.adresse2 {
            pairs.push(("adresse2", adresse2.clone()));
        }
        pairs
    }
}

pub type ClientRequest = ContactRequest;
pub type FournisseurRequest = ContactRequest;

#[derive(Debug, Clone)]
pub struct UtilisateurRequest {
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub mot_de_passe: String,
    pub date_de_naissance: NaiveDate,
    pub adresse1: String,
    pub adresse2: Option<String>,
    pub ville: String,
    pub code_postal: String,
    pub pays: String,
    pub entreprise_id: i64,
    pub image: Option<FileUpload>,
}

impl UtilisateurRequest {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("nom", self.nom.clone()),
            ("prenom", self.prenom.clone()),
            ("email", self.email.clone()),
            ("motDePasse", self.mot_de_passe.clone()),
            ("dateDeNaissance", self.date_de_naissance.to_string()),
            ("adresse1", self.adresse1.clone()),
            ("ville", self.ville.clone()),
            ("codePostal", self.code_postal.clone()),
            ("pays", self.pays.clone()),
            ("entrepriseId", self.entreprise_id.to_string()),
        ];
        if let Some(adresse2) = &self.adresse2 {
            pairs.push(("adresse2", adresse2.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone)]
pub struct EntrepriseRequest {
    pub nom_entreprise: String,
    pub description: String,
    pub email: String,
    pub adresse1: String,
    pub adresse2: Option<String>,
    pub ville: String,
    pub code_postal: String,
    pub pays: String,
    pub code_fiscal: String,
    pub num_tel: String,
    pub ste_web: String,
    pub photo: Option<FileUpload>,
}

impl EntrepriseRequest {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("nomEntreprise", self.nom_entreprise.clone()),
            ("description", self.description.clone()),
            ("email", self.email.clone()),
            ("adresse1", self.adresse1.clone()),
            ("ville", self.ville.clone()),
            ("codePostal", self.code_postal.clone()),
            ("pays", self.pays.clone()),
            ("codeFiscal", self.code_fiscal.clone()),
            ("numTel", self.num_tel.clone()),
            ("steWeb", self.ste_web.clone()),
        ];
        if let Some(adresse2) = &self.adresse2 {
            pairs.push(("adresse2", adresse2.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_wire_format_is_camel_case() {
        let json = r#"{
            "id": 7,
            "codeArticle": "ART-007",
            "designation": "Clavier mécanique",
            "prixUnitaire": 50.0,
            "tauxTva": 20.0,
            "prixUnitaireTtc": 60.0,
            "photo": null,
            "categorie": {"id": 1, "code": "INF", "designation": "Informatique", "entrepriseId": 3}
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.code_article, "ART-007");
        assert_eq!(article.categorie.entreprise_id, Some(3));
        assert!(article.entreprise.is_none());

        let round = serde_json::to_value(&article).unwrap();
        assert_eq!(round["prixUnitaireTtc"], 60.0);
        assert!(round.get("prix_unitaire_ttc").is_none());
    }

    #[test]
    fn test_type_mvt_screaming_snake_case() {
        assert_eq!(serde_json::to_string(&TypeMvt::Entree).unwrap(), "\"ENTREE\"");
        let parsed: TypeMvt = serde_json::from_str("\"SORTIE\"").unwrap();
        assert_eq!(parsed, TypeMvt::Sortie);
    }

    #[test]
    fn test_auth_response_deserialization() {
        let json = r#"{
            "token": "jwt-token",
            "user": {
                "id": 2,
                "nom": "Durand",
                "prenom": "Alice",
                "email": "alice@example.test",
                "roles": [
                    {"id": 1, "roleName": "manager", "utilisateurId": 2, "entrepriseId": 5},
                    {"id": 2, "roleName": "employee", "utilisateurId": 2, "entrepriseId": 5}
                ]
            }
        }"#;
        let response: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.token, "jwt-token");
        assert_eq!(response.user.roles.len(), 2);
        assert_eq!(response.user.roles[0].role_name, "manager");
    }

    #[test]
    fn test_commande_client_defaults_empty_lines() {
        let json = r#"{
            "id": 4,
            "code": "CMD-004",
            "dateCommande": "2024-03-01",
            "entrepriseId": 1
        }"#;
        let commande: CommandeClient = serde_json::from_str(json).unwrap();
        assert!(commande.ligne_commande_clients.is_empty());
        assert!(commande.client.is_none());
    }

    #[test]
    fn test_article_request_query_pairs() {
        let request = ArticleRequest {
            code_article: "ART-010".to_string(),
            designation: "Souris".to_string(),
            categorie_id: 2,
            entreprise_id: 1,
            prix_unitaire: 10.0,
            taux_tva: 20.0,
            prix_unitaire_ttc: 12.0,
            image: None,
        };
        let query = request.query();
        assert_eq!(query.len(), 7);
        assert!(query.contains(&("codeArticle", "ART-010".to_string())));
        assert!(query.contains(&("prixUnitaireTtc", "12".to_string())));
    }

    #[test]
    fn test_contact_request_optional_adresse2() {
        let mut request = ContactRequest {
            nom: "Martin".to_string(),
            prenom: "Paul".to_string(),
            email: "paul@example.test".to_string(),
            adresse1: "1 rue de la Paix".to_string(),
            adresse2: None,
            ville: "Paris".to_string(),
            code_postal: "75001".to_string(),
            pays: "France".to_string(),
            num_tel: "0601020304".to_string(),
            entreprise_id: 1,
            photo: None,
        };
        assert!(!request.query().iter().any(|(k, _)| *k == "adresse2"));

        request.adresse2 = Some("Bâtiment B".to_string());
        assert!(request.query().iter().any(|(k, _)| *k == "adresse2"));
    }

    #[test]
    fn test_vente_request_serializes_lines() {
        let request = VenteRequest {
            code: "VTE-001".to_string(),
            date_vente: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            commentaire: "comptant".to_string(),
            entreprise_id: 1,
            commande_id: 9,
            ligne_ventes: vec![LigneVenteRequest {
                article_id: 7,
                quantite: 2.0,
                prix_unitaire: 50.0,
                entreprise_id: 1,
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["ligneVentes"][0]["articleId"], 7);
        assert_eq!(value["dateVente"], "2024-05-02");
    }
}
