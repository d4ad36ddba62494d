use crate::api::models::{
    Article, Categorie, CommandeClient, CommandeFournisseur, Contact, Entreprise, LigneCommandeClient,
    MvtStk, Role, Utilisateur, Vente,
};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};

/// Formatter for entity listings.
pub struct TableDisplay {
    use_colors: bool,
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDisplay {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn new_table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);

        let header_cells: Vec<Cell> = headers
            .iter()
            .map(|h| {
                if self.use_colors {
                    Cell::new(h).add_attribute(Attribute::Bold).fg(Color::Cyan)
                } else {
                    Cell::new(h)
                }
            })
            .collect();
        table.set_header(header_cells);
        table
    }

    pub fn render_articles(&self, articles: &[Article]) -> String {
        let mut table = self.new_table(&["ID", "Code", "Designation", "Prix HT", "TVA", "Prix TTC", "Categorie"]);
        for article in articles {
            table.add_row(vec![
                article.id.to_string(),
                article.code_article.clone(),
                article.designation.clone(),
                format!("{:.2}", article.prix_unitaire),
                format!("{:.2}", article.taux_tva),
                format!("{:.2}", article.prix_unitaire_ttc),
                article.categorie.designation.clone(),
            ]);
        }
        table.to_string()
    }

    pub fn render_categories(&self, categories: &[Categorie]) -> String {
        let mut table = self.new_table(&["ID", "Code", "Designation"]);
        for categorie in categories {
            table.add_row(vec![
                categorie.id.to_string(),
                categorie.code.clone(),
                categorie.designation.clone(),
            ]);
        }
        table.to_string()
    }

    /// Shared rendering for clients and fournisseurs.
    pub fn render_contacts(&self, contacts: &[Contact]) -> String {
        let mut table = self.new_table(&["ID", "Nom", "Prenom", "Email", "Telephone", "Ville"]);
        for contact in contacts {
            table.add_row(vec![
                contact.id.to_string(),
                contact.nom.clone(),
                contact.prenom.clone(),
                contact.email.clone(),
                contact.num_tel.clone(),
                contact.adresse.ville.clone(),
            ]);
        }
        table.to_string()
    }

    pub fn render_commandes_clients(&self, commandes: &[CommandeClient]) -> String {
        let mut table = self.new_table(&["ID", "Code", "Date", "Client", "Lignes"]);
        for commande in commandes {
            let client = commande
                .client
                .as_ref()
                .map(|c| format!("{} {}", c.prenom, c.nom))
                .unwrap_or_default();
            table.add_row(vec![
                commande.id.to_string(),
                commande.code.clone(),
                commande.date_commande.to_string(),
                client,
                commande.ligne_commande_clients.len().to_string(),
            ]);
        }
        table.to_string()
    }

    pub fn render_commandes_fournisseurs(&self, commandes: &[CommandeFournisseur]) -> String {
        let mut table = self.new_table(&["ID", "Code", "Date", "Fournisseur", "Lignes"]);
        for commande in commandes {
            let fournisseur = commande
                .fournisseur
                .as_ref()
                .map(|f| format!("{} {}", f.prenom, f.nom))
                .unwrap_or_default();
            table.add_row(vec![
                commande.id.to_string(),
                commande.code.clone(),
                commande.date_commande.to_string(),
                fournisseur,
                commande.ligne_commande_fournisseurs.len().to_string(),
            ]);
        }
        table.to_string()
    }

    pub fn render_lignes_commande(&self, lignes: &[LigneCommandeClient]) -> String {
        let mut table = self.new_table(&["ID", "Article", "Quantite", "Prix unitaire", "Total"]);
        for ligne in lignes {
            table.add_row(vec![
                ligne.id.to_string(),
                ligne.article.designation.clone(),
                ligne.quantite.to_string(),
                format!("{:.2}", ligne.prix_unitaire),
                format!("{:.2}", ligne.quantite * ligne.prix_unitaire),
            ]);
        }
        table.to_string()
    }

    pub fn render_ventes(&self, ventes: &[Vente]) -> String {
        let mut table = self.new_table(&["ID", "Code", "Date", "Commentaire", "Lignes"]);
        for vente in ventes {
            table.add_row(vec![
                vente.id.to_string(),
                vente.code.clone(),
                vente.date_vente.to_string(),
                vente.commentaire.clone(),
                vente.ligne_ventes.len().to_string(),
            ]);
        }
        table.to_string()
    }

    pub fn render_mvts(&self, mvts: &[MvtStk]) -> String {
        let mut table = self.new_table(&["ID", "Date", "Article", "Type", "Quantite"]);
        for mvt in mvts {
            let type_mvt = match mvt.type_mvt {
                crate::api::models::TypeMvt::Entree => "ENTREE",
                crate::api::models::TypeMvt::Sortie => "SORTIE",
            };
            table.add_row(vec![
                mvt.id.to_string(),
                mvt.date_mvt.format("%Y-%m-%d %H:%M").to_string(),
                mvt.article.designation.clone(),
                type_mvt.to_string(),
                mvt.quantite.to_string(),
            ]);
        }
        table.to_string()
    }

    pub fn render_roles(&self, roles: &[Role]) -> String {
        let mut table = self.new_table(&["ID", "Role", "Utilisateur"]);
        for role in roles {
            table.add_row(vec![
                role.id.to_string(),
                role.role_name.clone(),
                role.utilisateur_id.map(|id| id.to_string()).unwrap_or_default(),
            ]);
        }
        table.to_string()
    }

    pub fn render_utilisateurs(&self, utilisateurs: &[Utilisateur]) -> String {
        let mut table = self.new_table(&["ID", "Nom", "Prenom", "Email", "Roles"]);
        for utilisateur in utilisateurs {
            let roles: Vec<&str> = utilisateur
                .roles
                .iter()
                .map(|r| r.role_name.as_str())
                .collect();
            table.add_row(vec![
                utilisateur.id.to_string(),
                utilisateur.nom.clone(),
                utilisateur.prenom.clone(),
                utilisateur.email.clone(),
                roles.join(", "),
            ]);
        }
        table.to_string()
    }

    pub fn render_entreprises(&self, entreprises: &[Entreprise]) -> String {
        let mut table = self.new_table(&["ID", "Nom", "Email", "Telephone", "Ville"]);
        for entreprise in entreprises {
            table.add_row(vec![
                entreprise.id.to_string(),
                entreprise.nom_entreprise.clone(),
                entreprise.email.clone(),
                entreprise.num_tel.clone(),
                entreprise.adresse.ville.clone(),
            ]);
        }
        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categorie(id: i64, code: &str, designation: &str) -> Categorie {
        Categorie {
            id,
            code: code.to_string(),
            designation: designation.to_string(),
            entreprise_id: Some(1),
        }
    }

    #[test]
    fn test_render_categories_contains_rows() {
        let display = TableDisplay::new().with_colors(false);
        let output = display.render_categories(&[
            categorie(1, "INF", "Informatique"),
            categorie(2, "MOB", "Mobilier"),
        ]);
        assert!(output.contains("INF"));
        assert!(output.contains("Mobilier"));
        assert!(output.contains("Designation"));
    }

    #[test]
    fn test_render_articles_formats_prices() {
        let display = TableDisplay::new().with_colors(false);
        let article = Article {
            id: 7,
            code_article: "ART-007".to_string(),
            designation: "Clavier".to_string(),
            prix_unitaire: 50.0,
            taux_tva: 20.0,
            prix_unitaire_ttc: 60.0,
            photo: None,
            categorie: categorie(1, "INF", "Informatique"),
            entreprise: None,
        };
        let output = display.render_articles(&[article]);
        assert!(output.contains("50.00"));
        assert!(output.contains("60.00"));
        assert!(output.contains("ART-007"));
    }

    #[test]
    fn test_render_empty_list_still_has_header() {
        let display = TableDisplay::new().with_colors(false);
        let output = display.render_ventes(&[]);
        assert!(output.contains("Code"));
    }
}
