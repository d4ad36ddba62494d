use crate::api::models::{
    ArticleRequest, CategorieRequest, CommandeClientRequest, CommandeFournisseurRequest,
    ContactRequest, EntrepriseRequest, FileUpload, LigneCommandeClientRequest,
    LigneCommandeFournisseurRequest, LigneVenteRequest, MvtStkRequest, RoleRequest, TypeMvt,
    UtilisateurRequest, VenteRequest,
};
use crate::cli::dispatcher::Dispatcher;
use crate::cli::main_types::{
    ArticleArgs, ArticleCommands, CategorieCommands, ClientCommands, CommandeClientCommands,
    CommandeFournisseurCommands, ContactArgs, EntrepriseArgs, EntrepriseCommands,
    FournisseurCommands, LigneArgs, MvtDirection, MvtStkCommands, RoleCommands,
    UtilisateurArgs, UtilisateurCommands, VenteCommands,
};
use crate::core::access::Route;
use crate::core::services::article_service::ArticleService;
use crate::core::services::categorie_service::CategorieService;
use crate::core::services::client_service::ClientService;
use crate::core::services::commande_client_service::CommandeClientService;
use crate::core::services::commande_fournisseur_service::CommandeFournisseurService;
use crate::core::services::entreprise_service::EntrepriseService;
use crate::core::services::fournisseur_service::FournisseurService;
use crate::core::services::mvt_stk_service::MvtStkService;
use crate::core::services::role_service::RoleService;
use crate::core::services::utilisateur_service::UtilisateurService;
use crate::core::services::vente_service::VenteService;
use crate::display::notify_success;
use crate::display::table::TableDisplay;
use crate::error::{AppError, CliError};
use chrono::Utc;
use serde::Serialize;
use std::path::Path;

fn print_record<T: Serialize>(record: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(record).map_err(|e| {
        AppError::Cli(CliError::InvalidArguments(format!(
            "Failed to render record: {}",
            e
        )))
    })?;
    println!("{}", rendered);
    Ok(())
}

fn load_upload(path: Option<&Path>) -> Result<Option<FileUpload>, AppError> {
    path.map(FileUpload::read).transpose().map_err(AppError::from)
}

fn article_request(args: ArticleArgs) -> Result<ArticleRequest, AppError> {
    let image = load_upload(args.image.as_deref())?;
    Ok(ArticleRequest {
        code_article: args.code_article,
        designation: args.designation,
        categorie_id: args.categorie_id,
        entreprise_id: args.entreprise_id,
        prix_unitaire: args.prix_unitaire,
        taux_tva: args.taux_tva,
        prix_unitaire_ttc: args.prix_unitaire_ttc,
        image,
    })
}

fn contact_request(args: ContactArgs) -> Result<ContactRequest, AppError> {
    let photo = load_upload(args.photo.as_deref())?;
    Ok(ContactRequest {
        nom: args.nom,
        prenom: args.prenom,
        email: args.email,
        adresse1: args.adresse1,
        adresse2: args.adresse2,
        ville: args.ville,
        code_postal: args.code_postal,
        pays: args.pays,
        num_tel: args.num_tel,
        entreprise_id: args.entreprise_id,
        photo,
    })
}

fn utilisateur_request(args: UtilisateurArgs) -> Result<UtilisateurRequest, AppError> {
    let image = load_upload(args.image.as_deref())?;
    Ok(UtilisateurRequest {
        nom: args.nom,
        prenom: args.prenom,
        email: args.email,
        mot_de_passe: args.mot_de_passe,
        date_de_naissance: args.date_de_naissance,
        adresse1: args.adresse1,
        adresse2: args.adresse2,
        ville: args.ville,
        code_postal: args.code_postal,
        pays: args.pays,
        entreprise_id: args.entreprise_id,
        image,
    })
}

fn entreprise_request(args: EntrepriseArgs) -> Result<EntrepriseRequest, AppError> {
    let photo = load_upload(args.photo.as_deref())?;
    Ok(EntrepriseRequest {
        nom_entreprise: args.nom_entreprise,
        description: args.description,
        email: args.email,
        adresse1: args.adresse1,
        adresse2: args.adresse2,
        ville: args.ville,
        code_postal: args.code_postal,
        pays: args.pays,
        code_fiscal: args.code_fiscal,
        num_tel: args.num_tel,
        ste_web: args.ste_web,
        photo,
    })
}

/// Parse a sale line argument of the form `articleId:quantite:prixUnitaire`.
fn parse_ligne_vente(spec: &str, entreprise_id: i64) -> Result<LigneVenteRequest, AppError> {
    let invalid = || {
        AppError::Cli(CliError::InvalidArguments(format!(
            "Invalid line '{}', expected articleId:quantite:prixUnitaire",
            spec
        )))
    };
    let mut parts = spec.split(':');
    let article_id = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
    let quantite = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
    let prix_unitaire = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(LigneVenteRequest {
        article_id,
        quantite,
        prix_unitaire,
        entreprise_id,
    })
}

impl From<MvtDirection> for TypeMvt {
    fn from(direction: MvtDirection) -> Self {
        match direction {
            MvtDirection::Entree => TypeMvt::Entree,
            MvtDirection::Sortie => TypeMvt::Sortie,
        }
    }
}

impl Dispatcher {
    pub(crate) async fn handle_article_command(
        &self,
        command: ArticleCommands,
    ) -> Result<(), AppError> {
        self.guard(Route::Articles)?;
        let service = ArticleService::new(self.build_client()?, self.build_cache());

        match command {
            ArticleCommands::List => {
                let articles = service.get_all().await?;
                println!("{}", TableDisplay::new().render_articles(&articles));
                Ok(())
            }
            ArticleCommands::Get { id } => print_record(&service.get_by_id(id).await?),
            ArticleCommands::Code { code } => print_record(&service.get_by_code(&code).await?),
            ArticleCommands::Create { args } => {
                let article = service.create(&article_request(args)?).await?;
                notify_success(&format!(
                    "Article '{}' created (id {})",
                    article.code_article, article.id
                ));
                Ok(())
            }
            ArticleCommands::Update { id, args } => {
                let article = service.update(id, &article_request(args)?).await?;
                notify_success(&format!("Article '{}' updated", article.code_article));
                Ok(())
            }
            ArticleCommands::Delete { id } => {
                service.delete(id).await?;
                notify_success(&format!("Article {} deleted", id));
                Ok(())
            }
        }
    }

    pub(crate) async fn handle_categorie_command(
        &self,
        command: CategorieCommands,
    ) -> Result<(), AppError> {
        self.guard(Route::Categories)?;
        let service = CategorieService::new(self.build_client()?, self.build_cache());

        match command {
            CategorieCommands::List => {
                let categories = service.get_all().await?;
                println!("{}", TableDisplay::new().render_categories(&categories));
                Ok(())
            }
            CategorieCommands::Get { id } => print_record(&service.get_by_id(id).await?),
            CategorieCommands::Code { code } => print_record(&service.get_by_code(&code).await?),
            CategorieCommands::Create {
                code,
                designation,
                entreprise_id,
            } => {
                let categorie = service
                    .create(&CategorieRequest {
                        code,
                        designation,
                        entreprise_id,
                    })
                    .await?;
                notify_success(&format!(
                    "Category '{}' created (id {})",
                    categorie.code, categorie.id
                ));
                Ok(())
            }
            CategorieCommands::Update {
                id,
                code,
                designation,
                entreprise_id,
            } => {
                let categorie = service
                    .update(
                        id,
                        &CategorieRequest {
                            code,
                            designation,
                            entreprise_id,
                        },
                    )
                    .await?;
                notify_success(&format!("Category '{}' updated", categorie.code));
                Ok(())
            }
            CategorieCommands::Delete { id } => {
                service.delete(id).await?;
                notify_success(&format!("Category {} deleted", id));
                Ok(())
            }
        }
    }

    pub(crate) async fn handle_client_command(
        &self,
        command: ClientCommands,
    ) -> Result<(), AppError> {
        self.guard(Route::Clients)?;
        let service = ClientService::new(self.build_client()?, self.build_cache());

        match command {
            ClientCommands::List => {
                let clients = service.get_all().await?;
                println!("{}", TableDisplay::new().render_contacts(&clients));
                Ok(())
            }
            ClientCommands::Get { id } => print_record(&service.get_by_id(id).await?),
            ClientCommands::Create { args } => {
                let client = service.create(&contact_request(args)?).await?;
                notify_success(&format!(
                    "Client {} {} created (id {})",
                    client.prenom, client.nom, client.id
                ));
                Ok(())
            }
            ClientCommands::Update { id, args } => {
                let client = service.update(id, &contact_request(args)?).await?;
                notify_success(&format!("Client {} {} updated", client.prenom, client.nom));
                Ok(())
            }
            ClientCommands::Delete { id } => {
                service.delete(id).await?;
                notify_success(&format!("Client {} deleted", id));
                Ok(())
            }
        }
    }

    pub(crate) async fn handle_fournisseur_command(
        &self,
        command: FournisseurCommands,
    ) -> Result<(), AppError> {
        self.guard(Route::Fournisseurs)?;
        let service = FournisseurService::new(self.build_client()?, self.build_cache());

        match command {
            FournisseurCommands::List => {
                let fournisseurs = service.get_all().await?;
                println!("{}", TableDisplay::new().render_contacts(&fournisseurs));
                Ok(())
            }
            FournisseurCommands::Get { id } => print_record(&service.get_by_id(id).await?),
            FournisseurCommands::Create { args } => {
                let fournisseur = service.create(&contact_request(args)?).await?;
                notify_success(&format!(
                    "Fournisseur {} {} created (id {})",
                    fournisseur.prenom, fournisseur.nom, fournisseur.id
                ));
                Ok(())
            }
            FournisseurCommands::Update { id, args } => {
                let fournisseur = service.update(id, &contact_request(args)?).await?;
                notify_success(&format!(
                    "Fournisseur {} {} updated",
                    fournisseur.prenom, fournisseur.nom
                ));
                Ok(())
            }
            FournisseurCommands::Delete { id } => {
                service.delete(id).await?;
                notify_success(&format!("Fournisseur {} deleted", id));
                Ok(())
            }
        }
    }

    pub(crate) async fn handle_commande_client_command(
        &self,
        command: CommandeClientCommands,
    ) -> Result<(), AppError> {
        self.guard(Route::CommandesClients)?;
        let service = CommandeClientService::new(self.build_client()?, self.build_cache());

        match command {
            CommandeClientCommands::List => {
                let commandes = service.get_all().await?;
                println!("{}", TableDisplay::new().render_commandes_clients(&commandes));
                Ok(())
            }
            CommandeClientCommands::Get { id } => print_record(&service.get_by_id(id).await?),
            CommandeClientCommands::Code { code } => {
                print_record(&service.get_by_code(&code).await?)
            }
            CommandeClientCommands::Create {
                code,
                date,
                entreprise_id,
                client_id,
            } => {
                let commande = service
                    .create(&CommandeClientRequest {
                        code,
                        date_commande: date,
                        entreprise_id,
                        client_id,
                    })
                    .await?;
                notify_success(&format!(
                    "Order '{}' created (id {})",
                    commande.code, commande.id
                ));
                Ok(())
            }
            CommandeClientCommands::Update {
                id,
                code,
                date,
                entreprise_id,
                client_id,
            } => {
                let commande = service
                    .update(
                        id,
                        &CommandeClientRequest {
                            code,
                            date_commande: date,
                            entreprise_id,
                            client_id,
                        },
                    )
                    .await?;
                notify_success(&format!("Order '{}' updated", commande.code));
                Ok(())
            }
            CommandeClientCommands::Delete { id } => {
                service.delete(id).await?;
                notify_success(&format!("Order {} deleted", id));
                Ok(())
            }
            CommandeClientCommands::Lignes { id } => {
                let lignes = service.get_lignes(id).await?;
                println!("{}", TableDisplay::new().render_lignes_commande(&lignes));
                Ok(())
            }
            CommandeClientCommands::AddLigne { id, args } => {
                let ligne = service
                    .add_ligne(id, &ligne_commande_client_request(id, args))
                    .await?;
                notify_success(&format!("Line {} added to order {}", ligne.id, id));
                Ok(())
            }
            CommandeClientCommands::UpdateLigne { id, ligne_id, args } => {
                service
                    .update_ligne(id, ligne_id, &ligne_commande_client_request(id, args))
                    .await?;
                notify_success(&format!("Line {} of order {} updated", ligne_id, id));
                Ok(())
            }
            CommandeClientCommands::RemoveLigne { id, ligne_id } => {
                service.remove_ligne(id, ligne_id).await?;
                notify_success(&format!("Line {} removed from order {}", ligne_id, id));
                Ok(())
            }
            CommandeClientCommands::ClearLignes { id } => {
                service.remove_all_lignes(id).await?;
                notify_success(&format!("All lines removed from order {}", id));
                Ok(())
            }
        }
    }

    pub(crate) async fn handle_commande_fournisseur_command(
        &self,
        command: CommandeFournisseurCommands,
    ) -> Result<(), AppError> {
        self.guard(Route::CommandesFournisseurs)?;
        let service = CommandeFournisseurService::new(self.build_client()?, self.build_cache());

        match command {
            CommandeFournisseurCommands::List => {
                let commandes = service.get_all().await?;
                println!(
                    "{}",
                    TableDisplay::new().render_commandes_fournisseurs(&commandes)
                );
                Ok(())
            }
            CommandeFournisseurCommands::Get { id } => print_record(&service.get_by_id(id).await?),
            CommandeFournisseurCommands::Code { code } => {
                print_record(&service.get_by_code(&code).await?)
            }
            CommandeFournisseurCommands::Create {
                code,
                date,
                entreprise_id,
                fournisseur_id,
            } => {
                let commande = service
                    .create(&CommandeFournisseurRequest {
                        code,
                        date_commande: date,
                        entreprise_id,
                        fournisseur_id,
                    })
                    .await?;
                notify_success(&format!(
                    "Supplier order '{}' created (id {})",
                    commande.code, commande.id
                ));
                Ok(())
            }
            CommandeFournisseurCommands::Update {
                id,
                code,
                date,
                entreprise_id,
                fournisseur_id,
            } => {
                let commande = service
                    .update(
                        id,
                        &CommandeFournisseurRequest {
                            code,
                            date_commande: date,
                            entreprise_id,
                            fournisseur_id,
                        },
                    )
                    .await?;
                notify_success(&format!("Supplier order '{}' updated", commande.code));
                Ok(())
            }
            CommandeFournisseurCommands::Delete { id } => {
                service.delete(id).await?;
                notify_success(&format!("Supplier order {} deleted", id));
                Ok(())
            }
            CommandeFournisseurCommands::AddLigne { commande_id, args } => {
                let ligne = service
                    .add_ligne(&LigneCommandeFournisseurRequest {
                        commande_fournisseur_id: commande_id,
                        article_id: args.article_id,
                        quantite: args.quantite,
                        prix_unitaire: args.prix_unitaire,
                        entreprise_id: args.entreprise_id,
                    })
                    .await?;
                notify_success(&format!(
                    "Line {} added to supplier order {}",
                    ligne.id, commande_id
                ));
                Ok(())
            }
            CommandeFournisseurCommands::UpdateLigne {
                ligne_id,
                commande_id,
                args,
            } => {
                service
                    .update_ligne(
                        ligne_id,
                        &LigneCommandeFournisseurRequest {
                            commande_fournisseur_id: commande_id,
                            article_id: args.article_id,
                            quantite: args.quantite,
                            prix_unitaire: args.prix_unitaire,
                            entreprise_id: args.entreprise_id,
                        },
                    )
                    .await?;
                notify_success(&format!("Supplier order line {} updated", ligne_id));
                Ok(())
            }
            CommandeFournisseurCommands::RemoveLigne { ligne_id } => {
                service.remove_ligne(ligne_id).await?;
                notify_success(&format!("Supplier order line {} removed", ligne_id));
                Ok(())
            }
        }
    }

    pub(crate) async fn handle_vente_command(&self, command: VenteCommands) -> Result<(), AppError> {
        self.guard(Route::Ventes)?;
        let service = VenteService::new(self.build_client()?, self.build_cache());

        match command {
            VenteCommands::List => {
                let ventes = service.get_all().await?;
                println!("{}", TableDisplay::new().render_ventes(&ventes));
                Ok(())
            }
            VenteCommands::Get { id } => print_record(&service.get_by_id(id).await?),
            VenteCommands::Code { code } => print_record(&service.get_by_code(&code).await?),
            VenteCommands::Create {
                code,
                date,
                commentaire,
                entreprise_id,
                commande_id,
                ligne,
            } => {
                let ligne_ventes = ligne
                    .iter()
                    .map(|spec| parse_ligne_vente(spec, entreprise_id))
                    .collect::<Result<Vec<_>, _>>()?;
                let vente = service
                    .create(&VenteRequest {
                        code,
                        date_vente: date,
                        commentaire,
                        entreprise_id,
                        commande_id,
                        ligne_ventes,
                    })
                    .await?;
                notify_success(&format!("Sale '{}' created (id {})", vente.code, vente.id));
                Ok(())
            }
            VenteCommands::Update {
                id,
                code,
                date,
                commentaire,
                entreprise_id,
                commande_id,
                ligne,
            } => {
                let ligne_ventes = ligne
                    .iter()
                    .map(|spec| parse_ligne_vente(spec, entreprise_id))
                    .collect::<Result<Vec<_>, _>>()?;
                let vente = service
                    .update(
                        id,
                        &VenteRequest {
                            code,
                            date_vente: date,
                            commentaire,
                            entreprise_id,
                            commande_id,
                            ligne_ventes,
                        },
                    )
                    .await?;
                notify_success(&format!("Sale '{}' updated", vente.code));
                Ok(())
            }
            VenteCommands::Delete { id } => {
                service.delete(id).await?;
                notify_success(&format!("Sale {} deleted", id));
                Ok(())
            }
        }
    }

    pub(crate) async fn handle_mvt_stk_command(
        &self,
        command: MvtStkCommands,
    ) -> Result<(), AppError> {
        self.guard(Route::MvtStk)?;
        let service = MvtStkService::new(self.build_client()?, self.build_cache());

        match command {
            MvtStkCommands::List => {
                let mvts = service.get_all().await?;
                println!("{}", TableDisplay::new().render_mvts(&mvts));
                Ok(())
            }
            MvtStkCommands::Get { id } => print_record(&service.get_by_id(id).await?),
            MvtStkCommands::Create {
                article_id,
                quantite,
                type_mvt,
                entreprise_id,
            } => {
                let mvt = service
                    .create(&MvtStkRequest {
                        date_mvt: Utc::now(),
                        quantite,
                        type_mvt: type_mvt.into(),
                        article_id,
                        entreprise_id,
                    })
                    .await?;
                notify_success(&format!("Stock movement recorded (id {})", mvt.id));
                Ok(())
            }
            MvtStkCommands::Update {
                id,
                article_id,
                quantite,
                type_mvt,
                entreprise_id,
            } => {
                service
                    .update(
                        id,
                        &MvtStkRequest {
                            date_mvt: Utc::now(),
                            quantite,
                            type_mvt: type_mvt.into(),
                            article_id,
                            entreprise_id,
                        },
                    )
                    .await?;
                notify_success(&format!("Stock movement {} updated", id));
                Ok(())
            }
            MvtStkCommands::Delete { id } => {
                service.delete(id).await?;
                notify_success(&format!("Stock movement {} deleted", id));
                Ok(())
            }
        }
    }

    pub(crate) async fn handle_role_command(&self, command: RoleCommands) -> Result<(), AppError> {
        self.guard(Route::Roles)?;
        let service = RoleService::new(self.build_client()?, self.build_cache());

        match command {
            RoleCommands::List => {
                let roles = service.get_all().await?;
                println!("{}", TableDisplay::new().render_roles(&roles));
                Ok(())
            }
            RoleCommands::Get { id } => print_record(&service.get_by_id(id).await?),
            RoleCommands::Create {
                role_name,
                utilisateur_id,
                entreprise_id,
            } => {
                let role = service
                    .create(&RoleRequest {
                        role_name,
                        utilisateur_id,
                        entreprise_id,
                    })
                    .await?;
                notify_success(&format!(
                    "Role '{}' created (id {})",
                    role.role_name, role.id
                ));
                Ok(())
            }
            RoleCommands::Update {
                id,
                role_name,
                utilisateur_id,
                entreprise_id,
            } => {
                let role = service
                    .update(
                        id,
                        &RoleRequest {
                            role_name,
                            utilisateur_id,
                            entreprise_id,
                        },
                    )
                    .await?;
                notify_success(&format!("Role '{}' updated", role.role_name));
                Ok(())
            }
            RoleCommands::Delete { id } => {
                service.delete(id).await?;
                notify_success(&format!("Role {} deleted", id));
                Ok(())
            }
        }
    }

    pub(crate) async fn handle_utilisateur_command(
        &self,
        command: UtilisateurCommands,
    ) -> Result<(), AppError> {
        self.guard(Route::Utilisateurs)?;
        let service = UtilisateurService::new(self.build_client()?, self.build_cache());

        match command {
            UtilisateurCommands::List => {
                let utilisateurs = service.get_all().await?;
                println!("{}", TableDisplay::new().render_utilisateurs(&utilisateurs));
                Ok(())
            }
            UtilisateurCommands::Get { id } => print_record(&service.get_by_id(id).await?),
            UtilisateurCommands::Create { args } => {
                let utilisateur = service.create(&utilisateur_request(args)?).await?;
                notify_success(&format!(
                    "User {} {} created (id {})",
                    utilisateur.prenom, utilisateur.nom, utilisateur.id
                ));
                Ok(())
            }
            UtilisateurCommands::Update { id, args } => {
                let utilisateur = service.update(id, &utilisateur_request(args)?).await?;
                notify_success(&format!(
                    "User {} {} updated",
                    utilisateur.prenom, utilisateur.nom
                ));
                Ok(())
            }
            UtilisateurCommands::Delete { id } => {
                service.delete(id).await?;
                notify_success(&format!("User {} deleted", id));
                Ok(())
            }
        }
    }

    pub(crate) async fn handle_entreprise_command(
        &self,
        command: EntrepriseCommands,
    ) -> Result<(), AppError> {
        self.guard(Route::Entreprises)?;
        let service = EntrepriseService::new(self.build_client()?, self.build_cache());

        match command {
            EntrepriseCommands::List => {
                let entreprises = service.get_all().await?;
                println!("{}", TableDisplay::new().render_entreprises(&entreprises));
                Ok(())
            }
            EntrepriseCommands::Get { id } => print_record(&service.get_by_id(id).await?),
            EntrepriseCommands::Create { args } => {
                let entreprise = service.create(&entreprise_request(args)?).await?;
                notify_success(&format!(
                    "Company '{}' created (id {})",
                    entreprise.nom_entreprise, entreprise.id
                ));
                Ok(())
            }
            EntrepriseCommands::Update { id, args } => {
                let entreprise = service.update(id, &entreprise_request(args)?).await?;
                notify_success(&format!(
                    "Company '{}' updated",
                    entreprise.nom_entreprise
                ));
                Ok(())
            }
            EntrepriseCommands::Delete { id } => {
                service.delete(id).await?;
                notify_success(&format!("Company {} deleted", id));
                Ok(())
            }
        }
    }
}

fn ligne_commande_client_request(commande_id: i64, args: LigneArgs) -> LigneCommandeClientRequest {
    LigneCommandeClientRequest {
        commande_client_id: commande_id,
        article_id: args.article_id,
        quantite: args.quantite,
        prix_unitaire: args.prix_unitaire,
        entreprise_id: args.entreprise_id,
    }
}
