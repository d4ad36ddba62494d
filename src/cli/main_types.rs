use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gestock-cli")]
#[command(about = "Command line interface for the gestion-de-stock inventory API")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authentication commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Article catalogue
    Article {
        #[command(subcommand)]
        command: ArticleCommands,
    },
    /// Article categories
    Categorie {
        #[command(subcommand)]
        command: CategorieCommands,
    },
    /// Customer contacts
    Client {
        #[command(subcommand)]
        command: ClientCommands,
    },
    /// Supplier contacts
    Fournisseur {
        #[command(subcommand)]
        command: FournisseurCommands,
    },
    /// Customer orders and their lines
    CommandeClient {
        #[command(subcommand)]
        command: CommandeClientCommands,
    },
    /// Supplier orders and their lines
    CommandeFournisseur {
        #[command(subcommand)]
        command: CommandeFournisseurCommands,
    },
    /// Sales
    Vente {
        #[command(subcommand)]
        command: VenteCommands,
    },
    /// Stock movements
    MvtStk {
        #[command(subcommand)]
        command: MvtStkCommands,
    },
    /// Role administration (ADMIN only)
    Role {
        #[command(subcommand)]
        command: RoleCommands,
    },
    /// User account administration
    Utilisateur {
        #[command(subcommand)]
        command: UtilisateurCommands,
    },
    /// Company records
    Entreprise {
        #[command(subcommand)]
        command: EntrepriseCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Login and store the session for this profile
    Login,
    /// Logout and clear the stored session
    Logout,
    /// Show authentication status
    Status,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set a configuration value on the active profile
    Set {
        /// Configuration key (api_url, email, timeout_seconds, cache_enabled)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ArticleArgs {
    #[arg(long)]
    pub code_article: String,
    #[arg(long)]
    pub designation: String,
    #[arg(long)]
    pub categorie_id: i64,
    #[arg(long)]
    pub entreprise_id: i64,
    #[arg(long)]
    pub prix_unitaire: f64,
    #[arg(long)]
    pub taux_tva: f64,
    #[arg(long)]
    pub prix_unitaire_ttc: f64,
    /// Path to a product image to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ArticleCommands {
    /// List all articles
    List,
    /// Show one article by id
    Get { id: i64 },
    /// Look up an article by business code
    Code { code: String },
    /// Create an article
    Create {
        #[command(flatten)]
        args: ArticleArgs,
    },
    /// Update an article
    Update {
        id: i64,
        #[command(flatten)]
        args: ArticleArgs,
    },
    /// Delete an article
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum CategorieCommands {
    /// List all categories
    List,
    /// Show one category by id
    Get { id: i64 },
    /// Look up a category by business code
    Code { code: String },
    /// Create a category
    Create {
        #[arg(long)]
        code: String,
        #[arg(long)]
        designation: String,
        #[arg(long)]
        entreprise_id: i64,
    },
    /// Update a category
    Update {
        id: i64,
        #[arg(long)]
        code: String,
        #[arg(long)]
        designation: String,
        #[arg(long)]
        entreprise_id: i64,
    },
    /// Delete a category
    Delete { id: i64 },
}

/// Shared create/update arguments for clients and fournisseurs.
#[derive(Args, Debug, Clone)]
pub struct ContactArgs {
    #[arg(long)]
    pub nom: String,
    #[arg(long)]
    pub prenom: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub adresse1: String,
    #[arg(long)]
    pub adresse2: Option<String>,
    #[arg(long)]
    pub ville: String,
    #[arg(long)]
    pub code_postal: String,
    #[arg(long)]
    pub pays: String,
    #[arg(long)]
    pub num_tel: String,
    #[arg(long)]
    pub entreprise_id: i64,
    /// Path to a photo to upload
    #[arg(long)]
    pub photo: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ClientCommands {
    /// List all clients
    List,
    /// Show one client by id
    Get { id: i64 },
    /// Create a client
    Create {
        #[command(flatten)]
        args: ContactArgs,
    },
    /// Update a client
    Update {
        id: i64,
        #[command(flatten)]
        args: ContactArgs,
    },
    /// Delete a client
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum FournisseurCommands {
    /// List all fournisseurs
    List,
    /// Show one fournisseur by id
    Get { id: i64 },
    /// Create a fournisseur
    Create {
        #[command(flatten)]
        args: ContactArgs,
    },
    /// Update a fournisseur
    Update {
        id: i64,
        #[command(flatten)]
        args: ContactArgs,
    },
    /// Delete a fournisseur
    Delete { id: i64 },
}

#[derive(Args, Debug, Clone)]
pub struct LigneArgs {
    #[arg(long)]
    pub article_id: i64,
    #[arg(long)]
    pub quantite: f64,
    #[arg(long)]
    pub prix_unitaire: f64,
    #[arg(long)]
    pub entreprise_id: i64,
}

#[derive(Subcommand, Debug)]
pub enum CommandeClientCommands {
    /// List all customer orders
    List,
    /// Show one order by id
    Get { id: i64 },
    /// Look up an order by business code
    Code { code: String },
    /// Create an order
    Create {
        #[arg(long)]
        code: String,
        /// Order date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        entreprise_id: i64,
        #[arg(long)]
        client_id: i64,
    },
    /// Update an order
    Update {
        id: i64,
        #[arg(long)]
        code: String,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        entreprise_id: i64,
        #[arg(long)]
        client_id: i64,
    },
    /// Delete an order
    Delete { id: i64 },
    /// List the lines of an order
    Lignes { id: i64 },
    /// Add a line to an order
    AddLigne {
        id: i64,
        #[command(flatten)]
        args: LigneArgs,
    },
    /// Update a line of an order
    UpdateLigne {
        id: i64,
        ligne_id: i64,
        #[command(flatten)]
        args: LigneArgs,
    },
    /// Remove one line from an order
    RemoveLigne { id: i64, ligne_id: i64 },
    /// Remove every line from an order
    ClearLignes { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum CommandeFournisseurCommands {
    /// List all supplier orders
    List,
    /// Show one order by id
    Get { id: i64 },
    /// Look up an order by business code
    Code { code: String },
    /// Create an order
    Create {
        #[arg(long)]
        code: String,
        /// Order date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        entreprise_id: i64,
        #[arg(long)]
        fournisseur_id: i64,
    },
    /// Update an order
    Update {
        id: i64,
        #[arg(long)]
        code: String,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        entreprise_id: i64,
        #[arg(long)]
        fournisseur_id: i64,
    },
    /// Delete an order
    Delete { id: i64 },
    /// Add a line to an order
    AddLigne {
        /// Owning order id
        #[arg(long)]
        commande_id: i64,
        #[command(flatten)]
        args: LigneArgs,
    },
    /// Update an order line
    UpdateLigne {
        ligne_id: i64,
        #[arg(long)]
        commande_id: i64,
        #[command(flatten)]
        args: LigneArgs,
    },
    /// Remove an order line
    RemoveLigne { ligne_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum VenteCommands {
    /// List all sales
    List,
    /// Show one sale by id
    Get { id: i64 },
    /// Look up a sale by business code
    Code { code: String },
    /// Create a sale
    Create {
        #[arg(long)]
        code: String,
        /// Sale date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, default_value = "")]
        commentaire: String,
        #[arg(long)]
        entreprise_id: i64,
        #[arg(long)]
        commande_id: i64,
        /// Sale line as articleId:quantite:prixUnitaire (repeatable)
        #[arg(long, action = clap::ArgAction::Append)]
        ligne: Vec<String>,
    },
    /// Update a sale
    Update {
        id: i64,
        #[arg(long)]
        code: String,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, default_value = "")]
        commentaire: String,
        #[arg(long)]
        entreprise_id: i64,
        #[arg(long)]
        commande_id: i64,
        /// Sale line as articleId:quantite:prixUnitaire (repeatable)
        #[arg(long, action = clap::ArgAction::Append)]
        ligne: Vec<String>,
    },
    /// Delete a sale
    Delete { id: i64 },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum MvtDirection {
    Entree,
    Sortie,
}

#[derive(Subcommand, Debug)]
pub enum MvtStkCommands {
    /// List all stock movements
    List,
    /// Show one movement by id
    Get { id: i64 },
    /// Record a stock movement
    Create {
        #[arg(long)]
        article_id: i64,
        #[arg(long)]
        quantite: f64,
        #[arg(long, value_enum)]
        type_mvt: MvtDirection,
        #[arg(long)]
        entreprise_id: i64,
    },
    /// Correct a stock movement
    Update {
        id: i64,
        #[arg(long)]
        article_id: i64,
        #[arg(long)]
        quantite: f64,
        #[arg(long, value_enum)]
        type_mvt: MvtDirection,
        #[arg(long)]
        entreprise_id: i64,
    },
    /// Delete a movement
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum RoleCommands {
    /// List all roles
    List,
    /// Show one role by id
    Get { id: i64 },
    /// Create a role assignment
    Create {
        #[arg(long)]
        role_name: String,
        #[arg(long)]
        utilisateur_id: i64,
        #[arg(long)]
        entreprise_id: i64,
    },
    /// Update a role assignment
    Update {
        id: i64,
        #[arg(long)]
        role_name: String,
        #[arg(long)]
        utilisateur_id: i64,
        #[arg(long)]
        entreprise_id: i64,
    },
    /// Delete a role assignment
    Delete { id: i64 },
}

#[derive(Args, Debug, Clone)]
pub struct UtilisateurArgs {
    #[arg(long)]
    pub nom: String,
    #[arg(long)]
    pub prenom: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub mot_de_passe: String,
    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    pub date_de_naissance: NaiveDate,
    #[arg(long)]
    pub adresse1: String,
    #[arg(long)]
    pub adresse2: Option<String>,
    #[arg(long)]
    pub ville: String,
    #[arg(long)]
    pub code_postal: String,
    #[arg(long)]
    pub pays: String,
    #[arg(long)]
    pub entreprise_id: i64,
    /// Path to a profile image to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum UtilisateurCommands {
    /// List all users
    List,
    /// Show one user by id
    Get { id: i64 },
    /// Create a user account
    Create {
        #[command(flatten)]
        args: UtilisateurArgs,
    },
    /// Update a user account
    Update {
        id: i64,
        #[command(flatten)]
        args: UtilisateurArgs,
    },
    /// Delete a user account
    Delete { id: i64 },
}

#[derive(Args, Debug, Clone)]
pub struct EntrepriseArgs {
    #[arg(long)]
    pub nom_entreprise: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub adresse1: String,
    #[arg(long)]
    pub adresse2: Option<String>,
    #[arg(long)]
    pub ville: String,
    #[arg(long)]
    pub code_postal: String,
    #[arg(long)]
    pub pays: String,
    #[arg(long)]
    pub code_fiscal: String,
    #[arg(long)]
    pub num_tel: String,
    #[arg(long)]
    pub ste_web: String,
    /// Path to a logo to upload
    #[arg(long)]
    pub photo: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum EntrepriseCommands {
    /// List all companies
    List,
    /// Show one company by id
    Get { id: i64 },
    /// Create a company
    Create {
        #[command(flatten)]
        args: EntrepriseArgs,
    },
    /// Update a company
    Update {
        id: i64,
        #[command(flatten)]
        args: EntrepriseArgs,
    },
    /// Delete a company
    Delete { id: i64 },
}
