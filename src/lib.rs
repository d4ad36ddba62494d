pub use error::AppError;

/// Main architecture layers (dependency flow: CLI → Core → Storage)
pub mod cli; // Command-line interface
pub mod core; // Services, query cache, session and access control
pub mod storage; // Configuration and credential persistence

/// Support modules (used across layers)
pub mod api; // gestion-de-stock API client
pub mod display; // Output formatting
pub mod error; // Error handling
pub mod utils; // Shared helpers

pub type Result<T> = std::result::Result<T, AppError>;
