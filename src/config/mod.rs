//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → handed to the server at start-up
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::CatalogConfig;
pub use schema::FormEntry;
pub use schema::InstanceEntry;
pub use schema::PortalConfig;
pub use schema::ProcessEntry;
pub use schema::RouterConfig;
pub use schema::SessionEntry;
pub use schema::TaskEntry;
pub use schema::TaskFormEntry;
