//! Mandalart Versions
//!
//! Classifies edits, tracks pending changes and saves immutable versions
//! through injected collaborators.
//!
//! - [`classify`] / [`resolve`]: edit categories from touched coordinates
//! - [`EditBatch`]: edits applied between two saves
//! - [`VersionStore`] / [`AccessControl`]: persistence and user checks
//! - [`VersionService`]: the save path tying them together
//!
//! # Example
//!
//! ```rust,ignore
//! use mandalart_version::{InMemoryVersionStore, ServiceConfig, StaticAccessControl, UserId, VersionService};
//! use mandalart_grid::Grid;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = VersionService::new(
//!     Arc::new(InMemoryVersionStore::new()),
//!     Arc::new(StaticAccessControl::with_users(["alice"])),
//!     ServiceConfig::default(),
//! );
//! let saved = service.create(&UserId::new("alice"), "2026", 2026, Grid::empty()).await?;
//! assert_eq!(saved.version, 1);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod access;
pub mod batch;
pub mod category;
pub mod config;
pub mod error;
pub mod record;
pub mod service;
pub mod store;

// Re-exports for convenience
pub use access::{AccessControl, AccessError, StaticAccessControl};
pub use batch::EditBatch;
pub use category::{classify, classify_coordinate, resolve, UnknownCategory, VersionCategory};
pub use config::{ConfigError, ServiceConfig};
pub use error::ServiceError;
pub use record::{
    NewProject, NewVersion, Project, ProjectId, SavedVersion, UserId, Version, VersionNumber,
};
pub use service::VersionService;
pub use store::{InMemoryVersionStore, StoreError, VersionStore};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for saving boards
    pub use crate::{
        AccessControl, EditBatch, ProjectId, ServiceConfig, ServiceError, UserId, VersionCategory,
        VersionService, VersionStore,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
