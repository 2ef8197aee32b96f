//! Project and version records
//!
//! These mirror what the persistence collaborator stores: a project header
//! and its immutable, numbered version snapshots.

use crate::category::VersionCategory;
use chrono::{DateTime, Utc};
use mandalart_grid::Grid;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique project identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub Uuid);

impl ProjectId {
    /// Generate new project ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an authenticated user, as issued by the auth backend
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Wrap a raw user id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Monotonically increasing version number within a project, starting at 1
pub type VersionNumber = u64;

/// Project header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project id
    pub id: ProjectId,
    /// Owner
    pub owner: UserId,
    /// Display title
    pub title: String,
    /// Planning year
    pub year: i32,
    /// Whether the board can be shared
    pub is_public: bool,
    /// Latest saved version, if any
    pub current_version: Option<VersionNumber>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last save time
    pub updated_at: DateTime<Utc>,
}

/// Request to create a project header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    /// Owner
    pub owner: UserId,
    /// Display title
    pub title: String,
    /// Planning year
    pub year: i32,
}

/// Immutable snapshot of a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    /// Owning project
    pub project_id: ProjectId,
    /// Number assigned by the store
    pub version: VersionNumber,
    /// Board content
    pub content: Grid,
    /// Kind of change
    pub category: VersionCategory,
    /// Free-text note
    pub note: String,
    /// Save time
    pub created_at: DateTime<Utc>,
}

/// Pending snapshot handed to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVersion {
    /// Board content
    pub content: Grid,
    /// Kind of change
    pub category: VersionCategory,
    /// Free-text note
    pub note: String,
}

/// Result of a successful save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SavedVersion {
    /// Project saved to
    pub project_id: ProjectId,
    /// Number assigned by the store
    pub version: VersionNumber,
    /// Category recorded
    pub category: VersionCategory,
}
