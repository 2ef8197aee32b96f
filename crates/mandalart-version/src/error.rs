//! Error types for the save path
//!
//! Collaborator errors are wrapped, never swallowed: callers can match on
//! [`ServiceError::Access`] and [`ServiceError::Store`] to see exactly what the
//! backend reported.

use crate::access::AccessError;
use crate::record::ProjectId;
use crate::store::StoreError;
use mandalart_grid::ReorderError;

/// Main save-path error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Access control rejected the user
    #[error("access denied: {0}")]
    Access(#[from] AccessError),

    /// Persistence failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Requested ordering is malformed
    #[error("invalid reorder: {0}")]
    Reorder(#[from] ReorderError),

    /// Project has no version to edit or reorder
    #[error("project {0} has no saved version")]
    NoCurrentVersion(ProjectId),

    /// Nothing changed since the last save
    #[error("nothing to save")]
    NothingToSave,
}

impl ServiceError {
    /// Whether the error came from access control
    #[inline]
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::Access(_))
    }

    /// Whether retrying the same request could succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Store(StoreError::Backend(_)) | Self::Access(AccessError::Backend(_))
        )
    }
}
