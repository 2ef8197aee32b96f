//! Persistence collaborator
//!
//! [`VersionStore`] is the seam to whatever backend keeps projects and their
//! version history. The store owns version numbering; callers never allocate
//! numbers themselves.

use crate::record::{NewProject, NewVersion, Project, ProjectId, Version, VersionNumber};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Errors reported by a store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Project does not exist
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Backend failure
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Storage of projects and their immutable versions
#[async_trait]
pub trait VersionStore: Send + Sync {
    /// Create a project header with no versions
    async fn create_project(&self, project: NewProject) -> Result<Project, StoreError>;

    /// Fetch a project header
    async fn project(&self, id: ProjectId) -> Result<Project, StoreError>;

    /// Most recent version, if any
    async fn latest_version(&self, id: ProjectId) -> Result<Option<Version>, StoreError>;

    /// Atomically append a version and return its number
    async fn save_new_version(
        &self,
        id: ProjectId,
        version: NewVersion,
    ) -> Result<VersionNumber, StoreError>;

    /// All versions, oldest first
    async fn versions(&self, id: ProjectId) -> Result<Vec<Version>, StoreError>;
}

#[derive(Debug)]
struct ProjectEntry {
    project: Project,
    versions: Vec<Version>,
}

/// Process-local store used by tests and the CLI
#[derive(Debug, Default)]
pub struct InMemoryVersionStore {
    projects: Mutex<HashMap<ProjectId, ProjectEntry>>,
    unavailable: AtomicBool,
}

impl InMemoryVersionStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with [`StoreError::Backend`] until reset
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of projects
    #[must_use]
    pub fn project_count(&self) -> usize {
        self.projects.lock().len()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Backend("store unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl VersionStore for InMemoryVersionStore {
    async fn create_project(&self, project: NewProject) -> Result<Project, StoreError> {
        self.check_available()?;
        let now = Utc::now();
        let header = Project {
            id: ProjectId::new(),
            owner: project.owner,
            title: project.title,
            year: project.year,
            is_public: false,
            current_version: None,
            created_at: now,
            updated_at: now,
        };
        self.projects.lock().insert(
            header.id,
            ProjectEntry {
                project: header.clone(),
                versions: Vec::new(),
            },
        );
        Ok(header)
    }

    async fn project(&self, id: ProjectId) -> Result<Project, StoreError> {
        self.check_available()?;
        self.projects
            .lock()
            .get(&id)
            .map(|e| e.project.clone())
            .ok_or(StoreError::ProjectNotFound(id))
    }

    async fn latest_version(&self, id: ProjectId) -> Result<Option<Version>, StoreError> {
        self.check_available()?;
        self.projects
            .lock()
            .get(&id)
            .map(|e| e.versions.last().cloned())
            .ok_or(StoreError::ProjectNotFound(id))
    }

    async fn save_new_version(
        &self,
        id: ProjectId,
        version: NewVersion,
    ) -> Result<VersionNumber, StoreError> {
        self.check_available()?;
        let mut projects = self.projects.lock();
        let entry = projects.get_mut(&id).ok_or(StoreError::ProjectNotFound(id))?;

        let number = entry.versions.last().map_or(1, |v| v.version + 1);
        let now = Utc::now();
        entry.versions.push(Version {
            project_id: id,
            version: number,
            content: version.content,
            category: version.category,
            note: version.note,
            created_at: now,
        });
        entry.project.current_version = Some(number);
        entry.project.updated_at = now;
        Ok(number)
    }

    async fn versions(&self, id: ProjectId) -> Result<Vec<Version>, StoreError> {
        self.check_available()?;
        self.projects
            .lock()
            .get(&id)
            .map(|e| e.versions.clone())
            .ok_or(StoreError::ProjectNotFound(id))
    }
}
