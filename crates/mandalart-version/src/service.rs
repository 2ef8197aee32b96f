//! Save path for mandalart boards
//!
//! [`VersionService`] is handed its collaborators explicitly: a
//! [`VersionStore`] for persistence and an [`AccessControl`] for user checks.
//! It decides the category of each save and leaves numbering to the store.
//!
//! # Workflow
//! 1. Check the acting user (every mutating call)
//! 2. Read the latest version where the category or content depends on it
//! 3. Compute the category (`CREATE`, `REORDER`, or the batch's resolution)
//! 4. Append a new version through the store

use crate::access::AccessControl;
use crate::batch::EditBatch;
use crate::category::VersionCategory;
use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::record::{NewProject, NewVersion, ProjectId, SavedVersion, UserId, Version};
use crate::store::VersionStore;
use mandalart_grid::{Grid, Permutation, Position};
use std::sync::Arc;

/// Dependency-injected save service
#[derive(Debug)]
pub struct VersionService<S, A> {
    store: Arc<S>,
    access: Arc<A>,
    config: ServiceConfig,
}

impl<S, A> VersionService<S, A>
where
    S: VersionStore,
    A: AccessControl,
{
    /// Create service over the given collaborators
    #[inline]
    #[must_use]
    pub fn new(store: Arc<S>, access: Arc<A>, config: ServiceConfig) -> Self {
        Self {
            store,
            access,
            config,
        }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Persistence collaborator
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    async fn authorize(&self, user: &UserId) -> Result<(), ServiceError> {
        if let Err(e) = self.access.check(user).await {
            tracing::warn!(user = %user, error = %e, "mutation rejected");
            return Err(e.into());
        }
        Ok(())
    }

    /// Create a project and save `content` as its first version
    pub async fn create(
        &self,
        user: &UserId,
        title: impl Into<String>,
        year: i32,
        content: Grid,
    ) -> Result<SavedVersion, ServiceError> {
        self.authorize(user).await?;

        let project = self
            .store
            .create_project(NewProject {
                owner: user.clone(),
                title: title.into(),
                year,
            })
            .await?;

        let saved = self
            .append(project.id, content, VersionCategory::Create, self.config.create_note.clone())
            .await?;
        tracing::info!(project = %project.id, "created project");
        Ok(saved)
    }

    /// Save edited content, tagged with the batch's category
    ///
    /// A project with no prior version is saved as `CREATE` regardless of the
    /// batch. Otherwise an empty batch is [`ServiceError::NothingToSave`].
    pub async fn save_edits(
        &self,
        user: &UserId,
        project: ProjectId,
        content: &Grid,
        batch: &EditBatch,
        note: Option<&str>,
    ) -> Result<SavedVersion, ServiceError> {
        self.authorize(user).await?;

        let category = match self.store.latest_version(project).await? {
            None => VersionCategory::Create,
            Some(_) => batch.resolve().ok_or(ServiceError::NothingToSave)?,
        };
        tracing::debug!(
            project = %project,
            touched = batch.len(),
            category = %category,
            "resolved edit category"
        );

        self.append(
            project,
            content.clone(),
            category,
            note.unwrap_or_default().to_string(),
        )
        .await
    }

    /// Reorder the latest version's satellites and save the result
    ///
    /// Returns the saved version together with the reordered board.
    pub async fn save_reorder(
        &self,
        user: &UserId,
        project: ProjectId,
        permutation: &Permutation,
    ) -> Result<(SavedVersion, Grid), ServiceError> {
        self.authorize(user).await?;

        if permutation.is_identity() && self.config.skip_identity_reorder {
            return Err(ServiceError::NothingToSave);
        }

        let current = self
            .store
            .latest_version(project)
            .await?
            .ok_or(ServiceError::NoCurrentVersion(project))?;

        let reordered = current.content.reordered(permutation);
        let saved = self
            .append(
                project,
                reordered.clone(),
                VersionCategory::Reorder,
                self.config.reorder_note.clone(),
            )
            .await?;
        Ok((saved, reordered))
    }

    /// [`Self::save_reorder`] for an unvalidated ordering
    ///
    /// The ordering is validated before any collaborator is called.
    pub async fn save_reorder_order(
        &self,
        user: &UserId,
        project: ProjectId,
        order: &[Position],
    ) -> Result<(SavedVersion, Grid), ServiceError> {
        let permutation = Permutation::new(order)?;
        self.save_reorder(user, project, &permutation).await
    }

    /// Version history, oldest first
    pub async fn history(&self, project: ProjectId) -> Result<Vec<Version>, ServiceError> {
        Ok(self.store.versions(project).await?)
    }

    async fn append(
        &self,
        project: ProjectId,
        content: Grid,
        category: VersionCategory,
        note: String,
    ) -> Result<SavedVersion, ServiceError> {
        let version = self
            .store
            .save_new_version(
                project,
                NewVersion {
                    content,
                    category,
                    note,
                },
            )
            .await?;
        tracing::info!(project = %project, version, category = %category, "saved version");
        Ok(SavedVersion {
            project_id: project,
            version,
            category,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::StaticAccessControl;
    use crate::store::InMemoryVersionStore;
    use mandalart_grid::{Coordinate, GridKey, SubGridKey};

    fn service() -> VersionService<InMemoryVersionStore, StaticAccessControl> {
        VersionService::new(
            Arc::new(InMemoryVersionStore::new()),
            Arc::new(StaticAccessControl::with_users(["alice"])),
            ServiceConfig::default(),
        )
    }

    fn alice() -> UserId {
        UserId::new("alice")
    }

    #[tokio::test]
    async fn create_saves_version_one() {
        let svc = service();
        let saved = svc.create(&alice(), "Goals", 2026, Grid::empty()).await.unwrap();
        assert_eq!(saved.version, 1);
        assert_eq!(saved.category, VersionCategory::Create);

        let history = svc.history(saved.project_id).await.unwrap();
        assert_eq!(history[0].note, "Created");
    }

    #[tokio::test]
    async fn edits_take_batch_category() {
        let svc = service();
        let mut grid = Grid::empty();
        let saved = svc.create(&alice(), "Goals", 2026, grid.clone()).await.unwrap();

        let mut batch = EditBatch::new();
        batch
            .set_label(&mut grid, Coordinate::try_new(GridKey::Center, 2).unwrap(), "Read")
            .unwrap();
        let next = svc
            .save_edits(&alice(), saved.project_id, &grid, &batch, Some("seed"))
            .await
            .unwrap();

        assert_eq!(next.version, 2);
        assert_eq!(next.category, VersionCategory::EditSub);
    }

    #[tokio::test]
    async fn empty_batch_is_nothing_to_save() {
        let svc = service();
        let saved = svc.create(&alice(), "Goals", 2026, Grid::empty()).await.unwrap();
        let err = svc
            .save_edits(&alice(), saved.project_id, &Grid::empty(), &EditBatch::new(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NothingToSave));
    }

    #[tokio::test]
    async fn reorder_saves_reorder_category() {
        let svc = service();
        let saved = svc.create(&alice(), "Goals", 2026, Grid::empty()).await.unwrap();
        let perm = Permutation::identity().swapped(SubGridKey::East, SubGridKey::West);

        let (next, grid) = svc.save_reorder(&alice(), saved.project_id, &perm).await.unwrap();
        assert_eq!(next.category, VersionCategory::Reorder);

        let latest = svc.store().latest_version(saved.project_id).await.unwrap().unwrap();
        assert_eq!(latest.content, grid);
        assert_eq!(latest.note, "Mandalart reorder");
    }

    #[tokio::test]
    async fn identity_reorder_is_skipped_by_default() {
        let svc = service();
        let saved = svc.create(&alice(), "Goals", 2026, Grid::empty()).await.unwrap();
        let err = svc
            .save_reorder(&alice(), saved.project_id, &Permutation::identity())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NothingToSave));
    }
}
