//! Scripted editing sessions
//!
//! A replay script is a JSON array of [`Step`]s applied to a board inside a
//! throwaway in-memory project. Edits accumulate in an [`EditBatch`] until a
//! `save` step; reorders are saved immediately, like the board UI does.
//!
//! ```json
//! [
//!   {"op": "label", "at": {"grid": "center", "cell": 1}, "label": "Health"},
//!   {"op": "save"},
//!   {"op": "swap", "a": "north", "b": "south"}
//! ]
//! ```

use anyhow::{bail, Context, Result};
use mandalart_grid::{Coordinate, Grid, Permutation, SeedRename, SubGridKey};
use mandalart_version::{
    EditBatch, InMemoryVersionStore, ProjectId, SavedVersion, ServiceConfig, ServiceError,
    StaticAccessControl, UserId, Version, VersionService,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// User that owns replayed projects
pub const REPLAY_USER: &str = "replay";

/// One scripted action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Expand a satellite into its own block
    Expand {
        /// Satellite to expand
        key: SubGridKey,
    },
    /// Change a cell label
    Label {
        /// Cell to edit
        at: Coordinate,
        /// New text
        label: String,
    },
    /// Mark a cell done or not done
    Complete {
        /// Cell to edit
        at: Coordinate,
        /// New state
        #[serde(default = "default_completed")]
        completed: bool,
    },
    /// Rename a sub-goal from the center block
    RenameSeed {
        /// Satellite whose seed changes
        key: SubGridKey,
        /// New text
        label: String,
        /// Replace the expanded block with a fresh one
        #[serde(default)]
        reset: bool,
    },
    /// Save pending edits
    Save {
        /// Version note
        #[serde(default)]
        note: Option<String>,
    },
    /// Reorder satellites by a full ordering
    Reorder {
        /// Source key for each slot
        order: Permutation,
    },
    /// Exchange two satellites
    Swap {
        /// First satellite
        a: SubGridKey,
        /// Second satellite
        b: SubGridKey,
    },
}

fn default_completed() -> bool {
    true
}

/// Outcome of a replay
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    /// Project created for the replay
    pub project_id: ProjectId,
    /// Every saved version, oldest first
    pub history: Vec<Version>,
    /// Saves that had nothing to record
    pub skipped: usize,
    /// Board after the last step
    pub grid: Grid,
}

impl ReplayReport {
    /// Saved versions without their content
    pub fn saved(&self) -> impl Iterator<Item = SavedVersion> + '_ {
        self.history.iter().map(|v| SavedVersion {
            project_id: v.project_id,
            version: v.version,
            category: v.category,
        })
    }
}

/// Run `steps` against `initial` and collect the resulting history
///
/// The initial board is saved as the first version. Pending edits must be
/// saved before a reorder step.
pub async fn replay(initial: Grid, steps: &[Step], config: ServiceConfig) -> Result<ReplayReport> {
    let store = Arc::new(InMemoryVersionStore::new());
    let service = VersionService::new(
        store,
        Arc::new(StaticAccessControl::with_users([REPLAY_USER])),
        config,
    );
    let user = UserId::new(REPLAY_USER);

    let created = service.create(&user, "replay", 0, initial.clone()).await?;
    let project = created.project_id;

    let mut grid = initial;
    let mut batch = EditBatch::new();
    let mut skipped = 0;

    for (n, step) in steps.iter().enumerate() {
        tracing::debug!(step = n, ?step, "applying step");
        match step {
            Step::Expand { key } => {
                grid.expand(*key).with_context(|| format!("step {n}"))?;
            }
            Step::Label { at, label } => {
                batch
                    .set_label(&mut grid, *at, label.as_str())
                    .with_context(|| format!("step {n}"))?;
            }
            Step::Complete { at, completed } => {
                batch
                    .set_completed(&mut grid, *at, *completed)
                    .with_context(|| format!("step {n}"))?;
            }
            Step::RenameSeed { key, label, reset } => {
                let mode = if *reset {
                    SeedRename::ResetSubGrid
                } else {
                    SeedRename::KeepSubGrid
                };
                batch.rename_seed(&mut grid, *key, label.as_str(), mode);
            }
            Step::Save { note } => {
                match service
                    .save_edits(&user, project, &grid, &batch, note.as_deref())
                    .await
                {
                    Ok(_) => batch.clear(),
                    Err(ServiceError::NothingToSave) => {
                        tracing::warn!(step = n, "save with no changes skipped");
                        skipped += 1;
                    }
                    Err(e) => return Err(e).with_context(|| format!("step {n}")),
                }
            }
            Step::Reorder { order } => {
                grid = reorder_step(&service, &user, project, &batch, order, n, &mut skipped)
                    .await?
                    .unwrap_or(grid);
            }
            Step::Swap { a, b } => {
                let order = Permutation::identity().swapped(*a, *b);
                grid = reorder_step(&service, &user, project, &batch, &order, n, &mut skipped)
                    .await?
                    .unwrap_or(grid);
            }
        }
    }

    if !batch.is_empty() {
        tracing::warn!(pending = batch.len(), "script ended with unsaved edits");
    }

    let history = service.history(project).await?;
    Ok(ReplayReport {
        project_id: project,
        history,
        skipped,
        grid,
    })
}

async fn reorder_step(
    service: &VersionService<InMemoryVersionStore, StaticAccessControl>,
    user: &UserId,
    project: ProjectId,
    batch: &EditBatch,
    order: &Permutation,
    n: usize,
    skipped: &mut usize,
) -> Result<Option<Grid>> {
    if !batch.is_empty() {
        bail!("step {n}: {} unsaved edit(s) before reorder", batch.len());
    }
    match service.save_reorder(user, project, order).await {
        Ok((_, grid)) => Ok(Some(grid)),
        Err(ServiceError::NothingToSave) => {
            tracing::warn!(step = n, "identity reorder skipped");
            *skipped += 1;
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("step {n}")),
    }
}
