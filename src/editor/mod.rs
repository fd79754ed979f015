// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editing session around one form graph.
//!
//! [`FormEditor`] owns the current graph together with a revision counter, the selected step, and
//! the per-step revert baselines. Every change goes through `&mut self`, so edits are applied one
//! at a time and each successful batch bumps the revision exactly once.

mod snapshots;

pub use snapshots::Snapshots;

use crate::model::{ChoiceId, FormGraph, StepId, StepKind};
use crate::ops::{apply_ops, ApplyError, Delta, FormOp, StepPatch};

#[derive(Debug, Clone, Default)]
pub struct FormEditor {
    graph: FormGraph,
    rev: u64,
    selected: Option<StepId>,
    snapshots: Snapshots,
}

impl FormEditor {
    pub fn new(graph: FormGraph) -> Self {
        Self {
            graph,
            ..Self::default()
        }
    }

    pub fn graph(&self) -> &FormGraph {
        &self.graph
    }

    pub fn into_graph(self) -> FormGraph {
        self.graph
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn selected(&self) -> Option<&StepId> {
        self.selected.as_ref()
    }

    pub fn snapshots(&self) -> &Snapshots {
        &self.snapshots
    }

    /// Makes `step_id` the active step, capturing its revert baseline on first selection.
    pub fn select(&mut self, step_id: &StepId) -> Result<(), ApplyError> {
        let Some(step) = self.graph.step(step_id) else {
            return Err(ApplyError::StepNotFound {
                step_id: step_id.clone(),
            });
        };
        if self.snapshots.capture(step) {
            tracing::trace!(step = %step_id, "edit baseline captured");
        }
        self.selected = Some(step_id.clone());
        Ok(())
    }

    /// Applies `ops` against revision `base_rev` and replaces the graph on success.
    ///
    /// A stale `base_rev` is rejected with [`ApplyError::Conflict`]. An empty batch succeeds
    /// without bumping the revision.
    pub fn apply(&mut self, base_rev: u64, ops: &[FormOp]) -> Result<Delta, ApplyError> {
        let current_rev = self.rev;
        if base_rev != current_rev {
            tracing::debug!(base_rev, current_rev, "edit rejected: stale revision");
            return Err(ApplyError::Conflict {
                base_rev,
                current_rev,
            });
        }
        if ops.is_empty() {
            return Ok(Delta::default());
        }

        let result = apply_ops(&self.graph, ops)?;
        self.graph = result.graph;
        self.rev = self.rev.saturating_add(1);
        self.repair_selection();
        Ok(result.delta)
    }

    /// Seeds an empty graph with its first step and returns the new id.
    pub fn add_root_step(&mut self, kind: StepKind) -> Result<StepId, ApplyError> {
        let step_id = StepId::generate("step");
        self.apply(
            self.rev,
            &[FormOp::AddRootStep {
                step_id: step_id.clone(),
                kind,
            }],
        )?;
        Ok(step_id)
    }

    pub fn add_step(
        &mut self,
        parent_id: &StepId,
        kind: StepKind,
        choice_id: Option<&ChoiceId>,
    ) -> Result<StepId, ApplyError> {
        let step_id = StepId::generate("step");
        self.apply(
            self.rev,
            &[FormOp::AddStep {
                step_id: step_id.clone(),
                parent_id: parent_id.clone(),
                kind,
                choice_id: choice_id.cloned(),
            }],
        )?;
        Ok(step_id)
    }

    pub fn update_step(&mut self, step_id: &StepId, patch: StepPatch) -> Result<Delta, ApplyError> {
        self.apply(
            self.rev,
            &[FormOp::UpdateStep {
                step_id: step_id.clone(),
                patch,
            }],
        )
    }

    pub fn delete_step(&mut self, step_id: &StepId) -> Result<Delta, ApplyError> {
        self.apply(
            self.rev,
            &[FormOp::DeleteStep {
                step_id: step_id.clone(),
            }],
        )
    }

    pub fn reorder_chain(
        &mut self,
        chain: &[StepId],
        from: usize,
        to: usize,
    ) -> Result<Delta, ApplyError> {
        self.apply(
            self.rev,
            &[FormOp::ReorderChain {
                chain: chain.to_vec(),
                from,
                to,
            }],
        )
    }

    /// Appends an uploaded image's object path to the step's info popup.
    pub fn attach_image(
        &mut self,
        step_id: &StepId,
        object_path: impl Into<String>,
    ) -> Result<Delta, ApplyError> {
        self.apply(
            self.rev,
            &[FormOp::AppendInfoPopupImage {
                step_id: step_id.clone(),
                object_path: object_path.into(),
            }],
        )
    }

    /// Keeps the edits made to the selected step and clears the selection.
    ///
    /// The step's baseline is left in place, so a later revert still returns to the values it had
    /// when it was first selected.
    pub fn commit(&mut self) {
        self.selected = None;
    }

    /// Restores `step_id` to its baseline and clears the selection.
    ///
    /// Returns `Ok(true)` when the graph changed. Without a baseline this does nothing. A step
    /// deleted since its baseline was taken stays deleted; only the baseline is dropped.
    pub fn revert(&mut self, step_id: &StepId) -> Result<bool, ApplyError> {
        let Some(baseline) = self.snapshots.take(step_id) else {
            tracing::debug!(step = %step_id, "revert ignored: no baseline");
            return Ok(false);
        };
        self.selected = None;
        if !self.graph.contains(step_id) {
            tracing::debug!(step = %step_id, "revert ignored: step was deleted");
            return Ok(false);
        }
        if self.graph.step(step_id) == Some(&baseline) {
            return Ok(false);
        }

        let result = apply_ops(&self.graph, &[FormOp::RestoreStep { step: baseline }])?;
        let changed = result.graph != self.graph;
        if changed {
            self.graph = result.graph;
            self.rev = self.rev.saturating_add(1);
        }
        Ok(changed)
    }

    fn repair_selection(&mut self) {
        let Some(selected) = &self.selected else {
            return;
        };
        if self.graph.contains(selected) {
            return;
        }
        self.selected = None;
        let Some(root_step_id) = self.graph.root_step_id().cloned() else {
            return;
        };
        if let Err(err) = self.select(&root_step_id) {
            tracing::debug!(root = %root_step_id, %err, "selection not moved to root");
        }
    }
}

#[cfg(test)]
mod tests;
