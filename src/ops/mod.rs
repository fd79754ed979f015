// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for form graphs.
//!
//! Operations borrow the current graph and return a new one; the input is never touched. A batch
//! of ops is applied to one working copy and committed as a whole, so a rejected op leaves the
//! caller's graph exactly as it was. Every successful apply also reports a minimal delta the host
//! can use to refresh derived state.

use std::collections::BTreeSet;
use std::fmt;

use crate::model::{
    Choice, ChoiceId, FormGraph, InfoPopup, QuantityChoice, QuantityChoiceId, Step, StepId,
    StepKind, MIN_CHOICES, MIN_QUANTITY_CHOICES,
};

mod reorder;

#[derive(Debug, Clone, PartialEq)]
pub enum FormOp {
    /// Seeds an empty graph with its root step.
    AddRootStep {
        step_id: StepId,
        kind: StepKind,
    },
    AddStep {
        step_id: StepId,
        parent_id: StepId,
        kind: StepKind,
        choice_id: Option<ChoiceId>,
    },
    UpdateStep {
        step_id: StepId,
        patch: StepPatch,
    },
    DeleteStep {
        step_id: StepId,
    },
    /// Moves the draggable member at `from` to `to` within the chain's draggable prefix.
    ReorderChain {
        chain: Vec<StepId>,
        from: usize,
        to: usize,
    },
    AppendInfoPopupImage {
        step_id: StepId,
        object_path: String,
    },
    /// Replaces a step wholesale with an earlier copy of itself (edit revert).
    RestoreStep {
        step: Step,
    },
}

impl FormOp {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddRootStep { .. } => "add_root_step",
            Self::AddStep { .. } => "add_step",
            Self::UpdateStep { .. } => "update_step",
            Self::DeleteStep { .. } => "delete_step",
            Self::ReorderChain { .. } => "reorder_chain",
            Self::AppendInfoPopupImage { .. } => "append_info_popup_image",
            Self::RestoreStep { .. } => "restore_step",
        }
    }
}

/// Shallow field merge for [`FormOp::UpdateStep`].
///
/// `None` leaves a field alone. Fields that do not exist on the target step's variant are ignored,
/// and `id`/`type` can never change through a patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepPatch {
    pub question: Option<String>,
    pub placeholder: Option<Option<String>>,
    pub next_step_id: Option<Option<StepId>>,
    pub choices: Option<Vec<Choice>>,
    pub quantity_choices: Option<Vec<QuantityChoice>>,
    pub thank_you_message: Option<String>,
    pub submit_button_text: Option<String>,
    pub info_popup: Option<Option<InfoPopup>>,
}

impl StepPatch {
    pub fn question(question: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            ..Self::default()
        }
    }

    pub fn next_step_id(next_step_id: Option<StepId>) -> Self {
        Self {
            next_step_id: Some(next_step_id),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplyResult {
    pub graph: FormGraph,
    pub applied: usize,
    pub delta: Delta,
}

/// Result of adding a single step: the new graph plus the id the step received.
#[derive(Debug, Clone, PartialEq)]
pub struct AddedStep {
    pub graph: FormGraph,
    pub step_id: StepId,
    pub delta: Delta,
}

/// Minimal delta describing which steps changed as the result of applying ops.
///
/// Coarse on purpose: it reports only added/removed/updated step ids, each sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<StepId>,
    pub removed: Vec<StepId>,
    pub updated: Vec<StepId>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: BTreeSet<StepId>,
    removed: BTreeSet<StepId>,
    updated: BTreeSet<StepId>,
}

impl DeltaBuilder {
    fn record_added(&mut self, step_id: StepId) {
        self.removed.remove(&step_id);
        self.updated.remove(&step_id);
        self.added.insert(step_id);
    }

    fn record_removed(&mut self, step_id: StepId) {
        self.updated.remove(&step_id);
        if self.added.remove(&step_id) {
            return;
        }
        self.removed.insert(step_id);
    }

    fn record_updated(&mut self, step_id: StepId) {
        if self.added.contains(&step_id) || self.removed.contains(&step_id) {
            return;
        }
        self.updated.insert(step_id);
    }

    fn finish(self) -> Delta {
        Delta {
            added: self.added.into_iter().collect(),
            removed: self.removed.into_iter().collect(),
            updated: self.updated.into_iter().collect(),
        }
    }
}

pub fn apply_ops(graph: &FormGraph, ops: &[FormOp]) -> Result<ApplyResult, ApplyError> {
    if ops.is_empty() {
        return Ok(ApplyResult {
            graph: graph.clone(),
            applied: 0,
            delta: Delta::default(),
        });
    }

    let mut working = graph.clone();
    let mut delta = DeltaBuilder::default();

    for op in ops {
        if let Err(err) = apply_op(&mut working, op, &mut delta) {
            tracing::debug!(op = op.name(), error = %err, "form op rejected; graph unchanged");
            return Err(err);
        }
    }

    let delta = delta.finish();
    tracing::trace!(
        applied = ops.len(),
        added = delta.added.len(),
        removed = delta.removed.len(),
        updated = delta.updated.len(),
        "form ops applied"
    );

    Ok(ApplyResult {
        graph: working,
        applied: ops.len(),
        delta,
    })
}

fn apply_single(graph: &FormGraph, op: FormOp) -> Result<ApplyResult, ApplyError> {
    apply_ops(graph, std::slice::from_ref(&op))
}

/// Seeds an empty graph with a root step of `kind`.
pub fn add_root_step(graph: &FormGraph, kind: StepKind) -> Result<AddedStep, ApplyError> {
    let step_id = StepId::generate("step");
    let result = apply_single(
        graph,
        FormOp::AddRootStep {
            step_id: step_id.clone(),
            kind,
        },
    )?;
    Ok(AddedStep {
        graph: result.graph,
        step_id,
        delta: result.delta,
    })
}

/// Adds a step of `kind` under `parent_id` with a freshly generated id.
///
/// A choice parent wires the branch named by `choice_id`; a text or quantity parent has its
/// `nextStepId` replaced by the new step, which orphans any previous successor.
pub fn add_step(
    graph: &FormGraph,
    parent_id: &StepId,
    kind: StepKind,
    choice_id: Option<&ChoiceId>,
) -> Result<AddedStep, ApplyError> {
    let step_id = StepId::generate("step");
    let result = apply_single(
        graph,
        FormOp::AddStep {
            step_id: step_id.clone(),
            parent_id: parent_id.clone(),
            kind,
            choice_id: choice_id.cloned(),
        },
    )?;
    Ok(AddedStep {
        graph: result.graph,
        step_id,
        delta: result.delta,
    })
}

pub fn update_step(
    graph: &FormGraph,
    step_id: &StepId,
    patch: StepPatch,
) -> Result<ApplyResult, ApplyError> {
    apply_single(
        graph,
        FormOp::UpdateStep {
            step_id: step_id.clone(),
            patch,
        },
    )
}

/// Removes a step and nulls every pointer to it. The root can never be deleted.
pub fn delete_step(graph: &FormGraph, step_id: &StepId) -> Result<ApplyResult, ApplyError> {
    apply_single(
        graph,
        FormOp::DeleteStep {
            step_id: step_id.clone(),
        },
    )
}

pub fn reorder_chain(
    graph: &FormGraph,
    chain: &[StepId],
    from: usize,
    to: usize,
) -> Result<ApplyResult, ApplyError> {
    apply_single(
        graph,
        FormOp::ReorderChain {
            chain: chain.to_vec(),
            from,
            to,
        },
    )
}

pub fn append_info_popup_image(
    graph: &FormGraph,
    step_id: &StepId,
    object_path: impl Into<String>,
) -> Result<ApplyResult, ApplyError> {
    apply_single(
        graph,
        FormOp::AppendInfoPopupImage {
            step_id: step_id.clone(),
            object_path: object_path.into(),
        },
    )
}

pub fn restore_step(graph: &FormGraph, step: Step) -> Result<ApplyResult, ApplyError> {
    apply_single(graph, FormOp::RestoreStep { step })
}

/// Coarse classification of [`ApplyError`], mirroring how a host reacts to each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The target does not exist; hosts usually ignore this silently.
    NotFound,
    /// The edit would break a graph invariant; hosts may tell the user why.
    InvariantViolation,
    /// The edit was based on a stale revision.
    Conflict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    Conflict { base_rev: u64, current_rev: u64 },
    StepNotFound { step_id: StepId },
    AlreadyExists { step_id: StepId },
    RootExists { root_step_id: StepId },
    RootNotDeletable { step_id: StepId },
    TooFewChoices { step_id: StepId, len: usize },
    TooFewQuantityChoices { step_id: StepId, len: usize },
    NegativePrice { step_id: StepId, item_id: QuantityChoiceId },
    DanglingPointer { step_id: StepId, target: StepId },
    InvalidChain { step_id: StepId },
    InvalidMove { from: usize, to: usize, draggable: usize },
}

impl ApplyError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Conflict { .. } => ErrorClass::Conflict,
            Self::StepNotFound { .. } => ErrorClass::NotFound,
            Self::AlreadyExists { .. }
            | Self::RootExists { .. }
            | Self::RootNotDeletable { .. }
            | Self::TooFewChoices { .. }
            | Self::TooFewQuantityChoices { .. }
            | Self::NegativePrice { .. }
            | Self::DanglingPointer { .. }
            | Self::InvalidChain { .. }
            | Self::InvalidMove { .. } => ErrorClass::InvariantViolation,
        }
    }
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict { base_rev, current_rev } => {
                write!(f, "stale base_rev (base_rev={base_rev}, current_rev={current_rev})")
            }
            Self::StepNotFound { step_id } => write!(f, "step not found (id={step_id})"),
            Self::AlreadyExists { step_id } => write!(f, "step already exists (id={step_id})"),
            Self::RootExists { root_step_id } => {
                write!(f, "graph already has a root step (id={root_step_id})")
            }
            Self::RootNotDeletable { step_id } => {
                write!(f, "the root step cannot be deleted (id={step_id})")
            }
            Self::TooFewChoices { step_id, len } => write!(
                f,
                "choice step {step_id} needs at least {MIN_CHOICES} choices (got {len})"
            ),
            Self::TooFewQuantityChoices { step_id, len } => write!(
                f,
                "quantity step {step_id} needs at least {MIN_QUANTITY_CHOICES} item (got {len})"
            ),
            Self::NegativePrice { step_id, item_id } => {
                write!(f, "item {item_id} of step {step_id} has a negative price")
            }
            Self::DanglingPointer { step_id, target } => {
                write!(f, "step {step_id} cannot point to missing step {target}")
            }
            Self::InvalidChain { step_id } => {
                write!(f, "chain does not match the graph at step {step_id}")
            }
            Self::InvalidMove { from, to, draggable } => write!(
                f,
                "cannot move draggable {from} to {to} (chain has {draggable} draggable steps)"
            ),
        }
    }
}

impl std::error::Error for ApplyError {}

// Extracted op-application implementation for step mutations.
include!("ops_impl.rs");
