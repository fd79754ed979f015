// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{QuantityChoiceId, StepId};
use super::step::{Step, StepKind, MIN_CHOICES, MIN_QUANTITY_CHOICES};

/// The whole editable form: an arena of steps keyed by id plus the designated root.
///
/// `Clone` is a deep copy; graph values never share mutable structure, which is what lets every
/// operation return a fresh graph while callers keep holding the previous one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormGraph {
    #[serde(default)]
    root_step_id: Option<StepId>,
    #[serde(default)]
    steps: BTreeMap<StepId, Step>,
}

impl FormGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from already-constructed steps, keyed by their own ids.
    ///
    /// No validation happens here; call [`FormGraph::validate`] when the input is untrusted.
    pub fn from_steps(root_step_id: Option<StepId>, steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            root_step_id,
            steps: steps
                .into_iter()
                .map(|step| (step.id().clone(), step))
                .collect(),
        }
    }

    pub fn root_step_id(&self) -> Option<&StepId> {
        self.root_step_id.as_ref()
    }

    pub(crate) fn set_root_step_id(&mut self, root_step_id: Option<StepId>) {
        self.root_step_id = root_step_id;
    }

    pub fn steps(&self) -> &BTreeMap<StepId, Step> {
        &self.steps
    }

    pub(crate) fn steps_mut(&mut self) -> &mut BTreeMap<StepId, Step> {
        &mut self.steps
    }

    pub fn step(&self, step_id: &StepId) -> Option<&Step> {
        self.steps.get(step_id)
    }

    pub(crate) fn step_mut(&mut self, step_id: &StepId) -> Option<&mut Step> {
        self.steps.get_mut(step_id)
    }

    pub fn contains(&self, step_id: &StepId) -> bool {
        self.steps.contains_key(step_id)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_root(&self, step_id: &StepId) -> bool {
        self.root_step_id.as_ref() == Some(step_id)
    }

    /// Ids of every step with a forward pointer to `target`, in id order.
    pub fn referrers(&self, target: &StepId) -> Vec<StepId> {
        self.steps
            .iter()
            .filter(|(_, step)| step.points_to(target))
            .map(|(step_id, _)| step_id.clone())
            .collect()
    }

    /// Checks every structural invariant and reports all violations found.
    pub fn validate(&self) -> Vec<GraphIssue> {
        let mut issues = Vec::new();

        match &self.root_step_id {
            None if !self.steps.is_empty() => issues.push(GraphIssue::MissingRoot),
            Some(root) if !self.steps.contains_key(root) => {
                issues.push(GraphIssue::UnknownRoot { root_step_id: root.clone() });
            }
            _ => {}
        }

        for (key, step) in &self.steps {
            if step.id() != key {
                issues.push(GraphIssue::KeyMismatch {
                    key: key.clone(),
                    step_id: step.id().clone(),
                });
            }

            for target in step.outgoing() {
                if !self.steps.contains_key(target) {
                    issues.push(GraphIssue::DanglingPointer {
                        step_id: key.clone(),
                        target: target.clone(),
                    });
                }
            }

            match step {
                Step::Choice(choice) if choice.choices.len() < MIN_CHOICES => {
                    issues.push(GraphIssue::TooFewOptions {
                        step_id: key.clone(),
                        kind: StepKind::Choice,
                        len: choice.choices.len(),
                    });
                }
                Step::Quantity(quantity) => {
                    if quantity.quantity_choices.len() < MIN_QUANTITY_CHOICES {
                        issues.push(GraphIssue::TooFewOptions {
                            step_id: key.clone(),
                            kind: StepKind::Quantity,
                            len: quantity.quantity_choices.len(),
                        });
                    }
                    for item in &quantity.quantity_choices {
                        if item.price.is_nan() || item.price < 0.0 {
                            issues.push(GraphIssue::InvalidPrice {
                                step_id: key.clone(),
                                item_id: item.id.clone(),
                            });
                        }
                    }
                }
                _ => {}
            }
        }

        issues
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// A structural invariant violation found by [`FormGraph::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphIssue {
    MissingRoot,
    UnknownRoot { root_step_id: StepId },
    KeyMismatch { key: StepId, step_id: StepId },
    DanglingPointer { step_id: StepId, target: StepId },
    TooFewOptions { step_id: StepId, kind: StepKind, len: usize },
    InvalidPrice { step_id: StepId, item_id: QuantityChoiceId },
}

impl fmt::Display for GraphIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRoot => f.write_str("graph has steps but no root step"),
            Self::UnknownRoot { root_step_id } => {
                write!(f, "root step {root_step_id} is not in the graph")
            }
            Self::KeyMismatch { key, step_id } => {
                write!(f, "step stored under key {key} has id {step_id}")
            }
            Self::DanglingPointer { step_id, target } => {
                write!(f, "step {step_id} points to missing step {target}")
            }
            Self::TooFewOptions { step_id, kind, len } => {
                write!(f, "{kind} step {step_id} has only {len} option(s)")
            }
            Self::InvalidPrice { step_id, item_id } => {
                write!(
                    f,
                    "quantity item {item_id} of step {step_id} has a negative or non-numeric price"
                )
            }
        }
    }
}
