// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use crate::model::{ChoiceId, FormGraph, Step, StepId};

/// Walks forward from `start_id`, adding every reachable step (including `start_id`) to `visited`.
///
/// Ids already in `visited` are neither re-added nor descended into, which is what makes the walk
/// terminate on cyclic graphs. Pointers to ids missing from the graph are ignored.
pub fn visit(graph: &FormGraph, start_id: &StepId, visited: &mut BTreeSet<StepId>) {
    let mut stack: Vec<&StepId> = vec![start_id];

    while let Some(step_id) = stack.pop() {
        if visited.contains(step_id) {
            continue;
        }
        let Some(step) = graph.step(step_id) else {
            continue;
        };
        visited.insert(step_id.clone());

        let outgoing = step.outgoing();
        for next_id in outgoing.into_iter().rev() {
            if !visited.contains(next_id) {
                stack.push(next_id);
            }
        }
    }
}

/// Distinct steps strictly reachable from `start_id`, in id order. `start_id` itself is excluded
/// even when a cycle leads back to it.
pub fn descendants(graph: &FormGraph, start_id: &StepId) -> Vec<StepId> {
    let mut visited = BTreeSet::new();
    visit(graph, start_id, &mut visited);
    visited.remove(start_id);
    visited.into_iter().collect()
}

/// Number of distinct steps strictly reachable from `start_id`.
///
/// Shared branches count once and cycles add nothing once visited. Used for the "this will also
/// remove N steps" style confirmation a host shows before deleting.
pub fn count_descendants(graph: &FormGraph, start_id: &StepId) -> usize {
    let mut visited = BTreeSet::new();
    visit(graph, start_id, &mut visited);
    visited.len().saturating_sub(usize::from(visited.contains(start_id)))
}

/// Steps present in the graph but unreachable from the root, in id order.
pub fn unreachable_steps(graph: &FormGraph) -> Vec<StepId> {
    let mut visited = BTreeSet::new();
    if let Some(root_step_id) = graph.root_step_id() {
        visit(graph, root_step_id, &mut visited);
    }
    graph
        .steps()
        .keys()
        .filter(|step_id| !visited.contains(*step_id))
        .cloned()
        .collect()
}

/// One line of a depth-first rendering of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEntry {
    /// First time the walk reaches this step; its successors follow at `depth + 1`.
    Step {
        step_id: StepId,
        depth: usize,
        via: Option<ChoiceId>,
    },
    /// The walk reached a step that was already rendered; it is not expanded again.
    Revisit {
        step_id: StepId,
        depth: usize,
        via: Option<ChoiceId>,
    },
}

impl RenderEntry {
    pub fn step_id(&self) -> &StepId {
        match self {
            Self::Step { step_id, .. } | Self::Revisit { step_id, .. } => step_id,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Self::Step { depth, .. } | Self::Revisit { depth, .. } => *depth,
        }
    }

    pub fn is_revisit(&self) -> bool {
        matches!(self, Self::Revisit { .. })
    }
}

/// Pre-order walk from the root, reporting revisits instead of recursing into them.
///
/// `via` is the choice that led to the entry when its parent is a choice step.
pub fn render_walk(graph: &FormGraph) -> Vec<RenderEntry> {
    let mut entries = Vec::new();
    let Some(root_step_id) = graph.root_step_id() else {
        return entries;
    };

    let mut visited: BTreeSet<&StepId> = BTreeSet::new();
    let mut stack: Vec<(&StepId, usize, Option<&ChoiceId>)> = vec![(root_step_id, 0, None)];

    while let Some((step_id, depth, via)) = stack.pop() {
        let Some(step) = graph.step(step_id) else {
            continue;
        };
        if !visited.insert(step_id) {
            entries.push(RenderEntry::Revisit {
                step_id: step_id.clone(),
                depth,
                via: via.cloned(),
            });
            continue;
        }
        entries.push(RenderEntry::Step {
            step_id: step_id.clone(),
            depth,
            via: via.cloned(),
        });

        let child_depth = depth.saturating_add(1);
        match step {
            Step::Choice(choice) => {
                for branch in choice.choices.iter().rev() {
                    if let Some(next_id) = &branch.next_step_id {
                        stack.push((next_id, child_depth, Some(&branch.id)));
                    }
                }
            }
            _ => {
                if let Some(next_id) = step.next_step_id() {
                    stack.push((next_id, child_depth, None));
                }
            }
        }
    }

    entries
}
