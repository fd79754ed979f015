// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeSet, VecDeque};

use crate::model::{FormGraph, Step, StepId};

/// The maximal straight-line run starting at `start_id`.
///
/// Follows `nextStepId` while the current step is a text or quantity step. The step that ends the
/// run (a choice, a conclusion, or a step without a successor) is included. The walk stops before
/// any id already in `visited`, so a run that loops back into rendered territory is cut there.
/// Every id in the returned chain is added to `visited`.
pub fn linear_chain(
    graph: &FormGraph,
    start_id: &StepId,
    visited: &mut BTreeSet<StepId>,
) -> Vec<StepId> {
    let mut chain = Vec::new();
    let mut current = Some(start_id);

    while let Some(step_id) = current.take() {
        if visited.contains(step_id) {
            break;
        }
        let Some(step) = graph.step(step_id) else {
            break;
        };
        visited.insert(step_id.clone());
        chain.push(step_id.clone());

        current = match step {
            Step::Text(_) | Step::Quantity(_) => step.next_step_id(),
            Step::Choice(_) | Step::Conclusion(_) => None,
        };
    }

    chain
}

/// Chain members a user may drag: everything except choice and conclusion steps.
pub fn draggable_ids(graph: &FormGraph, chain: &[StepId]) -> Vec<StepId> {
    chain
        .iter()
        .filter(|step_id| graph.step(step_id).is_some_and(Step::is_draggable))
        .cloned()
        .collect()
}

/// Decomposes everything reachable from the root into chains, root chain first.
///
/// Chains hanging off a choice's branches are queued in choice order; one `visited` set is shared,
/// so each step lands in exactly one chain.
pub fn chains(graph: &FormGraph) -> Vec<Vec<StepId>> {
    let mut result = Vec::new();
    let Some(root_step_id) = graph.root_step_id() else {
        return result;
    };

    let mut visited = BTreeSet::new();
    let mut queue: VecDeque<&StepId> = VecDeque::from([root_step_id]);

    while let Some(start_id) = queue.pop_front() {
        let chain = linear_chain(graph, start_id, &mut visited);
        let Some(last_id) = chain.last() else {
            continue;
        };

        if let Some(Step::Choice(choice)) = graph.step(last_id) {
            queue.extend(
                choice
                    .choices
                    .iter()
                    .filter_map(|branch| branch.next_step_id.as_ref())
                    .filter(|next_id| !visited.contains(*next_id)),
            );
        }
        result.push(chain);
    }

    result
}
