// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Drag-to-reorder inside a linear chain.
//!
//! A chain is the straight run produced by [`crate::query::linear_chain`]: a prefix of text and
//! quantity steps, optionally ended by one choice or conclusion step. Only the prefix moves. After
//! a move the chain's internal links are rewritten to the new order, the run's exit pointer is
//! carried over to whichever step is now last, and every pointer into the chain's old first step
//! (including the root) is redirected to the new first step.

use std::collections::BTreeSet;

use super::{ApplyError, DeltaBuilder};
use crate::model::{FormGraph, Step, StepId};

pub(super) fn apply_reorder(
    graph: &mut FormGraph,
    chain: &[StepId],
    from: usize,
    to: usize,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    let draggable = check_chain(graph, chain)?;

    if draggable < 2 || from == to {
        return Ok(());
    }
    if from >= draggable || to >= draggable {
        return Err(ApplyError::InvalidMove {
            from,
            to,
            draggable,
        });
    }

    let mut new_chain = chain.to_vec();
    let moved = new_chain.remove(from);
    new_chain.insert(to, moved);

    rewire(graph, chain, &new_chain, delta);
    Ok(())
}

/// Verifies that `chain` is a live run of `graph` and returns the length of its draggable prefix.
fn check_chain(graph: &FormGraph, chain: &[StepId]) -> Result<usize, ApplyError> {
    let mut seen = BTreeSet::new();
    let mut draggable = 0usize;

    for (index, step_id) in chain.iter().enumerate() {
        let Some(step) = graph.step(step_id) else {
            return Err(ApplyError::StepNotFound {
                step_id: step_id.clone(),
            });
        };
        let invalid = || ApplyError::InvalidChain {
            step_id: step_id.clone(),
        };

        if !seen.insert(step_id) {
            return Err(invalid());
        }
        if step.is_draggable() {
            if draggable != index {
                return Err(invalid());
            }
            draggable += 1;
        }
        if let Some(next_id) = chain.get(index + 1) {
            if step.next_step_id() != Some(next_id) {
                return Err(invalid());
            }
        }
    }

    Ok(draggable)
}

fn rewire(graph: &mut FormGraph, old_chain: &[StepId], new_chain: &[StepId], delta: &mut DeltaBuilder) {
    let (Some(old_entry), Some(new_entry)) = (old_chain.first(), new_chain.first()) else {
        return;
    };
    let (Some(old_tail), Some(new_tail)) = (old_chain.last(), new_chain.last()) else {
        return;
    };

    let mut exit = graph.step(old_tail).and_then(Step::next_step_id).cloned();

    // Entry repair runs before the internal links are written, so the only pointers it touches
    // are ones that referenced the chain from outside (or looped back to its head).
    if old_entry != new_entry {
        for (step_id, step) in graph.steps_mut().iter_mut() {
            if step.retarget(old_entry, Some(new_entry)) {
                delta.record_updated(step_id.clone());
            }
        }
        if graph.is_root(old_entry) {
            graph.set_root_step_id(Some(new_entry.clone()));
        }
        if exit.as_ref() == Some(old_entry) {
            exit = Some(new_entry.clone());
        }
    }

    for pair in new_chain.windows(2) {
        let [earlier, later] = pair else {
            continue;
        };
        link(graph, earlier, Some(later), delta);
    }

    if old_tail != new_tail {
        link(graph, new_tail, exit.as_ref(), delta);
    }
}

fn link(graph: &mut FormGraph, step_id: &StepId, next_id: Option<&StepId>, delta: &mut DeltaBuilder) {
    let Some(step) = graph.step_mut(step_id) else {
        return;
    };
    // Choice and conclusion steps have no single successor to rewrite.
    if !step.is_draggable() || step.next_step_id() == next_id {
        return;
    }
    step.set_next_step_id(next_id.cloned());
    delta.record_updated(step_id.clone());
}
