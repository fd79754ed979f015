// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use formtree::model::{
    Choice, ChoiceId, ChoiceStep, ConclusionStep, FormGraph, Step, StepId, StepKind, TextStep,
};

pub fn step_id(value: impl Into<String>) -> StepId {
    StepId::new(value).expect("step id")
}

fn text(id: StepId, next: Option<StepId>) -> Step {
    Step::Text(TextStep {
        question: format!("Question {id}"),
        id,
        placeholder: None,
        next_step_id: next,
        info_popup: None,
    })
}

fn end_step() -> Step {
    Step::Conclusion(ConclusionStep {
        id: step_id("end"),
        question: "Done".to_owned(),
        thank_you_message: "Thanks".to_owned(),
        submit_button_text: "Submit".to_owned(),
        info_popup: None,
    })
}

/// `s00000 -> s00001 -> ... -> end`: one long draggable run.
pub fn linear_form(len: usize) -> FormGraph {
    let ids = (0..len).map(|idx| step_id(format!("s{idx:05}"))).collect::<Vec<_>>();
    let mut steps = Vec::with_capacity(len + 1);
    for (idx, id) in ids.iter().enumerate() {
        let next = ids.get(idx + 1).cloned().unwrap_or_else(|| step_id("end"));
        steps.push(text(id.clone(), Some(next)));
    }
    steps.push(end_step());
    FormGraph::from_steps(ids.first().cloned(), steps)
}

/// `layers` rows of `width` text->choice pairs. Each choice fans out to three steps of the next
/// row (so rows share descendants heavily); the last row ends at `end` or loops back to the root.
pub fn layered_form(layers: usize, width: usize) -> FormGraph {
    let text_id = |layer: usize, idx: usize| step_id(format!("t{layer:03}_{idx:03}"));
    let choice_id = |layer: usize, idx: usize| step_id(format!("c{layer:03}_{idx:03}"));
    let root = text_id(0, 0);

    let mut steps = Vec::with_capacity(layers * width * 2 + 1);
    for layer in 0..layers {
        for idx in 0..width {
            steps.push(text(text_id(layer, idx), Some(choice_id(layer, idx))));

            let targets = if layer + 1 < layers {
                (0..3)
                    .map(|k| text_id(layer + 1, (idx + k) % width))
                    .collect::<Vec<_>>()
            } else {
                vec![step_id("end"), root.clone()]
            };
            let choices = targets
                .into_iter()
                .enumerate()
                .map(|(k, target)| Choice {
                    id: ChoiceId::new(format!("o{k}")).expect("choice id"),
                    label: format!("Option {k}"),
                    next_step_id: Some(target),
                })
                .collect();
            steps.push(Step::Choice(ChoiceStep {
                id: choice_id(layer, idx),
                question: format!("Pick for {layer}/{idx}"),
                choices,
                info_popup: None,
            }));
        }
    }
    steps.push(end_step());
    FormGraph::from_steps(Some(root), steps)
}

pub fn checksum_graph(graph: &FormGraph) -> u64 {
    let mut acc = 0u64;
    for (step_id, step) in graph.steps() {
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(step_id.as_str().len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(match step.kind() {
            StepKind::Text => 1,
            StepKind::Choice => 2,
            StepKind::Quantity => 3,
            StepKind::Conclusion => 4,
        });
        for target in step.outgoing() {
            acc = acc.wrapping_mul(131).wrapping_add(target.as_str().len() as u64);
        }
    }
    acc
}
