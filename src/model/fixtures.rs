// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::graph::FormGraph;
use super::ids::{ChoiceId, StepId};
use super::step::{Choice, ChoiceStep, ConclusionStep, Step, TextStep};

pub(crate) fn sid(value: &str) -> StepId {
    StepId::new(value).expect("step id")
}

pub(crate) fn cid(value: &str) -> ChoiceId {
    ChoiceId::new(value).expect("choice id")
}

pub(crate) fn text(id: &str, next: Option<&str>) -> Step {
    Step::Text(TextStep {
        id: sid(id),
        question: id.to_uppercase(),
        placeholder: None,
        next_step_id: next.map(sid),
        info_popup: None,
    })
}

pub(crate) fn choice(id: &str, branches: &[(&str, Option<&str>)]) -> Step {
    Step::Choice(ChoiceStep {
        id: sid(id),
        question: id.to_uppercase(),
        choices: branches
            .iter()
            .map(|(choice_id, next)| Choice {
                id: cid(choice_id),
                label: (*choice_id).to_owned(),
                next_step_id: next.map(sid),
            })
            .collect(),
        info_popup: None,
    })
}

pub(crate) fn conclusion(id: &str) -> Step {
    Step::Conclusion(ConclusionStep {
        id: sid(id),
        question: id.to_uppercase(),
        thank_you_message: "Thanks".to_owned(),
        submit_button_text: "Send".to_owned(),
        info_popup: None,
    })
}

/// `q1 -> q2 -> c1 { yes -> q3, no -> (none) }`.
pub(crate) fn branching_intake() -> FormGraph {
    FormGraph::from_steps(
        Some(sid("q1")),
        [
            text("q1", Some("q2")),
            text("q2", Some("c1")),
            choice("c1", &[("yes", Some("q3")), ("no", None)]),
            text("q3", None),
        ],
    )
}

/// `hub { left -> a, right -> end }` with the run `a -> b -> c -> d -> end`.
pub(crate) fn hub_with_run() -> FormGraph {
    FormGraph::from_steps(
        Some(sid("hub")),
        [
            choice("hub", &[("left", Some("a")), ("right", Some("end"))]),
            text("a", Some("b")),
            text("b", Some("c")),
            text("c", Some("d")),
            text("d", Some("end")),
            conclusion("end"),
        ],
    )
}

/// `a -> b -> c { again -> b, on -> d, stay -> c }` with `d -> b` closing a second loop.
pub(crate) fn looping_form() -> FormGraph {
    FormGraph::from_steps(
        Some(sid("a")),
        [
            text("a", Some("b")),
            text("b", Some("c")),
            choice("c", &[("again", Some("b")), ("on", Some("d")), ("stay", Some("c"))]),
            text("d", Some("b")),
        ],
    )
}
