// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: the step graph and its typed step variants.
//!
//! A form is an arena of steps keyed by [`StepId`]; forward pointers are plain ids, so the graph
//! may contain cycles and shared branches.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod graph;
pub mod ids;
pub mod step;

pub use graph::{FormGraph, GraphIssue};
pub use ids::{ChoiceId, Id, IdError, QuantityChoiceId, StepId};
pub use step::{
    Choice, ChoiceStep, ConclusionStep, InfoPopup, Outgoing, ParseStepKindError, QuantityChoice,
    QuantityStep, Step, StepKind, TextStep, MIN_CHOICES, MIN_QUANTITY_CHOICES,
};

/// JSON Schema of the persisted/transport shape of a [`FormGraph`].
pub fn graph_json_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(FormGraph);
    schema.to_value()
}

#[cfg(test)]
mod tests {
    use super::graph_json_schema;

    #[test]
    fn schema_describes_root_and_steps() {
        let schema = graph_json_schema();
        let properties = &schema["properties"];
        assert!(properties.get("rootStepId").is_some());
        assert!(properties.get("steps").is_some());
    }
}
