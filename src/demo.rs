// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in sample form used by `formtree --demo`, the benches, and integration tests.

use crate::model::{
    Choice, ChoiceId, ChoiceStep, ConclusionStep, FormGraph, IdError, InfoPopup, QuantityChoice,
    QuantityChoiceId, QuantityStep, Step, StepId, TextStep,
};

/// A small coffee-order form with a fork, a shared tail, and one loop.
///
/// ```text
/// welcome -> size { small -> extras, large -> extras, browse -> goodbye }
/// extras -> more { yes -> extras, no -> name }
/// name -> notes -> thanks
/// ```
pub fn demo_form() -> Result<FormGraph, IdError> {
    let step = |value: &str| StepId::new(value);
    let branch = |id: &str, label: &str, next: &str| -> Result<Choice, IdError> {
        Ok(Choice {
            id: ChoiceId::new(id)?,
            label: label.to_owned(),
            next_step_id: Some(StepId::new(next)?),
        })
    };
    let item = |id: &str, label: &str, price: f64, is_no_thanks: bool| -> Result<QuantityChoice, IdError> {
        Ok(QuantityChoice {
            id: QuantityChoiceId::new(id)?,
            label: label.to_owned(),
            price,
            limit: (!is_no_thanks).then_some(4),
            is_no_thanks,
        })
    };

    let steps = [
        Step::Text(TextStep {
            id: step("welcome")?,
            question: "What should we call your order?".to_owned(),
            placeholder: Some("Order name".to_owned()),
            next_step_id: Some(step("size")?),
            info_popup: None,
        }),
        Step::Choice(ChoiceStep {
            id: step("size")?,
            question: "Which size?".to_owned(),
            choices: vec![
                branch("small", "Small", "extras")?,
                branch("large", "Large", "extras")?,
                branch("browse", "Just browsing", "goodbye")?,
            ],
            info_popup: Some(InfoPopup {
                enabled: true,
                header: "Sizes".to_owned(),
                images: vec!["/objects/demo/cups.png".to_owned()],
                description: "Small is 250 ml, large is 400 ml.".to_owned(),
            }),
        }),
        Step::Quantity(QuantityStep {
            id: step("extras")?,
            question: "Any extras?".to_owned(),
            quantity_choices: vec![
                item("shot", "Extra shot", 0.6, false)?,
                item("syrup", "Vanilla syrup", 0.4, false)?,
                item("none", "No thanks", 0.0, true)?,
            ],
            next_step_id: Some(step("more")?),
            info_popup: None,
        }),
        Step::Choice(ChoiceStep {
            id: step("more")?,
            question: "Add another drink?".to_owned(),
            choices: vec![branch("yes", "Yes", "extras")?, branch("no", "No", "name")?],
            info_popup: None,
        }),
        Step::Text(TextStep {
            id: step("name")?,
            question: "Name for the pickup shelf".to_owned(),
            placeholder: None,
            next_step_id: Some(step("notes")?),
            info_popup: None,
        }),
        Step::Text(TextStep {
            id: step("notes")?,
            question: "Anything we should know?".to_owned(),
            placeholder: Some("Allergies, oat milk, ...".to_owned()),
            next_step_id: Some(step("thanks")?),
            info_popup: None,
        }),
        Step::Conclusion(ConclusionStep {
            id: step("thanks")?,
            question: "All set".to_owned(),
            thank_you_message: "Your order is in the queue.".to_owned(),
            submit_button_text: "Place order".to_owned(),
            info_popup: None,
        }),
        Step::Conclusion(ConclusionStep {
            id: step("goodbye")?,
            question: "Come back soon".to_owned(),
            thank_you_message: "Thanks for stopping by.".to_owned(),
            submit_button_text: "Close".to_owned(),
            info_popup: None,
        }),
    ];

    Ok(FormGraph::from_steps(Some(step("welcome")?), steps))
}
