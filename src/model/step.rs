// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ids::{ChoiceId, QuantityChoiceId, StepId};

/// Minimum number of options a choice step must keep.
pub const MIN_CHOICES: usize = 2;

/// Minimum number of items a quantity step must keep.
pub const MIN_QUANTITY_CHOICES: usize = 1;

/// The discriminant of a [`Step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum StepKind {
    Text,
    Choice,
    Quantity,
    Conclusion,
}

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Choice => "choice",
            Self::Quantity => "quantity",
            Self::Conclusion => "conclusion",
        }
    }

    /// Text and quantity steps form the reorderable body of a chain.
    pub fn is_draggable(self) -> bool {
        matches!(self, Self::Text | Self::Quantity)
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStepKindError {
    value: String,
}

impl fmt::Display for ParseStepKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown step type '{}' (expected text, choice, quantity or conclusion)",
            self.value
        )
    }
}

impl std::error::Error for ParseStepKindError {}

impl FromStr for StepKind {
    type Err = ParseStepKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "choice" => Ok(Self::Choice),
            "quantity" => Ok(Self::Quantity),
            "conclusion" => Ok(Self::Conclusion),
            other => Err(ParseStepKindError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Optional explanatory popup attached to any step. The engine only copies it around.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InfoPopup {
    pub enabled: bool,
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TextStep {
    pub id: StepId,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub next_step_id: Option<StepId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_popup: Option<InfoPopup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub id: ChoiceId,
    pub label: String,
    #[serde(default)]
    pub next_step_id: Option<StepId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceStep {
    pub id: StepId,
    pub question: String,
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_popup: Option<InfoPopup>,
}

impl ChoiceStep {
    pub fn choice(&self, choice_id: &ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|choice| &choice.id == choice_id)
    }

    pub fn choice_mut(&mut self, choice_id: &ChoiceId) -> Option<&mut Choice> {
        self.choices.iter_mut().find(|choice| &choice.id == choice_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuantityChoice {
    pub id: QuantityChoiceId,
    pub label: String,
    pub price: f64,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub is_no_thanks: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuantityStep {
    pub id: StepId,
    pub question: String,
    pub quantity_choices: Vec<QuantityChoice>,
    #[serde(default)]
    pub next_step_id: Option<StepId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_popup: Option<InfoPopup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConclusionStep {
    pub id: StepId,
    pub question: String,
    pub thank_you_message: String,
    pub submit_button_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_popup: Option<InfoPopup>,
}

/// One node of the form graph.
///
/// Pointers to other steps are plain ids into the owning [`super::FormGraph`]; a step never owns
/// its successors, so cycles are representable without any special casing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Step {
    Text(TextStep),
    Choice(ChoiceStep),
    Quantity(QuantityStep),
    Conclusion(ConclusionStep),
}

/// Forward pointers of one step. Most steps have at most one; choice steps rarely exceed four.
pub type Outgoing<'a> = SmallVec<[&'a StepId; 4]>;

impl Step {
    /// Builds a step of `kind` with the defaults a freshly added step starts with.
    ///
    /// Option ids inside choice/quantity steps are minted here.
    pub fn with_defaults(id: StepId, kind: StepKind) -> Self {
        match kind {
            StepKind::Text => Self::Text(TextStep {
                id,
                question: "New question".to_owned(),
                placeholder: Some(String::new()),
                next_step_id: None,
                info_popup: None,
            }),
            StepKind::Choice => Self::Choice(ChoiceStep {
                id,
                question: "New multiple-choice question".to_owned(),
                choices: (1..=3)
                    .map(|n| Choice {
                        id: ChoiceId::generate("choice"),
                        label: format!("Option {n}"),
                        next_step_id: None,
                    })
                    .collect(),
                info_popup: None,
            }),
            StepKind::Quantity => Self::Quantity(QuantityStep {
                id,
                question: "How many would you like?".to_owned(),
                quantity_choices: vec![
                    QuantityChoice {
                        id: QuantityChoiceId::generate("item"),
                        label: "Item 1".to_owned(),
                        price: 10.0,
                        limit: None,
                        is_no_thanks: false,
                    },
                    QuantityChoice {
                        id: QuantityChoiceId::generate("item"),
                        label: "Item 2".to_owned(),
                        price: 20.0,
                        limit: None,
                        is_no_thanks: false,
                    },
                    QuantityChoice {
                        id: QuantityChoiceId::generate("item"),
                        label: "No thanks".to_owned(),
                        price: 0.0,
                        limit: None,
                        is_no_thanks: true,
                    },
                ],
                next_step_id: None,
                info_popup: None,
            }),
            StepKind::Conclusion => Self::Conclusion(ConclusionStep {
                id,
                question: "All done!".to_owned(),
                thank_you_message: "Thank you! Your answers have been submitted.".to_owned(),
                submit_button_text: "Submit".to_owned(),
                info_popup: None,
            }),
        }
    }

    pub fn id(&self) -> &StepId {
        match self {
            Self::Text(step) => &step.id,
            Self::Choice(step) => &step.id,
            Self::Quantity(step) => &step.id,
            Self::Conclusion(step) => &step.id,
        }
    }

    pub fn kind(&self) -> StepKind {
        match self {
            Self::Text(_) => StepKind::Text,
            Self::Choice(_) => StepKind::Choice,
            Self::Quantity(_) => StepKind::Quantity,
            Self::Conclusion(_) => StepKind::Conclusion,
        }
    }

    pub fn question(&self) -> &str {
        match self {
            Self::Text(step) => &step.question,
            Self::Choice(step) => &step.question,
            Self::Quantity(step) => &step.question,
            Self::Conclusion(step) => &step.question,
        }
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        let question = question.into();
        match self {
            Self::Text(step) => step.question = question,
            Self::Choice(step) => step.question = question,
            Self::Quantity(step) => step.question = question,
            Self::Conclusion(step) => step.question = question,
        }
    }

    pub fn info_popup(&self) -> Option<&InfoPopup> {
        match self {
            Self::Text(step) => step.info_popup.as_ref(),
            Self::Choice(step) => step.info_popup.as_ref(),
            Self::Quantity(step) => step.info_popup.as_ref(),
            Self::Conclusion(step) => step.info_popup.as_ref(),
        }
    }

    pub fn info_popup_mut(&mut self) -> &mut Option<InfoPopup> {
        match self {
            Self::Text(step) => &mut step.info_popup,
            Self::Choice(step) => &mut step.info_popup,
            Self::Quantity(step) => &mut step.info_popup,
            Self::Conclusion(step) => &mut step.info_popup,
        }
    }

    pub fn is_draggable(&self) -> bool {
        self.kind().is_draggable()
    }

    /// The single forward pointer of a text/quantity step; `None` for choice/conclusion steps and
    /// for text/quantity steps that end the form.
    pub fn next_step_id(&self) -> Option<&StepId> {
        match self {
            Self::Text(step) => step.next_step_id.as_ref(),
            Self::Quantity(step) => step.next_step_id.as_ref(),
            Self::Choice(_) | Self::Conclusion(_) => None,
        }
    }

    /// Sets the single forward pointer. Returns `false` (and changes nothing) for variants without
    /// one.
    pub fn set_next_step_id(&mut self, next_step_id: Option<StepId>) -> bool {
        match self {
            Self::Text(step) => {
                step.next_step_id = next_step_id;
                true
            }
            Self::Quantity(step) => {
                step.next_step_id = next_step_id;
                true
            }
            Self::Choice(_) | Self::Conclusion(_) => false,
        }
    }

    /// All forward pointers in declaration order (choice order for choice steps).
    pub fn outgoing(&self) -> Outgoing<'_> {
        match self {
            Self::Text(step) => step.next_step_id.iter().collect(),
            Self::Quantity(step) => step.next_step_id.iter().collect(),
            Self::Choice(step) => step
                .choices
                .iter()
                .filter_map(|choice| choice.next_step_id.as_ref())
                .collect(),
            Self::Conclusion(_) => Outgoing::new(),
        }
    }

    pub fn points_to(&self, target: &StepId) -> bool {
        self.outgoing().into_iter().any(|id| id == target)
    }

    /// Rewrites every forward pointer equal to `old` to `new`. Returns whether anything changed.
    pub fn retarget(&mut self, old: &StepId, new: Option<&StepId>) -> bool {
        fn swap(slot: &mut Option<StepId>, old: &StepId, new: Option<&StepId>) -> bool {
            if slot.as_ref() != Some(old) {
                return false;
            }
            *slot = new.cloned();
            true
        }

        match self {
            Self::Text(step) => swap(&mut step.next_step_id, old, new),
            Self::Quantity(step) => swap(&mut step.next_step_id, old, new),
            Self::Choice(step) => step
                .choices
                .iter_mut()
                .fold(false, |changed, choice| swap(&mut choice.next_step_id, old, new) | changed),
            Self::Conclusion(_) => false,
        }
    }

    /// Nulls every forward pointer for which `keep` returns `false`.
    pub(crate) fn retain_pointers(&mut self, mut keep: impl FnMut(&StepId) -> bool) -> bool {
        let mut clear = |slot: &mut Option<StepId>| match slot {
            Some(id) if !keep(id) => {
                *slot = None;
                true
            }
            _ => false,
        };

        match self {
            Self::Text(step) => clear(&mut step.next_step_id),
            Self::Quantity(step) => clear(&mut step.next_step_id),
            Self::Choice(step) => step
                .choices
                .iter_mut()
                .fold(false, |changed, choice| clear(&mut choice.next_step_id) | changed),
            Self::Conclusion(_) => false,
        }
    }
}
