// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Step mutation helpers used by `apply_ops`.
/// Keeps `ops::mod` focused on public op types and orchestration.
fn apply_op(graph: &mut FormGraph, op: &FormOp, delta: &mut DeltaBuilder) -> Result<(), ApplyError> {
    match op {
        FormOp::AddRootStep { step_id, kind } => apply_add_root(graph, step_id, *kind, delta),
        FormOp::AddStep {
            step_id,
            parent_id,
            kind,
            choice_id,
        } => apply_add(graph, step_id, parent_id, *kind, choice_id.as_ref(), delta),
        FormOp::UpdateStep { step_id, patch } => apply_update(graph, step_id, patch, delta),
        FormOp::DeleteStep { step_id } => apply_delete(graph, step_id, delta),
        FormOp::ReorderChain { chain, from, to } => {
            reorder::apply_reorder(graph, chain, *from, *to, delta)
        }
        FormOp::AppendInfoPopupImage {
            step_id,
            object_path,
        } => {
            let Some(existing) = graph.step(step_id) else {
                return Err(ApplyError::StepNotFound {
                    step_id: step_id.clone(),
                });
            };
            let mut popup = existing.info_popup().cloned().unwrap_or_default();
            popup.images.push(object_path.clone());
            let patch = StepPatch {
                info_popup: Some(Some(popup)),
                ..StepPatch::default()
            };
            apply_update(graph, step_id, &patch, delta)
        }
        FormOp::RestoreStep { step } => apply_restore(graph, step, delta),
    }
}

fn apply_add_root(
    graph: &mut FormGraph,
    step_id: &StepId,
    kind: StepKind,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    if let Some(root_step_id) = graph.root_step_id() {
        return Err(ApplyError::RootExists {
            root_step_id: root_step_id.clone(),
        });
    }
    if graph.contains(step_id) {
        return Err(ApplyError::AlreadyExists {
            step_id: step_id.clone(),
        });
    }

    graph
        .steps_mut()
        .insert(step_id.clone(), Step::with_defaults(step_id.clone(), kind));
    graph.set_root_step_id(Some(step_id.clone()));
    delta.record_added(step_id.clone());
    Ok(())
}

fn apply_add(
    graph: &mut FormGraph,
    step_id: &StepId,
    parent_id: &StepId,
    kind: StepKind,
    choice_id: Option<&ChoiceId>,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    if graph.contains(step_id) {
        return Err(ApplyError::AlreadyExists {
            step_id: step_id.clone(),
        });
    }
    let Some(parent) = graph.step_mut(parent_id) else {
        return Err(ApplyError::StepNotFound {
            step_id: parent_id.clone(),
        });
    };

    let wired = match parent {
        Step::Choice(choice) => match choice_id.and_then(|id| choice.choice_mut(id)) {
            Some(branch) => {
                branch.next_step_id = Some(step_id.clone());
                true
            }
            None => false,
        },
        Step::Text(text) => replace_successor(&mut text.next_step_id, parent_id, step_id),
        Step::Quantity(quantity) => {
            replace_successor(&mut quantity.next_step_id, parent_id, step_id)
        }
        Step::Conclusion(_) => false,
    };

    graph
        .steps_mut()
        .insert(step_id.clone(), Step::with_defaults(step_id.clone(), kind));
    delta.record_added(step_id.clone());

    if wired {
        delta.record_updated(parent_id.clone());
    } else {
        tracing::debug!(
            parent = %parent_id,
            step = %step_id,
            "parent has no matching slot; step added unwired"
        );
    }
    Ok(())
}

fn replace_successor(slot: &mut Option<StepId>, parent_id: &StepId, step_id: &StepId) -> bool {
    if let Some(previous) = slot.replace(step_id.clone()) {
        // The previous successor stays in the map but is no longer reachable through the parent.
        tracing::debug!(
            parent = %parent_id,
            previous = %previous,
            step = %step_id,
            "successor replaced"
        );
    }
    true
}

fn apply_update(
    graph: &mut FormGraph,
    step_id: &StepId,
    patch: &StepPatch,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    let Some(existing) = graph.step(step_id) else {
        return Err(ApplyError::StepNotFound {
            step_id: step_id.clone(),
        });
    };

    let mut updated = existing.clone();
    merge_patch(&mut updated, step_id, patch)?;

    let previous_targets = existing.outgoing();
    let dangling = updated
        .outgoing()
        .into_iter()
        .find(|target| !graph.contains(target) && !previous_targets.contains(target))
        .cloned();
    drop(previous_targets);
    if let Some(target) = dangling {
        return Err(ApplyError::DanglingPointer {
            step_id: step_id.clone(),
            target,
        });
    }

    graph.steps_mut().insert(step_id.clone(), updated);
    delta.record_updated(step_id.clone());
    Ok(())
}

fn merge_patch(step: &mut Step, step_id: &StepId, patch: &StepPatch) -> Result<(), ApplyError> {
    if let Some(question) = &patch.question {
        step.set_question(question.clone());
    }
    if let Some(info_popup) = &patch.info_popup {
        *step.info_popup_mut() = info_popup.clone();
    }

    match step {
        Step::Text(text) => {
            if let Some(placeholder) = &patch.placeholder {
                text.placeholder = placeholder.clone();
            }
            if let Some(next_step_id) = &patch.next_step_id {
                text.next_step_id = next_step_id.clone();
            }
        }
        Step::Choice(choice) => {
            if let Some(choices) = &patch.choices {
                if choices.len() < MIN_CHOICES {
                    return Err(ApplyError::TooFewChoices {
                        step_id: step_id.clone(),
                        len: choices.len(),
                    });
                }
                choice.choices = choices.clone();
            }
        }
        Step::Quantity(quantity) => {
            if let Some(items) = &patch.quantity_choices {
                if items.len() < MIN_QUANTITY_CHOICES {
                    return Err(ApplyError::TooFewQuantityChoices {
                        step_id: step_id.clone(),
                        len: items.len(),
                    });
                }
                if let Some(item) = items
                    .iter()
                    .find(|item| item.price.is_nan() || item.price < 0.0)
                {
                    return Err(ApplyError::NegativePrice {
                        step_id: step_id.clone(),
                        item_id: item.id.clone(),
                    });
                }
                quantity.quantity_choices = items.clone();
            }
            if let Some(next_step_id) = &patch.next_step_id {
                quantity.next_step_id = next_step_id.clone();
            }
        }
        Step::Conclusion(conclusion) => {
            if let Some(message) = &patch.thank_you_message {
                conclusion.thank_you_message = message.clone();
            }
            if let Some(text) = &patch.submit_button_text {
                conclusion.submit_button_text = text.clone();
            }
        }
    }

    Ok(())
}

fn apply_delete(
    graph: &mut FormGraph,
    step_id: &StepId,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    if graph.is_root(step_id) {
        return Err(ApplyError::RootNotDeletable {
            step_id: step_id.clone(),
        });
    }
    if graph.steps_mut().remove(step_id).is_none() {
        return Err(ApplyError::StepNotFound {
            step_id: step_id.clone(),
        });
    }

    for (referrer_id, step) in graph.steps_mut().iter_mut() {
        if step.retarget(step_id, None) {
            delta.record_updated(referrer_id.clone());
        }
    }
    delta.record_removed(step_id.clone());
    Ok(())
}

fn apply_restore(
    graph: &mut FormGraph,
    step: &Step,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    let step_id = step.id();
    if !graph.contains(step_id) {
        return Err(ApplyError::StepNotFound {
            step_id: step_id.clone(),
        });
    }

    let mut restored = step.clone();
    // Targets deleted since the copy was taken must not come back as dangling pointers.
    if restored.retain_pointers(|target| graph.contains(target)) {
        tracing::debug!(step = %step_id, "restored step lost pointers to deleted steps");
    }

    graph.steps_mut().insert(step_id.clone(), restored);
    delta.record_updated(step_id.clone());
    Ok(())
}
