// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::FormEditor;
use crate::model::fixtures::{branching_intake, cid, hub_with_run, sid};
use crate::model::{FormGraph, Step, StepKind};
use crate::ops::{ApplyError, ErrorClass, FormOp, StepPatch};

#[fixture]
fn intake() -> FormEditor {
    FormEditor::new(branching_intake())
}

#[fixture]
fn hub() -> FormEditor {
    FormEditor::new(hub_with_run())
}

fn question(editor: &FormEditor, step_id: &str) -> String {
    editor
        .graph()
        .step(&sid(step_id))
        .map(|step| step.question().to_owned())
        .expect("step")
}

#[rstest]
fn select_missing_step_is_not_found(mut intake: FormEditor) {
    let err = intake.select(&sid("ghost")).unwrap_err();

    assert_eq!(err.class(), ErrorClass::NotFound);
    assert!(intake.selected().is_none());
    assert!(intake.snapshots().is_empty());
}

#[rstest]
fn two_updates_then_revert_restores_first_selection_values(mut intake: FormEditor) {
    intake.select(&sid("q2")).expect("select");
    intake
        .update_step(&sid("q2"), StepPatch::question("first edit"))
        .expect("first");
    intake
        .update_step(
            &sid("q2"),
            StepPatch {
                question: Some("second edit".to_owned()),
                placeholder: Some(Some("hint".to_owned())),
                ..StepPatch::default()
            },
        )
        .expect("second");
    assert_eq!(intake.rev(), 2);

    assert!(intake.revert(&sid("q2")).expect("revert"));

    assert_eq!(intake.graph(), &branching_intake());
    assert!(intake.selected().is_none());
    assert!(!intake.snapshots().contains(&sid("q2")));
    assert_eq!(intake.rev(), 3);
}

#[rstest]
fn reselecting_does_not_refresh_the_baseline(mut intake: FormEditor) {
    intake.select(&sid("q1")).expect("select");
    intake
        .update_step(&sid("q1"), StepPatch::question("edited"))
        .expect("update");
    intake.commit();
    assert!(intake.selected().is_none());

    intake.select(&sid("q1")).expect("reselect");
    intake
        .update_step(&sid("q1"), StepPatch::question("edited again"))
        .expect("update");
    intake.revert(&sid("q1")).expect("revert");

    assert_eq!(question(&intake, "q1"), "Q1");
}

#[rstest]
fn revert_clears_baseline_so_next_selection_captures_current_values(mut intake: FormEditor) {
    intake.select(&sid("q1")).expect("select");
    intake
        .update_step(&sid("q1"), StepPatch::question("discarded"))
        .expect("update");
    intake.revert(&sid("q1")).expect("revert");
    assert_eq!(question(&intake, "q1"), "Q1");

    intake
        .update_step(&sid("q1"), StepPatch::question("saved elsewhere"))
        .expect("unselected update");
    intake.select(&sid("q1")).expect("select again");
    intake
        .update_step(&sid("q1"), StepPatch::question("second round"))
        .expect("update");
    intake.revert(&sid("q1")).expect("revert again");

    assert_eq!(question(&intake, "q1"), "saved elsewhere");
}

#[rstest]
fn revert_of_another_step_still_clears_selection(mut intake: FormEditor) {
    intake.select(&sid("q2")).expect("select q2");
    intake
        .update_step(&sid("q2"), StepPatch::question("edited"))
        .expect("update");
    intake.select(&sid("q1")).expect("select q1");

    assert!(intake.revert(&sid("q2")).expect("revert"));

    assert_eq!(question(&intake, "q2"), "Q2");
    assert!(intake.selected().is_none());
    assert!(intake.snapshots().contains(&sid("q1")));
}

#[rstest]
fn revert_without_baseline_is_a_noop(mut intake: FormEditor) {
    intake
        .update_step(&sid("q3"), StepPatch::question("unselected edit"))
        .expect("update");
    let rev = intake.rev();

    assert!(!intake.revert(&sid("q3")).expect("revert"));
    assert_eq!(question(&intake, "q3"), "unselected edit");
    assert_eq!(intake.rev(), rev);
}

#[rstest]
fn revert_of_deleted_step_drops_baseline_and_keeps_graph(mut intake: FormEditor) {
    intake.select(&sid("q3")).expect("select");
    intake.delete_step(&sid("q3")).expect("delete");
    let after_delete = intake.graph().clone();

    assert!(!intake.revert(&sid("q3")).expect("revert"));

    assert_eq!(intake.graph(), &after_delete);
    assert!(!intake.graph().contains(&sid("q3")));
    assert!(!intake.snapshots().contains(&sid("q3")));
}

#[rstest]
fn revert_does_not_restore_pointers_to_deleted_steps(mut hub: FormEditor) {
    hub.select(&sid("b")).expect("select");
    hub.update_step(&sid("b"), StepPatch::question("renamed"))
        .expect("update");
    hub.delete_step(&sid("c")).expect("delete");

    assert!(hub.revert(&sid("b")).expect("revert"));

    let b = hub.graph().step(&sid("b")).expect("b");
    assert_eq!(b.question(), "B");
    assert_eq!(b.next_step_id(), None);
    assert!(hub.graph().is_valid());
}

#[rstest]
fn deleting_selected_step_moves_selection_to_root(mut hub: FormEditor) {
    hub.select(&sid("c")).expect("select");

    let delta = hub.delete_step(&sid("c")).expect("delete");

    assert_eq!(delta.removed, vec![sid("c")]);
    assert_eq!(hub.selected(), Some(&sid("hub")));
    assert!(hub.snapshots().contains(&sid("hub")));
}

#[rstest]
fn stale_revision_is_a_conflict(mut intake: FormEditor) {
    intake
        .update_step(&sid("q1"), StepPatch::question("bump"))
        .expect("update");

    let err = intake
        .apply(0, &[FormOp::DeleteStep { step_id: sid("q3") }])
        .unwrap_err();

    assert_eq!(
        err,
        ApplyError::Conflict {
            base_rev: 0,
            current_rev: 1
        }
    );
    assert_eq!(err.class(), ErrorClass::Conflict);
    assert!(intake.graph().contains(&sid("q3")));
}

#[rstest]
fn rejected_edit_keeps_revision_and_graph(mut intake: FormEditor) {
    let err = intake.delete_step(&sid("q1")).unwrap_err();

    assert_eq!(err.class(), ErrorClass::InvariantViolation);
    assert_eq!(intake.rev(), 0);
    assert_eq!(intake.graph(), &branching_intake());
}

#[rstest]
fn empty_batch_keeps_revision(mut intake: FormEditor) {
    let delta = intake.apply(0, &[]).expect("apply");

    assert!(delta.is_empty());
    assert_eq!(intake.rev(), 0);
}

#[rstest]
fn add_step_returns_the_wired_id(mut intake: FormEditor) {
    let step_id = intake
        .add_step(&sid("c1"), StepKind::Conclusion, Some(&cid("no")))
        .expect("add");

    let Some(Step::Choice(c1)) = intake.graph().step(&sid("c1")) else {
        panic!("expected choice");
    };
    assert_eq!(
        c1.choice(&cid("no")).and_then(|c| c.next_step_id.as_ref()),
        Some(&step_id)
    );
    assert_eq!(intake.graph().step(&step_id).map(Step::kind), Some(StepKind::Conclusion));
}

#[rstest]
fn reorder_through_editor_bumps_revision_once(mut hub: FormEditor) {
    let chain = crate::query::linear_chain(hub.graph(), &sid("a"), &mut Default::default());

    hub.reorder_chain(&chain, 3, 0).expect("reorder");

    assert_eq!(hub.rev(), 1);
    assert_eq!(
        hub.graph()
            .step(&sid("hub"))
            .map(|step| step.outgoing().into_iter().cloned().collect::<Vec<_>>()),
        Some(vec![sid("d"), sid("end")])
    );
}

#[rstest]
fn attach_image_appends_object_path(mut intake: FormEditor) {
    intake.attach_image(&sid("q3"), "forms/img-1.png").expect("attach");

    let popup = intake
        .graph()
        .step(&sid("q3"))
        .and_then(Step::info_popup)
        .expect("popup");
    assert_eq!(popup.images, vec!["forms/img-1.png".to_owned()]);
}

#[test]
fn empty_editor_seeds_root() {
    let mut editor = FormEditor::new(FormGraph::new());

    let root = editor.add_root_step(StepKind::Text).expect("root");

    assert_eq!(editor.graph().root_step_id(), Some(&root));
    assert_eq!(editor.rev(), 1);
    assert_eq!(editor.into_graph().len(), 1);
}
