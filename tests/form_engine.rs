// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::Cell;
use std::collections::BTreeSet;
use std::time::{SystemTime, UNIX_EPOCH};

use formtree::demo::demo_form;
use formtree::editor::FormEditor;
use formtree::model::{
    Choice, ChoiceId, ChoiceStep, FormGraph, Step, StepId, StepKind, TextStep,
};
use formtree::ops::StepPatch;
use formtree::query::{
    chains, count_descendants, draggable_ids, linear_chain, render_walk, unreachable_steps,
    RenderEntry,
};
use formtree::store::GraphFile;
use formtree::upload::{upload_image, UploadError, UploadRequest, UploadService, UploadTicket};

fn sid(value: &str) -> StepId {
    StepId::new(value).expect("step id")
}

fn cid(value: &str) -> ChoiceId {
    ChoiceId::new(value).expect("choice id")
}

fn text(id: &str, next: Option<&str>) -> Step {
    Step::Text(TextStep {
        id: sid(id),
        question: id.to_owned(),
        placeholder: None,
        next_step_id: next.map(sid),
        info_popup: None,
    })
}

fn intake() -> FormGraph {
    FormGraph::from_steps(
        Some(sid("Q1")),
        [
            text("Q1", Some("Q2")),
            text("Q2", Some("C1")),
            Step::Choice(ChoiceStep {
                id: sid("C1"),
                question: "Continue?".to_owned(),
                choices: vec![
                    Choice {
                        id: cid("yes"),
                        label: "Yes".to_owned(),
                        next_step_id: Some(sid("Q3")),
                    },
                    Choice {
                        id: cid("no"),
                        label: "No".to_owned(),
                        next_step_id: None,
                    },
                ],
                info_popup: None,
            }),
            text("Q3", None),
        ],
    )
}

struct CountingBucket {
    issued: Cell<usize>,
}

impl UploadService for CountingBucket {
    fn request_upload(&self, request: &UploadRequest) -> Result<UploadTicket, UploadError> {
        let next = self.issued.get() + 1;
        self.issued.set(next);
        Ok(UploadTicket {
            upload_url: format!("https://uploads.test/{next}"),
            object_path: format!("/objects/uploads/{next}/{}", request.name),
        })
    }

    fn transfer(&self, _ticket: &UploadTicket, bytes: &[u8]) -> Result<(), UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::transfer("https://uploads.test", "empty body"));
        }
        Ok(())
    }
}

#[test]
fn intake_fixture_chain_and_descendants() {
    let graph = intake();

    let chain = linear_chain(&graph, &sid("Q1"), &mut BTreeSet::new());
    assert_eq!(chain, vec![sid("Q1"), sid("Q2"), sid("C1")]);
    assert_eq!(draggable_ids(&graph, &chain), vec![sid("Q1"), sid("Q2")]);
    assert_eq!(count_descendants(&graph, &sid("Q1")), 3);
    assert_eq!(chains(&graph), vec![chain, vec![sid("Q3")]]);
}

#[test]
fn demo_walk_reports_loop_and_shared_branch_as_revisits() {
    let graph = demo_form().expect("demo form");

    let walk = render_walk(&graph)
        .into_iter()
        .map(|entry| (entry.step_id().to_string(), entry.depth(), entry.is_revisit()))
        .collect::<Vec<_>>();

    let expected = [
        ("welcome", 0, false),
        ("size", 1, false),
        ("extras", 2, false),
        ("more", 3, false),
        ("extras", 4, true),
        ("name", 4, false),
        ("notes", 5, false),
        ("thanks", 6, false),
        ("extras", 2, true),
        ("goodbye", 2, false),
    ]
    .map(|(id, depth, revisit)| (id.to_owned(), depth, revisit));
    assert_eq!(walk, expected.to_vec());

    let via_large = render_walk(&graph).into_iter().find(|entry| {
        matches!(entry, RenderEntry::Revisit { via: Some(via), .. } if via.as_str() == "large")
    });
    assert!(via_large.is_some());
}

#[test]
fn editing_session_builds_and_reshapes_a_form() {
    let mut editor = FormEditor::new(FormGraph::new());

    let intro = editor.add_root_step(StepKind::Text).expect("root");
    let email = editor.add_step(&intro, StepKind::Text, None).expect("email");
    let phone = editor.add_step(&email, StepKind::Text, None).expect("phone");
    let done = editor.add_step(&phone, StepKind::Conclusion, None).expect("done");
    assert_eq!(editor.rev(), 4);
    assert!(editor.graph().is_valid());

    let chain = linear_chain(editor.graph(), &intro, &mut BTreeSet::new());
    assert_eq!(chain, vec![intro.clone(), email.clone(), phone.clone(), done.clone()]);

    // Drag the phone question to the top of the run.
    editor.reorder_chain(&chain, 2, 0).expect("reorder");
    assert_eq!(editor.graph().root_step_id(), Some(&phone));
    assert_eq!(
        linear_chain(editor.graph(), &phone, &mut BTreeSet::new()),
        vec![phone.clone(), intro.clone(), email.clone(), done.clone()]
    );

    // Edit then revert the intro question.
    editor.select(&intro).expect("select");
    editor
        .update_step(&intro, StepPatch::question("Tell us about yourself"))
        .expect("update");
    assert!(editor.revert(&intro).expect("revert"));
    assert_eq!(editor.graph().step(&intro).map(Step::question), Some("New question"));

    // Deleting the selected step moves selection to the root and never leaves dangling pointers.
    editor.select(&email).expect("select");
    editor.delete_step(&email).expect("delete");
    assert_eq!(editor.selected(), Some(&phone));
    assert!(editor.graph().is_valid());
    assert_eq!(unreachable_steps(editor.graph()), vec![done]);
}

#[test]
fn uploaded_image_lands_in_the_info_popup() {
    let bucket = CountingBucket { issued: Cell::new(0) };
    let mut editor = FormEditor::new(demo_form().expect("demo form"));

    let path = upload_image(&bucket, "menu.jpg", "image/jpeg", b"\xff\xd8\xff").expect("upload");
    editor.attach_image(&sid("size"), path.clone()).expect("attach");

    let popup = editor
        .graph()
        .step(&sid("size"))
        .and_then(Step::info_popup)
        .expect("popup");
    assert_eq!(popup.images.last(), Some(&path));
    assert_eq!(popup.images.len(), 2);

    let failed = upload_image(&bucket, "empty.png", "image/png", &[]);
    assert!(failed.is_err());
    assert_eq!(editor.rev(), 1);
}

#[test]
fn graph_file_round_trips_the_demo_form() {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let dir = std::env::temp_dir().join(format!("formtree-it-{}-{nanos}", std::process::id()));
    let file = GraphFile::new(dir.join("demo.json"));

    let graph = demo_form().expect("demo form");
    file.save(&graph).expect("save");
    let loaded = file.load().expect("load");
    let _ = std::fs::remove_dir_all(&dir);

    assert_eq!(loaded, graph);
}
