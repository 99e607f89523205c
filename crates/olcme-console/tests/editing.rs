//! Task-list edits through the editor keep the buffer and projection in step.

use std::sync::Arc;

use olcme_auth::AuthContext;
use olcme_client::InMemoryApi;
use olcme_console::InstrumentEditor;
use olcme_core::spec::{PairedTaskPatch, SpecDocument, templates};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy)]
enum Edit {
    Add,
    Delete(usize),
    Prompt(usize),
}

async fn editor_with(spec: Value) -> InstrumentEditor {
    let api = Arc::new(InMemoryApi::with_user("a@b.c", "pw", "tok"));
    let study = api.insert_study("s");
    let instrument = api.insert_instrument(study.id, "i", spec);
    let mut editor = InstrumentEditor::new(api, AuthContext::with_token("tok"), instrument.id);
    editor.load().await.unwrap();
    editor
}

fn assert_consistent(editor: &InstrumentEditor) {
    let doc = SpecDocument::parse(editor.buffer()).expect("buffer stays valid JSON");
    assert_eq!(editor.tasks(), doc.tasks());
    assert_eq!(editor.tasks().len(), doc.task_values().len());
    if !editor.tasks().is_empty() {
        assert!(editor.selected() < editor.tasks().len());
    }
}

#[rstest]
#[case::template(templates::paired_comparison_five().to_value(), vec![Edit::Add, Edit::Delete(0), Edit::Prompt(2), Edit::Delete(4)])]
#[case::empty_object(json!({}), vec![Edit::Add, Edit::Add, Edit::Prompt(1), Edit::Delete(1)])]
#[case::blocks_null(json!({ "version": "0.1", "blocks": null }), vec![Edit::Add, Edit::Delete(0), Edit::Add])]
#[case::mixed_types(templates::maxdiff_demo().to_value(), vec![Edit::Add, Edit::Prompt(1), Edit::Delete(0)])]
#[tokio::test]
async fn edit_sequences_keep_buffer_and_tasks_in_step(#[case] spec: Value, #[case] edits: Vec<Edit>) {
    let mut editor = editor_with(spec).await;
    for edit in edits {
        let before = editor.tasks().len();
        match edit {
            Edit::Add => {
                let index = editor.add_paired_task().unwrap();
                assert_eq!(editor.tasks().len(), before + 1);
                assert_eq!(index, before);
                assert_eq!(editor.selected(), before);
                let added = editor.tasks()[index].as_paired().cloned().unwrap();
                assert_eq!(added.id, format!("pc_{}", before + 1));
            }
            Edit::Delete(index) => {
                editor.delete_task(index).unwrap();
                assert_eq!(editor.tasks().len(), before - 1);
                assert_eq!(editor.selected(), index.saturating_sub(1));
            }
            Edit::Prompt(index) => {
                editor.select(index).unwrap();
                editor
                    .update_selected_paired(&PairedTaskPatch {
                        prompt: Some(format!("Soru {index}")),
                        ..PairedTaskPatch::default()
                    })
                    .unwrap();
                assert_eq!(
                    editor.selected_task().unwrap().prompt(),
                    Some(format!("Soru {index}").as_str())
                );
            }
        }
        assert_consistent(&editor);
    }
}

#[tokio::test]
async fn raw_merge_keeps_unmodelled_fields() {
    let mut editor = editor_with(json!({
        "version": "0.1",
        "meta": { "owner": "lab" },
        "blocks": [{ "id": "main", "title": "Main", "tasks": [
            { "id": "x1", "type": "likert", "scale": 5 }
        ]}]
    }))
    .await;

    let partial = json!({ "prompt": "Katılıyor musun?" });
    editor.update_selected(partial.as_object().unwrap()).unwrap();

    let doc = editor.document().unwrap();
    assert_eq!(doc.as_value()["meta"]["owner"], "lab");
    assert_eq!(
        doc.as_value()["blocks"][0]["tasks"][0],
        json!({ "id": "x1", "type": "likert", "scale": 5, "prompt": "Katılıyor musun?" })
    );
}

#[tokio::test]
async fn deleting_past_the_end_leaves_buffer_alone() {
    let mut editor = editor_with(templates::paired_comparison_five().to_value()).await;
    let before = editor.buffer().to_string();
    assert!(editor.delete_task(9).is_err());
    assert_eq!(editor.buffer(), before);
}
