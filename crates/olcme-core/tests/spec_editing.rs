//! Edit sequences over spec documents: the typed projection must follow the
//! JSON buffer through every add/update/delete.

use olcme_core::enums::{TaskType, TemplateKind};
use olcme_core::spec::templates::spec_for;
use olcme_core::spec::{PairedTaskPatch, SpecDocument, TaskEntry, has_errors, validate};
use olcme_core::SpecEditError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

#[derive(Debug, Clone)]
enum Edit {
    Add,
    Delete(usize),
    Prompt(usize, &'static str),
    Left(usize, &'static str),
}

/// Apply one edit through the text buffer, the way the editor does.
fn apply(buffer: &str, edit: &Edit) -> Result<String, SpecEditError> {
    let doc = SpecDocument::parse(buffer).expect("buffer stays valid JSON");
    let next = match edit {
        Edit::Add => doc.with_paired_task_appended()?.0,
        Edit::Delete(index) => doc.without_task(*index)?,
        Edit::Prompt(index, prompt) => doc.with_paired_patch(
            *index,
            &PairedTaskPatch {
                prompt: Some((*prompt).into()),
                ..Default::default()
            },
        )?,
        Edit::Left(index, text) => doc.with_paired_patch(
            *index,
            &PairedTaskPatch {
                left_text: Some((*text).into()),
                ..Default::default()
            },
        )?,
    };
    Ok(next.to_pretty_json())
}

fn assert_projection_matches(buffer: &str) {
    let doc = SpecDocument::parse(buffer).expect("valid JSON");
    let raw = doc.as_value()["blocks"][0]["tasks"]
        .as_array()
        .cloned()
        .unwrap_or_default();
    let tasks = doc.tasks();
    assert_eq!(tasks.len(), raw.len());
    for (entry, value) in tasks.iter().zip(&raw) {
        assert_eq!(entry, &TaskEntry::from_value(value));
        assert_eq!(entry.id(), value["id"].as_str());
    }
}

#[rstest]
#[case::paired(TemplateKind::Paired, 5)]
#[case::maxdiff(TemplateKind::MaxDiff, 1)]
#[case::forced(TemplateKind::Forced, 1)]
fn template_task_counts(#[case] kind: TemplateKind, #[case] expected: usize) {
    assert_eq!(spec_for(kind).to_document().task_count(), expected);
}

#[rstest]
#[case::append_then_edit(vec![Edit::Add, Edit::Prompt(5, "Yeni soru"), Edit::Left(5, "A")])]
#[case::delete_first_then_add(vec![Edit::Delete(0), Edit::Add, Edit::Add])]
#[case::drain(vec![Edit::Delete(4), Edit::Delete(3), Edit::Delete(2), Edit::Delete(1), Edit::Delete(0)])]
#[case::edit_middle(vec![Edit::Prompt(2, "Orta"), Edit::Delete(1), Edit::Left(1, "Sol")])]
fn projection_follows_buffer(#[case] edits: Vec<Edit>) {
    let mut buffer = spec_for(TemplateKind::Paired).to_document().to_pretty_json();
    for edit in &edits {
        buffer = apply(&buffer, edit).unwrap_or_else(|e| panic!("{edit:?} failed: {e}"));
        assert_projection_matches(&buffer);
    }
}

#[test]
fn adding_appends_one_paired_task_at_the_end() {
    let doc = spec_for(TemplateKind::MaxDiff).to_document();
    let before = doc.task_count();
    let (next, selected) = doc.with_paired_task_appended().unwrap();

    assert_eq!(next.task_count(), before + 1);
    assert_eq!(selected, next.task_count() - 1);
    let added = next.task(selected).unwrap();
    assert_eq!(added.type_label(), Some(TaskType::PairedComparison.as_str()));
    assert_eq!(added.id(), Some("pc_2"));
    // earlier tasks untouched
    assert_eq!(next.task_values()[0], doc.task_values()[0]);
}

#[rstest]
#[case(0)]
#[case(2)]
#[case(4)]
fn deleting_reduces_count_by_one(#[case] index: usize) {
    let doc = spec_for(TemplateKind::Paired).to_document();
    let removed_id = doc.task(index).unwrap().id().map(str::to_string);
    let next = doc.without_task(index).unwrap();
    assert_eq!(next.task_count(), doc.task_count() - 1);
    assert!(next.tasks().iter().all(|t| t.id().map(str::to_string) != removed_id));
}

#[test]
fn edits_leave_unknown_fields_alone() {
    let doc = SpecDocument::new(json!({
        "version": "0.1",
        "extra": { "keep": true },
        "blocks": [
            { "id": "main", "title": "T", "tasks": [
                { "id": "x", "type": "likert", "scale": 7 }
            ]},
            { "id": "second", "tasks": [] }
        ]
    }));
    let (next, _) = doc.with_paired_task_appended().unwrap();
    let next = next.without_task(1).unwrap();
    assert_eq!(next, doc);
}

#[rstest]
#[case::not_json("{ \"blocks\": [")]
#[case::truncated("{\"version\": \"0.1\", ")]
#[case::empty("")]
fn malformed_buffer_projects_nothing(#[case] buffer: &str) {
    let parsed = SpecDocument::parse(buffer);
    assert!(parsed.is_none());
    let tasks = parsed.map(|doc| doc.tasks()).unwrap_or_default();
    assert!(tasks.is_empty());
}

#[rstest]
#[case::array_root(json!([]))]
#[case::string_root(json!("spec"))]
#[case::blocks_object(json!({ "blocks": {} }))]
#[case::block_string(json!({ "blocks": ["main"] }))]
fn structural_errors_block_edits_and_save(#[case] value: serde_json::Value) {
    let doc = SpecDocument::new(value.clone());
    assert!(matches!(
        doc.with_paired_task_appended(),
        Err(SpecEditError::Malformed(_))
    ));
    assert!(has_errors(&validate(&value)));
    assert!(doc.tasks().is_empty());
}
