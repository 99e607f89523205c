//! End-to-end operator and participant flows against the in-memory backend.

use std::sync::Arc;

use olcme_auth::{AuthContext, CredentialStore, MemoryStore};
use olcme_client::InMemoryApi;
use olcme_console::{
    AdminDashboard, ConsoleError, InstrumentEditor, MemoryClipboard, ParticipantRunner,
    RunnerView, SubmitOutcome, messages,
};
use olcme_core::entities::{ChoicePayload, NewResponse};
use olcme_core::enums::{Choice, TemplateKind};
use olcme_client::SurveyApi;
use olcme_core::spec::templates;
use pretty_assertions::assert_eq;
use serde_json::json;

const APP_BASE: &str = "https://anket.olcme.tr";

fn backend() -> Arc<InMemoryApi> {
    Arc::new(InMemoryApi::with_user("murat@olcme.tr", "secret", "tok-1"))
}

#[tokio::test]
async fn login_stores_token_and_refreshes() {
    let api = backend();
    api.insert_study("Pilot");
    let store = MemoryStore::default();
    let mut dash = AdminDashboard::new(api.clone(), APP_BASE);
    dash.email = "murat@olcme.tr".into();
    dash.password = "secret".into();

    dash.login(&store).await.unwrap();

    assert_eq!(store.load().as_deref(), Some("tok-1"));
    assert_eq!(dash.auth().token(), Some("tok-1"));
    assert_eq!(dash.studies().len(), 1);
    assert_eq!(dash.status().get(), Some(messages::LOGIN_OK));
    let listed = api.calls_to("list_studies");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].token.as_deref(), Some("tok-1"));
    assert!(dash.password.is_empty());
}

#[tokio::test]
async fn paired_template_posts_five_tasks() {
    let api = backend();
    // ids are shared across entities; burn six so the study gets id 7
    for _ in 0..6 {
        api.insert_session(0);
    }
    let study = api.insert_study("Pilot study");
    assert_eq!(study.id, 7);

    let mut dash =
        AdminDashboard::new(api.clone(), APP_BASE).with_auth(AuthContext::with_token("tok-1"));
    dash.select_study(Some(7));
    dash.new_instrument_name = "Pilot".into();
    dash.template = TemplateKind::Paired;

    let created = dash.create_instrument().await.unwrap();

    let calls = api.calls_to("create_instrument");
    assert_eq!(calls.len(), 1);
    let body = calls[0].body.as_ref().unwrap();
    assert_eq!(body["study_id"], 7);
    assert_eq!(body["name"], "Pilot");
    let tasks = body["spec"]["blocks"][0]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 5);
    assert!(tasks.iter().all(|t| t["type"] == "paired_comparison"));
    assert_eq!(
        dash.status().get(),
        Some(messages::instrument_created(created.id).as_str())
    );
    assert_eq!(dash.visible_instruments().len(), 1);
}

#[tokio::test]
async fn session_link_uses_app_base() {
    let api = backend();
    let study = api.insert_study("s");
    let instrument = api.insert_instrument(study.id, "i", json!({}));
    let mut dash = AdminDashboard::new(api.clone(), APP_BASE);

    let session = dash.create_session(instrument.id).await.unwrap();
    let expected = format!("{APP_BASE}/p/{}", session.session_id);
    assert_eq!(dash.participant_url().as_deref(), Some(expected.as_str()));
    assert_eq!(api.calls_to("create_session")[0].token, None);

    let mut clipboard = MemoryClipboard::default();
    assert_eq!(dash.copy_link(&mut clipboard).unwrap(), Some(expected.clone()));
    assert_eq!(clipboard.contents, Some(expected));
    assert_eq!(dash.status().get(), Some(messages::LINK_COPIED));
}

#[tokio::test]
async fn last_choice_completes_without_advancing() {
    let api = backend();
    let mut spec = templates::paired_comparison_five().to_value();
    spec["blocks"][0]["tasks"]
        .as_array_mut()
        .unwrap()
        .truncate(3);
    let study = api.insert_study("s");
    let instrument = api.insert_instrument(study.id, "i", spec);
    let session = api.insert_session(instrument.id);

    let mut runner = ParticipantRunner::new(api.clone(), session.session_id);
    runner.load().await.unwrap();
    runner.submit(Choice::Right).await.unwrap();
    runner.submit(Choice::Right).await.unwrap();
    assert_eq!(runner.index(), 2);

    let outcome = runner.submit(Choice::Left).await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Completed);
    assert_eq!(runner.index(), 2);
    assert_eq!(runner.view(), RunnerView::Completed);
    assert_eq!(runner.status().message(), Some(messages::COMPLETED));
    let last = api.responses().pop().unwrap();
    assert_eq!(last.task_id, "pc_3");
    assert_eq!(last.payload, json!({ "choice": "left", "rt_ms": null }));
}

#[tokio::test]
async fn save_without_token_makes_no_call() {
    let api = backend();
    let study = api.insert_study("s");
    let instrument = api.insert_instrument(study.id, "i", json!({}));
    let mut editor = InstrumentEditor::new(api.clone(), AuthContext::anonymous(), instrument.id);
    editor.set_buffer(templates::maxdiff_demo().to_document().to_pretty_json());

    let error = editor.save().await.unwrap_err();

    assert!(matches!(error, ConsoleError::MissingToken));
    assert_eq!(editor.status().get(), Some(messages::NO_TOKEN_SAVE));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn invalid_json_is_reported_before_any_call() {
    let api = backend();
    let mut editor = InstrumentEditor::new(api.clone(), AuthContext::with_token("tok-1"), 1);
    editor.set_buffer("{");

    let error = editor.save().await.unwrap_err();

    assert!(matches!(error, ConsoleError::InvalidJson));
    assert_eq!(editor.status().get(), Some(messages::INVALID_JSON));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn results_require_token_then_render_raw_payload() {
    let api = backend();
    let study = api.insert_study("s");
    let instrument = api.insert_instrument(study.id, "i", templates::paired_comparison_five().to_value());
    let session = api.insert_session(instrument.id);
    api.submit_response(&NewResponse {
        session_id: session.session_id,
        task_id: "pc_1".into(),
        payload: ChoicePayload {
            choice: Choice::Left,
            rt_ms: None,
        },
    })
    .await
    .unwrap();
    let calls_before = api.calls().len();

    let mut anonymous = InstrumentEditor::new(api.clone(), AuthContext::anonymous(), instrument.id);
    assert!(matches!(
        anonymous.load_results().await,
        Err(ConsoleError::MissingToken)
    ));
    assert_eq!(anonymous.status().get(), Some(messages::NO_TOKEN));
    assert_eq!(api.calls().len(), calls_before);

    let mut editor = InstrumentEditor::new(api.clone(), AuthContext::with_token("tok-1"), instrument.id);
    let table = editor.load_results().await.unwrap();
    assert_eq!(
        table.cells(),
        vec![[
            table.lines()[0].id.to_string(),
            session.session_id.to_string(),
            "pc_1".to_string(),
            r#"{"choice":"left","rt_ms":null}"#.to_string(),
        ]]
    );
    assert_eq!(editor.status().get(), None);
}

#[tokio::test]
async fn restored_token_drives_admin_calls() {
    let api = backend();
    let store = MemoryStore::with_token("tok-1");
    let mut dash = AdminDashboard::new(api.clone(), APP_BASE);
    dash.restore(&store);
    dash.new_study_title = "  Ölçme Lab Pilot 1 ".into();

    let study = dash.create_study().await.unwrap();

    assert_eq!(study.title, "Ölçme Lab Pilot 1");
    assert_eq!(dash.selected_study(), Some(study.id));
    assert_eq!(dash.status().get(), Some(messages::study_created(study.id).as_str()));
}

#[tokio::test]
async fn runner_accepts_participant_links() {
    let api = backend();
    let study = api.insert_study("s");
    let instrument = api.insert_instrument(study.id, "i", templates::paired_comparison_five().to_value());
    let session = api.insert_session(instrument.id);
    let link = format!("{APP_BASE}/p/{}", session.session_id);

    let mut runner = ParticipantRunner::from_reference(api, &link).unwrap();
    runner.load().await.unwrap();
    let RunnerView::Task(task) = runner.view() else {
        panic!("expected a task view");
    };
    assert_eq!(task.total, 5);
    assert_eq!(task.prompt, "Hangisi sana daha çok uyuyor?");
    assert_eq!(task.left, "Belirsizlik olsa da harekete geçerim.");
}
