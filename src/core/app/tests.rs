use std::time::{Duration, Instant};

use reqwest::StatusCode;

use super::actions::{apply_action, apply_actions, AppAction, AppActionEnvelope, AppCommand};
use super::{App, UiMode};
use crate::core::chat_service::{BackendError, TurnId, TurnParams};
use crate::core::constants::{BACKEND_ERROR_TEXT, DEFAULT_MODEL};
use crate::core::message::TranscriptRole;
use crate::core::transcript::EntryBody;
use crate::utils::test_utils::{create_test_app, default_ctx, reply, reply_with_note};

fn apply(app: &mut App, action: AppAction) -> Option<AppCommand> {
    apply_action(app, action, default_ctx())
}

fn send(app: &mut App, text: &str) -> Option<TurnParams> {
    app.ui.set_input_text(text);
    match apply(app, AppAction::SubmitInput) {
        Some(AppCommand::SendTurn(params)) => Some(params),
        Some(other) => panic!("unexpected command: {other:?}"),
        None => None,
    }
}

fn roles(app: &App) -> Vec<TranscriptRole> {
    app.ui
        .transcript
        .entries()
        .iter()
        .map(|entry| entry.role())
        .collect()
}

fn network_error() -> BackendError {
    BackendError::Status {
        status: StatusCode::BAD_GATEWAY,
        detail: "upstream unreachable".into(),
    }
}

#[test]
fn send_appends_user_entry_and_clears_input() {
    for text in ["hello", "  padded  ", "multi\nline", "<b>literal</b>"] {
        let mut app = create_test_app();
        let params = send(&mut app, text).expect("turn");

        assert_eq!(roles(&app), vec![TranscriptRole::User, TranscriptRole::Typing]);
        assert_eq!(app.ui.transcript.entries()[0].text(), text.trim());
        assert_eq!(app.ui.input_text(), "");
        assert_eq!(params.request.message, text.trim());
    }
}

#[test]
fn blank_input_is_a_no_op() {
    for text in ["", "   ", "\n\t "] {
        let mut app = create_test_app();
        assert!(send(&mut app, text).is_none());
        assert!(app.ui.transcript.is_empty());
        assert!(!app.session.has_pending_turns());
        assert_eq!(app.ui.input_text(), text);
    }
}

#[test]
fn blank_submit_message_is_a_no_op() {
    let mut app = create_test_app();
    let cmd = apply(
        &mut app,
        AppAction::SubmitMessage {
            message: "  ".into(),
        },
    );
    assert!(cmd.is_none());
    assert!(app.ui.transcript.is_empty());
}

#[test]
fn request_carries_selected_and_previous_model() {
    let mut app = create_test_app();
    let params = send(&mut app, "first").expect("turn");
    assert_eq!(params.request.model, DEFAULT_MODEL);
    assert_eq!(params.request.prev_model, DEFAULT_MODEL);
    assert_eq!(params.base_url, "http://127.0.0.1:8000");

    apply(
        &mut app,
        AppAction::SelectModel {
            model: "llama3.2:1b".into(),
        },
    );
    let params = send(&mut app, "second").expect("turn");
    assert_eq!(params.request.model, "llama3.2:1b");
    assert_eq!(params.request.prev_model, DEFAULT_MODEL);
}

#[test]
fn success_without_note_appends_one_assistant_entry() {
    let mut app = create_test_app();
    let params = send(&mut app, "hi").expect("turn");

    let cmd = apply(
        &mut app,
        AppAction::TurnCompleted {
            turn_id: params.turn_id,
            reply: reply("**hello**"),
        },
    );

    assert!(cmd.is_none());
    assert_eq!(roles(&app), vec![TranscriptRole::User, TranscriptRole::Assistant]);
    assert!(!app.session.has_pending_turns());
}

#[test]
fn success_with_note_appends_note_before_reply_and_chimes() {
    let mut app = create_test_app();
    let params = send(&mut app, "hi").expect("turn");

    let cmd = apply(
        &mut app,
        AppAction::TurnCompleted {
            turn_id: params.turn_id,
            reply: reply_with_note("answer", "Model changed to llama3.2:1b"),
        },
    );

    assert!(matches!(cmd, Some(AppCommand::PlayChime)));
    assert_eq!(
        roles(&app),
        vec![
            TranscriptRole::User,
            TranscriptRole::SystemNote,
            TranscriptRole::Assistant
        ]
    );
    let note = &app.ui.transcript.entries()[1];
    assert!(note.text().contains("Model changed to llama3.2:1b"));
    assert!(matches!(
        note.body,
        EntryBody::SystemNote {
            loader: Some(_),
            ..
        }
    ));
}

#[test]
fn success_records_previous_model() {
    let mut app = create_test_app();
    apply(
        &mut app,
        AppAction::SelectModel {
            model: "qwen2.5:0.5b".into(),
        },
    );
    let params = send(&mut app, "hi").expect("turn");
    apply(
        &mut app,
        AppAction::TurnCompleted {
            turn_id: params.turn_id,
            reply: reply("ok"),
        },
    );
    assert_eq!(app.session.models.previous(), "qwen2.5:0.5b");

    let params = send(&mut app, "again").expect("turn");
    assert_eq!(params.request.prev_model, "qwen2.5:0.5b");
}

#[test]
fn backend_reported_model_wins() {
    let mut app = create_test_app();
    let params = send(&mut app, "hi").expect("turn");
    let mut answer = reply("ok");
    answer.model_used = Some("deepseek-coder:1.3b".into());
    apply(
        &mut app,
        AppAction::TurnCompleted {
            turn_id: params.turn_id,
            reply: answer,
        },
    );
    assert_eq!(app.session.models.previous(), "deepseek-coder:1.3b");
}

#[test]
fn failure_shows_fixed_text_and_keeps_previous_model() {
    let mut app = create_test_app();
    apply(
        &mut app,
        AppAction::SelectModel {
            model: "llama3.2:1b".into(),
        },
    );
    let before = app.session.models.previous().to_string();
    let params = send(&mut app, "hi").expect("turn");

    let cmd = apply(
        &mut app,
        AppAction::TurnFailed {
            turn_id: params.turn_id,
            error: network_error(),
        },
    );

    assert!(cmd.is_none());
    assert_eq!(app.ui.transcript.typing_count(), 0);
    let assistant: Vec<_> = app
        .ui
        .transcript
        .entries()
        .iter()
        .filter(|entry| entry.role() == TranscriptRole::Assistant)
        .collect();
    assert_eq!(assistant.len(), 1);
    assert_eq!(assistant[0].text(), BACKEND_ERROR_TEXT);
    assert!(!app
        .ui
        .transcript
        .entries()
        .iter()
        .any(|entry| entry.text().contains("upstream unreachable")));
    assert_eq!(app.session.models.previous(), before);
}

#[test]
fn reply_code_blocks_get_bound() {
    let mut app = create_test_app();
    let params = send(&mut app, "hi").expect("turn");
    apply(
        &mut app,
        AppAction::TurnCompleted {
            turn_id: params.turn_id,
            reply: reply("```python\nprint(1)\n```"),
        },
    );
    assert_eq!(app.ui.copy_binder.targets().len(), 1);
}

#[test]
fn copy_flow_labels_success_and_failure() {
    let mut app = create_test_app();
    let params = send(&mut app, "hi").expect("turn");
    apply(
        &mut app,
        AppAction::TurnCompleted {
            turn_id: params.turn_id,
            reply: reply("```python\nprint(1)\n```\n\n```\nX\n```"),
        },
    );

    apply(&mut app, AppAction::EnterBlockSelect);
    let Some(AppCommand::CopyToClipboard { block, text }) =
        apply(&mut app, AppAction::CopySelectedBlock)
    else {
        panic!("expected clipboard command");
    };
    assert_eq!(text, "X");

    apply(
        &mut app,
        AppAction::CopyFinished {
            block,
            result: Ok(()),
        },
    );
    let now = Instant::now();
    assert_eq!(app.ui.copy_binder.label(block, now), "copied!");
    assert_eq!(
        app.ui.copy_binder.label(block, now + Duration::from_millis(1100)),
        "copy"
    );

    apply(&mut app, AppAction::BlockSelectPrev);
    let Some(AppCommand::CopyToClipboard { block, text }) =
        apply(&mut app, AppAction::CopySelectedBlock)
    else {
        panic!("expected clipboard command");
    };
    assert_eq!(text, "print(1)");
    apply(
        &mut app,
        AppAction::CopyFinished {
            block,
            result: Err("denied".into()),
        },
    );
    let now = Instant::now();
    assert_eq!(app.ui.copy_binder.label(block, now), "failed");
    assert_eq!(
        app.ui.copy_binder.label(block, now + Duration::from_millis(1300)),
        "copy"
    );
}

#[test]
fn block_select_without_code_sets_status() {
    let mut app = create_test_app();
    apply(&mut app, AppAction::EnterBlockSelect);
    assert_eq!(app.ui.mode, UiMode::Typing);
    assert_eq!(app.ui.status.as_deref(), Some("No code blocks to copy"));
}

#[test]
fn model_switch_appends_note_and_chimes_while_pending() {
    let mut app = create_test_app();
    let params = send(&mut app, "hi").expect("turn");

    let cmd = apply(
        &mut app,
        AppAction::SelectModel {
            model: "llama3.2:1b".into(),
        },
    );

    assert!(matches!(cmd, Some(AppCommand::PlayChime)));
    let last = app.ui.transcript.entries().last().expect("entry");
    assert_eq!(last.role(), TranscriptRole::SystemNote);
    assert!(last.text().contains("llama3.2:1b"));
    assert!(app.session.pending.contains_key(&params.turn_id));
    assert_eq!(app.ui.transcript.typing_count(), 1);
}

#[test]
fn selecting_current_model_is_not_a_change() {
    let mut app = create_test_app();
    let cmd = apply(
        &mut app,
        AppAction::SelectModel {
            model: DEFAULT_MODEL.into(),
        },
    );
    assert!(cmd.is_none());
    assert!(app.ui.transcript.is_empty());
}

#[test]
fn concurrent_turns_track_their_own_placeholders() {
    let mut app = create_test_app();
    let first = send(&mut app, "one").expect("turn");
    let second = send(&mut app, "two").expect("turn");
    assert_ne!(first.turn_id, second.turn_id);
    assert_eq!(app.ui.transcript.typing_count(), 2);

    apply(
        &mut app,
        AppAction::TurnCompleted {
            turn_id: second.turn_id,
            reply: reply("second answer"),
        },
    );
    assert_eq!(app.ui.transcript.typing_count(), 1);
    assert!(app.session.pending.contains_key(&first.turn_id));

    apply(
        &mut app,
        AppAction::TurnFailed {
            turn_id: first.turn_id,
            error: network_error(),
        },
    );
    assert_eq!(app.ui.transcript.typing_count(), 0);
    assert!(!app.session.has_pending_turns());
}

#[test]
fn single_slot_guard_rejects_second_send() {
    let mut app = create_test_app();
    app.session.allow_concurrent_turns = false;
    send(&mut app, "one").expect("turn");

    assert!(send(&mut app, "two").is_none());
    assert_eq!(app.ui.input_text(), "two");
    assert_eq!(
        app.ui.status.as_deref(),
        Some("Still waiting for the previous reply")
    );
    assert_eq!(roles(&app), vec![TranscriptRole::User, TranscriptRole::Typing]);
}

#[test]
fn unknown_turn_outcomes_are_ignored() {
    let mut app = create_test_app();
    let cmd = apply(
        &mut app,
        AppAction::TurnCompleted {
            turn_id: TurnId(99),
            reply: reply_with_note("late", "note"),
        },
    );
    assert!(cmd.is_none());
    assert!(app.ui.transcript.is_empty());
}

#[test]
fn picker_confirm_switches_model() {
    let mut app = create_test_app();
    apply(&mut app, AppAction::OpenModelPicker);
    assert_eq!(app.ui.mode, UiMode::ModelPicker { index: 0 });

    apply(&mut app, AppAction::PickerMoveDown);
    let cmd = apply(&mut app, AppAction::PickerConfirm);
    assert!(matches!(cmd, Some(AppCommand::PlayChime)));
    assert_eq!(app.ui.mode, UiMode::Typing);
    assert_eq!(app.session.models.selected(), app.ui.model_choices[1]);
}

#[test]
fn picker_wraps_around() {
    let mut app = create_test_app();
    apply(&mut app, AppAction::OpenModelPicker);
    apply(&mut app, AppAction::PickerMoveUp);
    let last = app.ui.model_choices.len() - 1;
    assert_eq!(app.ui.mode, UiMode::ModelPicker { index: last });
    apply(&mut app, AppAction::PickerCancel);
    assert_eq!(app.ui.mode, UiMode::Typing);
    assert_eq!(app.session.models.selected(), DEFAULT_MODEL);
}

#[test]
fn slash_model_switches_and_clears_input() {
    let mut app = create_test_app();
    app.ui.set_input_text("/model llama3.2:1b");
    let cmd = apply(&mut app, AppAction::SubmitInput);
    assert!(matches!(cmd, Some(AppCommand::PlayChime)));
    assert_eq!(app.ui.input_text(), "");
    assert_eq!(app.session.models.selected(), "llama3.2:1b");
}

#[test]
fn apply_actions_collects_commands_in_order() {
    let mut app = create_test_app();
    app.ui.set_input_text("hi");
    let commands = apply_actions(
        &mut app,
        [
            AppActionEnvelope {
                action: AppAction::SubmitInput,
                context: default_ctx(),
            },
            AppActionEnvelope {
                action: AppAction::SelectModel {
                    model: "qwen2.5:0.5b".into(),
                },
                context: default_ctx(),
            },
        ],
    );
    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], AppCommand::SendTurn(_)));
    assert!(matches!(commands[1], AppCommand::PlayChime));
}

#[test]
fn quit_sets_exit_flag() {
    let mut app = create_test_app();
    apply(&mut app, AppAction::Quit);
    assert!(app.ui.exit_requested);
}

#[test]
fn new_opens_the_log_file_and_keeps_the_start_model_selectable() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("chat.log");
    let app = App::new(super::AppInitConfig {
        backend_url: "http://localhost:8000/".to_string(),
        model: "custom:7b".to_string(),
        models: vec![DEFAULT_MODEL.to_string()],
        log_file: Some(path.to_string_lossy().into_owned()),
        sound: false,
        allow_concurrent_turns: true,
        theme: crate::ui::theme::Theme::dark_default(),
    })
    .expect("app");

    assert!(app.session.logging.is_active());
    assert_eq!(app.session.backend_url, "http://localhost:8000");
    assert_eq!(app.session.models.selected(), "custom:7b");
    assert_eq!(app.ui.model_choices, vec!["custom:7b", DEFAULT_MODEL]);
}
