//! Event polling, dispatching, and UI rendering loop.
//!
//! Terminal events, backend outcomes, queued actions and a redraw tick are
//! multiplexed with `tokio::select!`. Every wake-up turns into a batch of
//! [`AppAction`]s, the batch is applied to the app, and the resulting
//! [`AppCommand`]s are executed before the next frame is drawn.

use std::{error::Error, time::Instant};

use futures_util::StreamExt;
use ratatui::crossterm::event::{Event, EventStream, KeyEventKind};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::core::app::{
    apply_actions, App, AppAction, AppActionContext, AppActionDispatcher, AppActionEnvelope,
    AppCommand, UiMode,
};
use crate::core::chat_service::{ChatService, TurnId, TurnOutcome};
use crate::core::constants::TICK_INTERVAL;
use crate::ui::renderer::{ui, RenderMetrics};
use crate::utils::clipboard::copy_to_clipboard_async;

use super::keybindings::map_key;
use super::lifecycle::{install_panic_hook, restore_terminal, setup_terminal, ChatTerminal};

pub async fn run_chat(mut app: App) -> Result<(), Box<dyn Error>> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop(terminal: &mut ChatTerminal, app: &mut App) -> Result<(), Box<dyn Error>> {
    let (chat_service, mut outcome_rx) = ChatService::new();
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppActionEnvelope>();
    let dispatcher = AppActionDispatcher::new(action_tx);

    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(TICK_INTERVAL);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut metrics = draw_frame(terminal, app)?;

    loop {
        let size = terminal.size()?;
        let ctx = AppActionContext {
            term_width: size.width,
            term_height: size.height,
        };
        let mut batch: Vec<AppActionEnvelope> = Vec::new();

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => {
                    if let Some(action) = event_action(app.ui.mode, event, metrics) {
                        batch.push(AppActionEnvelope { action, context: ctx });
                    }
                }
                Some(Err(err)) => {
                    tracing::error!("terminal event stream failed: {err}");
                    return Err(err.into());
                }
                None => break,
            },
            Some(envelope) = action_rx.recv() => batch.push(envelope),
            Some((outcome, turn_id)) = outcome_rx.recv() => {
                batch.push(AppActionEnvelope {
                    action: outcome_action(outcome, turn_id),
                    context: ctx,
                });
            }
            _ = tick.tick() => {
                let now = Instant::now();
                app.ui.copy_binder.expire(now);
                app.ui.expire_status(now);
            }
        }

        while let Ok(envelope) = action_rx.try_recv() {
            batch.push(envelope);
        }
        while let Ok((outcome, turn_id)) = outcome_rx.try_recv() {
            batch.push(AppActionEnvelope {
                action: outcome_action(outcome, turn_id),
                context: ctx,
            });
        }

        for command in apply_actions(app, batch) {
            execute_command(app, command, &chat_service, &dispatcher, ctx);
        }

        if app.ui.exit_requested {
            break;
        }

        metrics = draw_frame(terminal, app)?;
        app.ui.transcript.clamp_scroll(metrics.max_scroll);
    }

    Ok(())
}

fn draw_frame(terminal: &mut ChatTerminal, app: &App) -> Result<RenderMetrics, Box<dyn Error>> {
    let mut metrics = RenderMetrics::default();
    terminal.draw(|f| metrics = ui(f, app, Instant::now()))?;
    Ok(metrics)
}

fn event_action(mode: UiMode, event: Event, metrics: RenderMetrics) -> Option<AppAction> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            map_key(mode, key, metrics.viewport_height.saturating_sub(1))
        }
        Event::Paste(text) if mode == UiMode::Typing => {
            let text = sanitize_pasted_text(&text);
            (!text.is_empty()).then_some(AppAction::InsertText { text })
        }
        // Resize and focus changes only need the redraw every wake-up gets.
        _ => None,
    }
}

fn outcome_action(outcome: TurnOutcome, turn_id: TurnId) -> AppAction {
    match outcome {
        Ok(reply) => AppAction::TurnCompleted { turn_id, reply },
        Err(error) => AppAction::TurnFailed { turn_id, error },
    }
}

fn execute_command(
    app: &App,
    command: AppCommand,
    chat_service: &ChatService,
    dispatcher: &AppActionDispatcher,
    ctx: AppActionContext,
) {
    match command {
        AppCommand::SendTurn(params) => chat_service.spawn_turn(params),
        AppCommand::PlayChime => app.session.chime.play(),
        AppCommand::CopyToClipboard { block, text } => {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                let result = copy_to_clipboard_async(text).await;
                dispatcher.dispatch_many([AppAction::CopyFinished { block, result }], ctx);
            });
        }
    }
}

pub(crate) fn sanitize_pasted_text(text: &str) -> String {
    let without_crlf = text.replace("\r\n", "\n");
    let without_cr = without_crlf.replace('\r', "\n");
    let expanded_tabs = without_cr.replace('\t', "    ");
    expanded_tabs
        .chars()
        .filter(|&c| c == '\n' || !c.is_control())
        .collect()
}
