use std::time::Instant;

use super::usage_status;
use crate::commands::registry::{all_commands, CommandInvocation};
use crate::commands::CommandResult;
use crate::core::app::App;

const USAGE_MODEL: &str = "Usage: /model [name]";

const KEY_HELP: &[(&str, &str)] = &[
    ("Enter", "send"),
    ("Shift+Enter / Alt+Enter / Ctrl+J", "new line"),
    ("Ctrl+O", "pick a model"),
    ("Ctrl+B", "select a code block (c or Enter copies)"),
    ("PageUp / PageDown / Shift+Up / Shift+Down", "scroll"),
    ("Ctrl+End", "jump to the newest message"),
    ("Ctrl+C", "quit"),
];

pub(crate) fn handle_help(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    let mut help = String::from("Commands:");
    for command in all_commands() {
        help.push_str(&format!("\n  {:<14} {}", command.usage, command.help));
    }
    help.push_str("\nKeys:");
    for (keys, description) in KEY_HELP {
        help.push_str(&format!("\n  {keys}: {description}"));
    }
    app.ui
        .transcript
        .append_system_note(help, false, Instant::now());
    CommandResult::Continue
}

pub(crate) fn handle_model(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    match invocation.args_len() {
        0 => CommandResult::OpenModelPicker,
        1 => match invocation.arg(0) {
            Some(model) => CommandResult::SelectModel(model.to_string()),
            None => usage_status(app, USAGE_MODEL),
        },
        _ => usage_status(app, USAGE_MODEL),
    }
}
