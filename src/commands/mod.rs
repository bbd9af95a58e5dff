//! Slash commands typed into the input area.

mod handlers;
mod registry;

pub use handlers::io::{dump_transcript, transcript_to_html};
pub use registry::{all_commands, CommandInvocation};

use crate::core::app::App;

pub enum CommandResult {
    Continue,
    ProcessAsMessage(String),
    OpenModelPicker,
    SelectModel(String),
}

pub fn process_input(app: &mut App, input: &str) -> CommandResult {
    let trimmed = input.trim();

    let Some(rest) = trimmed.strip_prefix('/') else {
        return CommandResult::ProcessAsMessage(input.to_string());
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let command_name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => return CommandResult::ProcessAsMessage(input.to_string()),
    };
    let args = parts.next().unwrap_or("").trim();

    match registry::find_command(command_name) {
        Some(command) => {
            let invocation = CommandInvocation { args };
            (command.handler)(app, invocation)
        }
        // Unknown commands go to the backend as ordinary text, e.g. a path.
        None => CommandResult::ProcessAsMessage(input.to_string()),
    }
}
