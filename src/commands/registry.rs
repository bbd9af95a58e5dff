use super::CommandResult;
use crate::core::app::App;

pub type CommandHandler = fn(&mut App, CommandInvocation<'_>) -> CommandResult;

pub struct Command {
    pub name: &'static str,
    pub usage: &'static str,
    pub help: &'static str,
    pub handler: CommandHandler,
}

#[derive(Clone, Copy)]
pub struct CommandInvocation<'a> {
    pub args: &'a str,
}

impl<'a> CommandInvocation<'a> {
    pub fn args_len(&self) -> usize {
        self.args.split_whitespace().count()
    }

    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.args.split_whitespace().nth(index)
    }
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands()
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}

const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        usage: "/help",
        help: "Show available commands and key bindings.",
        handler: super::handlers::core::handle_help,
    },
    Command {
        name: "model",
        usage: "/model [name]",
        help: "Open the model picker or switch models immediately.",
        handler: super::handlers::core::handle_model,
    },
    Command {
        name: "dump",
        usage: "/dump [file]",
        help: "Export the transcript as HTML.",
        handler: super::handlers::io::handle_dump,
    },
    Command {
        name: "log",
        usage: "/log [file]",
        help: "Start logging to a file, or pause/resume the current log.",
        handler: super::handlers::io::handle_log,
    },
];
