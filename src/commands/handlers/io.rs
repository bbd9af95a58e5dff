use std::fs::OpenOptions;
use std::io::{BufWriter, Write};

use chrono::Local;

use super::usage_status;
use crate::commands::registry::CommandInvocation;
use crate::commands::CommandResult;
use crate::core::app::App;
use crate::core::transcript::{EntryBody, Transcript};
use crate::ui::markdown::{escape_text, render_html};

const USAGE_LOG: &str = "Usage: /log [filename]";
const USAGE_DUMP: &str = "Usage: /dump [filename]";

const DUMP_STYLE: &str = "body{font-family:sans-serif;max-width:52rem;margin:2rem auto}\
.message{margin:0.75rem 0;padding:0.5rem 0.75rem;border-radius:6px}\
.user{background:#e8f0fe}.assistant{background:#f4f4f4}\
.system-note{font-style:italic;color:#666}\
.code-block{position:relative}.copy-btn{position:absolute;top:4px;right:4px}\
pre{background:#222;color:#eee;padding:0.75rem;overflow-x:auto}";

pub(crate) fn handle_log(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    match invocation.args_len() {
        0 => {
            match app.session.logging.toggle_logging() {
                Ok(message) => app.ui.set_status(message),
                Err(e) => app.ui.set_status(format!("Log error: {e}")),
            }
            CommandResult::Continue
        }
        1 => {
            let Some(filename) = invocation.arg(0) else {
                return usage_status(app, USAGE_LOG);
            };
            match app.session.logging.set_log_file(filename.to_string()) {
                Ok(message) => app.ui.set_status(message),
                Err(e) => app.ui.set_status(format!("Logfile error: {e}")),
            }
            CommandResult::Continue
        }
        _ => usage_status(app, USAGE_LOG),
    }
}

pub(crate) fn handle_dump(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    let filename = match invocation.args_len() {
        0 => format!("debugmate-transcript-{}.html", Local::now().format("%Y-%m-%d")),
        1 => match invocation.arg(0) {
            Some(name) => name.to_string(),
            None => return usage_status(app, USAGE_DUMP),
        },
        _ => return usage_status(app, USAGE_DUMP),
    };

    match dump_transcript(&app.ui.transcript, &filename) {
        Ok(()) => app.ui.set_status(format!("Dumped: {filename}")),
        Err(e) => app.ui.set_status(format!("Dump error: {e}")),
    }
    CommandResult::Continue
}

/// Standalone HTML page for the transcript. Reply code blocks keep their
/// copy buttons; user text and system notes are escaped literally.
pub fn transcript_to_html(transcript: &Transcript) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>debugmate transcript</title>\n");
    html.push_str(&format!("<style>{DUMP_STYLE}</style>\n</head>\n<body>\n"));

    for entry in transcript.entries() {
        match &entry.body {
            EntryBody::User { text } => {
                html.push_str(&format!(
                    "<div class=\"message user\">{}</div>\n",
                    escape_text(text).replace('\n', "<br>\n")
                ));
            }
            EntryBody::SystemNote { text, .. } => {
                html.push_str(&format!(
                    "<div class=\"message system-note\"><em>{}</em></div>\n",
                    escape_text(text).replace('\n', "<br>\n")
                ));
            }
            EntryBody::Assistant { source, .. } => {
                html.push_str("<div class=\"message assistant\">\n");
                html.push_str(&render_html(source));
                html.push_str("</div>\n");
            }
            EntryBody::Typing => {}
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Write the HTML dump. Existing files are never overwritten.
pub fn dump_transcript(
    transcript: &Transcript,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(filename)
        .map_err(|err| -> Box<dyn std::error::Error> {
            if err.kind() == std::io::ErrorKind::AlreadyExists {
                format!("{filename} already exists").into()
            } else {
                Box::new(err)
            }
        })?;
    let mut writer = BufWriter::new(file);
    writer.write_all(transcript_to_html(transcript).as_bytes())?;
    writer.flush()?;
    Ok(())
}
