//! Clipboard writes through the platform's command-line clipboard tools.

use std::io::Write;
use std::process::{Command, Stdio};

struct ClipboardTool {
    program: &'static str,
    args: &'static [&'static str],
}

#[cfg(target_os = "macos")]
const CLIPBOARD_TOOLS: &[ClipboardTool] = &[ClipboardTool {
    program: "pbcopy",
    args: &[],
}];

#[cfg(target_os = "windows")]
const CLIPBOARD_TOOLS: &[ClipboardTool] = &[ClipboardTool {
    program: "cmd",
    args: &["/C", "clip"],
}];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CLIPBOARD_TOOLS: &[ClipboardTool] = &[
    ClipboardTool {
        program: "wl-copy",
        args: &[],
    },
    ClipboardTool {
        program: "xclip",
        args: &["-selection", "clipboard"],
    },
    ClipboardTool {
        program: "xsel",
        args: &["--clipboard", "--input"],
    },
];

/// Copy `text` using the first clipboard tool that succeeds. Blocks until the
/// tool exits, so run it off the UI thread.
pub fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let mut failures = Vec::new();
    for tool in CLIPBOARD_TOOLS {
        match run_with_stdin(tool, text) {
            Ok(()) => return Ok(()),
            Err(err) => failures.push(err),
        }
    }
    Err(format!("No clipboard command worked ({})", failures.join("; ")))
}

/// [`copy_to_clipboard`] on tokio's blocking pool.
pub async fn copy_to_clipboard_async(text: String) -> Result<(), String> {
    tokio::task::spawn_blocking(move || copy_to_clipboard(&text))
        .await
        .map_err(|err| format!("Clipboard task failed: {err}"))?
}

fn run_with_stdin(tool: &ClipboardTool, input: &str) -> Result<(), String> {
    let mut child = Command::new(tool.program)
        .args(tool.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|_| format!("`{}` not available", tool.program))?;

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(err) = stdin.write_all(input.as_bytes()) {
            drop(stdin);
            // Reap the child so a failed write does not leave a zombie.
            let _ = child.kill();
            let _ = child.wait();
            return Err(format!("`{}` rejected input: {err}", tool.program));
        }
    }

    match child.wait() {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(format!("`{}` exited with {status}", tool.program)),
        Err(err) => Err(format!("`{}` failed: {err}", tool.program)),
    }
}
