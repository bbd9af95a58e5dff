//! Plain-text transcript log toggled by `--log` and `/log`.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::message::TranscriptRole;

pub struct LoggingState {
    file_path: Option<String>,
    is_active: bool,
}

impl LoggingState {
    /// A log file given at startup is active right away.
    pub fn new(log_file: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut logging = LoggingState {
            file_path: None,
            is_active: false,
        };
        if let Some(path) = log_file {
            logging.set_log_file(path)?;
        }
        Ok(logging)
    }

    pub fn disabled() -> Self {
        LoggingState {
            file_path: None,
            is_active: false,
        }
    }

    pub fn set_log_file(&mut self, path: String) -> Result<String, Box<dyn std::error::Error>> {
        test_file_access(&path)?;

        self.file_path = Some(path.clone());
        self.is_active = true;

        Ok(format!("Logging enabled to: {path}"))
    }

    pub fn toggle_logging(&mut self) -> Result<String, Box<dyn std::error::Error>> {
        let Some(path) = self.file_path.clone() else {
            return Err("No log file specified. Use /log <filename> to enable logging first.".into());
        };
        if self.is_active {
            self.write_to_log("## Logging paused")?;
            self.is_active = false;
            Ok(format!("Logging paused (file: {path})"))
        } else {
            self.is_active = true;
            self.write_to_log("## Logging resumed")?;
            Ok(format!("Logging resumed to: {path}"))
        }
    }

    /// Append one transcript entry. Only user and assistant text is logged.
    pub fn log_entry(
        &self,
        role: TranscriptRole,
        content: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !self.is_active || self.file_path.is_none() {
            return Ok(());
        }
        match role {
            TranscriptRole::User => self.write_to_log(&format!("You: {content}")),
            TranscriptRole::Assistant if !content.is_empty() => self.write_to_log(content),
            _ => Ok(()),
        }
    }

    fn write_to_log(&self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        let Some(file_path) = self.file_path.as_deref() else {
            return Ok(());
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        let mut writer = BufWriter::new(file);

        for line in content.lines() {
            writeln!(writer, "{line}")?;
        }
        writeln!(writer)?;

        writer.flush()?;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn get_status_string(&self) -> String {
        let file_name = |path: &str| {
            Path::new(path)
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned()
        };
        match (&self.file_path, self.is_active) {
            (None, _) => "disabled".to_string(),
            (Some(path), true) => format!("active ({})", file_name(path)),
            (Some(path), false) => format!("paused ({})", file_name(path)),
        }
    }
}

fn test_file_access(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn logs_user_and_assistant_text_only() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("chat.log");
        let logging = LoggingState::new(Some(path.to_string_lossy().into_owned())).expect("log");
        assert!(logging.is_active());

        logging
            .log_entry(TranscriptRole::User, "why?")
            .expect("user");
        logging
            .log_entry(TranscriptRole::SystemNote, "Switched model")
            .expect("note");
        logging
            .log_entry(TranscriptRole::Assistant, "because\nreasons")
            .expect("assistant");

        let contents = std::fs::read_to_string(&path).expect("read");
        assert_eq!(contents, "You: why?\n\nbecause\nreasons\n\n");
    }

    #[test]
    fn toggle_requires_a_file() {
        let mut logging = LoggingState::disabled();
        assert!(logging.toggle_logging().is_err());
        assert_eq!(logging.get_status_string(), "disabled");
    }

    #[test]
    fn paused_log_skips_writes() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("chat.log");
        let mut logging = LoggingState::disabled();
        logging
            .set_log_file(path.to_string_lossy().into_owned())
            .expect("set");

        let message = logging.toggle_logging().expect("pause");
        assert!(message.starts_with("Logging paused"));
        assert_eq!(logging.get_status_string(), "paused (chat.log)");
        logging
            .log_entry(TranscriptRole::User, "hidden")
            .expect("skip");

        logging.toggle_logging().expect("resume");
        logging
            .log_entry(TranscriptRole::User, "shown")
            .expect("write");

        let contents = std::fs::read_to_string(&path).expect("read");
        assert!(!contents.contains("hidden"));
        assert!(contents.ends_with("## Logging resumed\n\nYou: shown\n\n"));
    }
}
