//! Shared constants used across the application

use std::time::Duration;

/// Backend the client talks to when neither config nor CLI names one.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Chat endpoint path, relative to the backend URL.
pub const CHAT_ENDPOINT: &str = "api/chat";

/// Health endpoint path, relative to the backend URL.
pub const HEALTH_ENDPOINT: &str = "health";

pub const DEFAULT_MODEL: &str = "qwen2.5-coder:1.5b";

/// Models the stock backend accepts.
pub const DEFAULT_MODELS: &[&str] = &[
    "qwen2.5-coder:1.5b",
    "deepseek-coder:1.3b",
    "llama3.2:1b",
    "qwen2.5:0.5b",
];

/// Assistant text shown for every failed turn. Details go to the debug log.
pub const BACKEND_ERROR_TEXT: &str = "Could not connect to backend";

pub const COPY_LABEL: &str = "copy";
pub const COPIED_LABEL: &str = "copied!";
pub const COPY_FAILED_LABEL: &str = "failed";
pub const COPIED_LABEL_DURATION: Duration = Duration::from_millis(1000);
pub const COPY_FAILED_LABEL_DURATION: Duration = Duration::from_millis(1200);

/// Length of the cosmetic loader shown under backend system notes.
pub const LOADER_DURATION: Duration = Duration::from_millis(1500);

/// Redraw cadence for animations and label reverts.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// How long a status line message stays up.
pub const STATUS_DURATION: Duration = Duration::from_secs(4);
