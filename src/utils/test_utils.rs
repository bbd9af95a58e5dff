use crate::api::ChatReply;
use crate::core::app::{App, AppActionContext};
use crate::ui::theme::Theme;

pub fn create_test_app() -> App {
    App::new_test_app(Theme::dark_default())
}

pub fn default_ctx() -> AppActionContext {
    AppActionContext {
        term_width: 80,
        term_height: 24,
    }
}

pub fn reply(text: &str) -> ChatReply {
    ChatReply {
        reply: text.to_string(),
        system_note: None,
        model_used: None,
    }
}

pub fn reply_with_note(text: &str, note: &str) -> ChatReply {
    ChatReply {
        system_note: Some(note.to_string()),
        ..reply(text)
    }
}
