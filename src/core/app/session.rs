use std::collections::HashMap;

use reqwest::Client;

use crate::core::chat_service::TurnId;
use crate::core::transcript::PlaceholderHandle;
use crate::utils::logging::LoggingState;
use crate::utils::sound::Chime;

/// The model picked in the selector and the one the backend last answered
/// with. The backend uses the pair to decide whether to announce a switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelection {
    selected: String,
    previous: String,
}

impl ModelSelection {
    pub fn new(initial: impl Into<String>) -> Self {
        let initial = initial.into();
        Self {
            previous: initial.clone(),
            selected: initial,
        }
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn previous(&self) -> &str {
        &self.previous
    }

    /// Returns true when the selection actually changed.
    pub fn select(&mut self, model: &str) -> bool {
        if self.selected == model {
            return false;
        }
        self.selected = model.to_string();
        true
    }

    /// Only a completed round trip moves the previously used model.
    pub fn record_success(&mut self, used: impl Into<String>) {
        self.previous = used.into();
    }
}

/// A turn waiting on the backend. It owns the placeholder shown meanwhile.
#[derive(Debug)]
pub struct PendingTurn {
    pub placeholder: PlaceholderHandle,
    pub model: String,
}

pub struct SessionContext {
    pub client: Client,
    pub backend_url: String,
    pub models: ModelSelection,
    pub pending: HashMap<TurnId, PendingTurn>,
    pub next_turn_id: u64,
    pub logging: LoggingState,
    pub chime: Chime,
    pub allow_concurrent_turns: bool,
}

impl SessionContext {
    pub fn allocate_turn_id(&mut self) -> TurnId {
        let id = TurnId(self.next_turn_id);
        self.next_turn_id += 1;
        id
    }

    pub fn has_pending_turns(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn take_pending(&mut self, turn_id: TurnId) -> Option<PendingTurn> {
        self.pending.remove(&turn_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_starts_equal_to_selected() {
        let models = ModelSelection::new("a");
        assert_eq!(models.selected(), "a");
        assert_eq!(models.previous(), "a");
    }

    #[test]
    fn selecting_does_not_move_previous() {
        let mut models = ModelSelection::new("a");
        assert!(models.select("b"));
        assert!(!models.select("b"));
        assert_eq!(models.previous(), "a");
        models.record_success("b");
        assert_eq!(models.previous(), "b");
    }
}
