//! Registry of setting handlers.

use std::collections::HashMap;

use super::handlers::{
    concurrent_turns_handler, sound_handler, BackendUrlHandler, DefaultModelHandler,
    ModelsHandler, ThemeHandler,
};
use super::SettingHandler;

/// Registry of all available setting handlers.
pub struct SettingRegistry {
    handlers: HashMap<&'static str, Box<dyn SettingHandler>>,
    /// Keys in display order for error hints.
    display_order: Vec<&'static str>,
}

impl SettingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
            display_order: Vec::new(),
        };

        registry.register(Box::new(BackendUrlHandler));
        registry.register(Box::new(DefaultModelHandler));
        registry.register(Box::new(ModelsHandler));
        registry.register(Box::new(sound_handler()));
        registry.register(Box::new(concurrent_turns_handler()));
        registry.register(Box::new(ThemeHandler));

        registry
    }

    fn register(&mut self, handler: Box<dyn SettingHandler>) {
        let key = handler.key();
        self.display_order.push(key);
        self.handlers.insert(key, handler);
    }

    pub fn get(&self, key: &str) -> Option<&dyn SettingHandler> {
        self.handlers.get(key).map(|h| h.as_ref())
    }

    pub fn keys_display_order(&self) -> &[&'static str] {
        &self.display_order
    }
}

impl Default for SettingRegistry {
    fn default() -> Self {
        Self::new()
    }
}
