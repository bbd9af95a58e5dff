use crate::core::config::data::Config;

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.backend_url {
            Some(url) => println!("  backend-url: {url}"),
            None => println!("  backend-url: (unset, using {})", self.backend_url()),
        }
        match &self.default_model {
            Some(model) => println!("  default-model: {model}"),
            None => println!("  default-model: (unset, using {})", self.default_model()),
        }
        match &self.theme {
            Some(theme) => println!("  theme: {theme}"),
            None => println!("  theme: (unset)"),
        }
        println!("  sound: {}", on_off(self.sound_enabled()));
        println!(
            "  concurrent-turns: {}",
            on_off(self.concurrent_turns_allowed())
        );
        println!("  models:");
        for model in self.model_list() {
            println!("    {model}");
        }
    }
}
