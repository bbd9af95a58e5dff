//! `health` and `models` subcommands: one-shot probes of the backend.

use std::error::Error;

use reqwest::Client;

use crate::api::health::{fetch_health, merge_model_lists};
use crate::api::HealthResponse;

fn mark(ok: bool) -> &'static str {
    if ok {
        "✅"
    } else {
        "❌"
    }
}

pub(crate) fn format_health(base_url: &str, health: &HealthResponse) -> Vec<String> {
    let mut lines = vec![
        format!("{} Backend at {base_url}: {}", mark(health.status == "ok"), health.status),
        format!("{} Ollama reachable", mark(health.ollama_reachable)),
    ];
    if health.models_available.is_empty() {
        lines.push("   No models reported".to_string());
    } else {
        lines.push("   Models available:".to_string());
        lines.extend(
            health
                .models_available
                .iter()
                .map(|model| format!("     {model}")),
        );
    }
    lines
}

pub async fn check_health(base_url: &str) -> Result<(), Box<dyn Error>> {
    let client = Client::new();
    match fetch_health(&client, base_url).await {
        Ok(health) => {
            for line in format_health(base_url, &health) {
                println!("{line}");
            }
            Ok(())
        }
        Err(err) => {
            tracing::warn!(%base_url, "health check failed: {err}");
            eprintln!("❌ Backend at {base_url} is not reachable: {err}");
            std::process::exit(1);
        }
    }
}

pub(crate) fn format_model_list(models: &[String], default_model: &str) -> Vec<String> {
    models
        .iter()
        .map(|model| {
            if model == default_model {
                format!("  {model}*")
            } else {
                format!("  {model}")
            }
        })
        .collect()
}

pub async fn list_models(
    base_url: &str,
    configured: &[String],
    default_model: &str,
) -> Result<(), Box<dyn Error>> {
    let client = Client::new();
    let models = match fetch_health(&client, base_url).await {
        Ok(health) => merge_model_lists(&health.models_available, configured),
        Err(err) => {
            eprintln!("⚠️  Could not ask the backend for models ({err}); showing configured models.");
            configured.to_vec()
        }
    };

    println!("Available models:");
    for line in format_model_list(&models, default_model) {
        println!("{line}");
    }
    println!("\n* = default model");
    Ok(())
}
