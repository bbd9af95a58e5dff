use crate::api::HealthResponse;
use crate::core::constants::HEALTH_ENDPOINT;
use crate::utils::url::construct_api_url;

pub async fn fetch_health(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<HealthResponse, Box<dyn std::error::Error>> {
    let health_url = construct_api_url(base_url, HEALTH_ENDPOINT);
    let response = client.get(health_url).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(format!("Health check failed with status {status}: {error_text}").into());
    }

    let health = response.json::<HealthResponse>().await?;
    Ok(health)
}

/// Models to offer in listings: backend-reported ones first, then configured
/// ones the backend did not mention.
pub fn merge_model_lists(reported: &[String], configured: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(reported.len() + configured.len());
    for model in reported.iter().chain(configured.iter()) {
        let trimmed = model.trim();
        if trimmed.is_empty() || merged.iter().any(|m| m == trimmed) {
            continue;
        }
        merged.push(trimmed.to_string());
    }
    merged
}
