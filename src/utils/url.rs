//! URL helpers for building backend endpoint addresses.

/// Strip trailing slashes so endpoint joins never produce `//`.
///
/// ```
/// use debugmate::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://127.0.0.1:8000/"), "http://127.0.0.1:8000");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Join a backend base URL and an endpoint path.
///
/// ```
/// use debugmate::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://127.0.0.1:8000/", "/api/chat"),
///     "http://127.0.0.1:8000/api/chat"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{normalized_base}/{endpoint}")
}

/// Loose sanity check used when a backend URL is set from the CLI.
pub fn looks_like_http_url(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .is_some_and(|rest| !rest.trim_matches('/').is_empty())
}
