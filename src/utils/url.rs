//! Joining the configured base URL with the chat endpoint path.

/// Normalize a base URL by removing trailing slashes
///
/// # Examples
///
/// ```
/// use wingman::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:3000/"), "http://localhost:3000");
/// assert_eq!(normalize_base_url("http://localhost:3000///"), "http://localhost:3000");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Construct a complete endpoint URL from a base URL and endpoint path,
/// with exactly one slash at the join.
///
/// # Examples
///
/// ```
/// use wingman::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:3000", "api/chat"),
///     "http://localhost:3000/api/chat"
/// );
/// assert_eq!(
///     construct_api_url("http://localhost:3000/", "/api/chat"),
///     "http://localhost:3000/api/chat"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}
