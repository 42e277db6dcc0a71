//! Endpoint construction for the REST clients.

/// Join a base URL and an endpoint path without doubling slashes.
///
/// Base URLs arrive from config or the environment with or without a
/// trailing slash; endpoints are written without a leading one.
///
/// # Examples
///
/// ```
/// use paterm::utils::url::endpoint_url;
///
/// assert_eq!(
///     endpoint_url("https://api.openweathermap.org/data/2.5/", "weather"),
///     "https://api.openweathermap.org/data/2.5/weather"
/// );
/// assert_eq!(
///     endpoint_url("https://api.openai.com/v1", "chat/completions"),
///     "https://api.openai.com/v1/chat/completions"
/// );
/// ```
pub fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_and_leading_slashes_collapse() {
        assert_eq!(
            endpoint_url("https://api.openai.com/v1/", "/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            endpoint_url("https://api.openai.com/v1///", "chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn plain_join_is_untouched() {
        assert_eq!(
            endpoint_url("https://api.openweathermap.org/data/2.5", "weather"),
            "https://api.openweathermap.org/data/2.5/weather"
        );
    }
}
