use std::sync::LazyLock;
use std::time::Duration;

/// `User-Agent` sent with every downstream request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Global HTTP client instance
///
/// Initialized lazily on first access and reused across the process, so every
/// sender shares one connection pool and DNS cache.
///
/// No request timeout is configured: a send runs until the downstream service
/// answers or the connection fails.
///
/// # Example
/// ```rust,ignore
/// use notify_sdk::external::client::HTTP_CLIENT;
///
/// async fn ping() -> Result<reqwest::StatusCode, reqwest::Error> {
///     let response = HTTP_CLIENT
///         .get("http://localhost:9012/health")
///         .send()
///         .await?;
///
///     Ok(response.status())
/// }
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        .gzip(true)
        .https_only(false)
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to build HTTP client")
});
