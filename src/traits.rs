use crate::MonitorResult;

/// Supplies the bearer token for stream requests.
///
/// Implementations may perform a token exchange (for example a JWT grant) before
/// returning; the paginator only ever sees the resulting token.
#[async_trait::async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns a bearer access token.
    async fn access_token(&self) -> MonitorResult<String>;
}

/// Presents a fetched result to the user.
pub trait ResultRenderer {
    /// Renders a page with a title, a human-readable message and a raw JSON payload.
    fn render(&mut self, title: &str, message: &str, json_payload: &str);
}
