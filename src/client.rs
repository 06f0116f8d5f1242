use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;
use typed_builder::TypedBuilder;

use crate::cursor::{Cursor, QueryStyle};
use crate::error::MonitorError;
use crate::paginator::CursorPaginator;
use crate::requests::RequestToHttpString;
use crate::responses::{PageResponse, ResultSet};
use crate::traits::CredentialProvider;
use crate::{Credentials, MonitorResult, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE};

/// The internal builder for constructing a `MonitorClient`
#[derive(TypedBuilder)]
#[builder(build_method(into = MonitorClient))]
pub struct InternalMonitorClient {
    /// Base path of the dataset, without the `/stream` suffix
    ///
    /// Example: `https://lens.docusign.net/api/v2.0/datasets/monitor`
    #[builder(setter(transform = |base_path: &str| base_path.trim_end_matches('/').to_string()))]
    base_path: String,
    /// Credentials of the client
    credentials: Credentials,
    /// Amount of records requested per page
    #[builder(default = DEFAULT_PAGE_SIZE)]
    page_size: u32,
    /// Maximum amount of pages fetched before giving up, `None` to disable
    #[builder(default = Some(DEFAULT_MAX_PAGES))]
    max_pages: Option<u32>,
    /// Maximum wall-clock time for a whole pagination
    #[builder(default, setter(strip_option))]
    max_duration: Option<Duration>,
    /// Timeout for a single request
    #[builder(default = Duration::from_secs(60))]
    timeout: Duration,
    /// Allow unsafe SSL certificates
    #[builder(default = false)]
    allow_insecure: bool,
    /// How the cursor is written into the query string
    #[builder(default)]
    query_style: QueryStyle,
}

/// The web client to consume a monitoring event stream
pub struct MonitorClient {
    /// Base path of the dataset
    base_path: String,
    /// Credentials of the client
    credentials: Credentials,
    /// Amount of records requested per page
    page_size: u32,
    /// Maximum amount of pages per pagination
    pub(crate) max_pages: Option<u32>,
    /// Maximum duration of a pagination
    pub(crate) max_duration: Option<Duration>,
    /// Cursor formatting
    query_style: QueryStyle,
    /// The client
    client: reqwest::Client,
}

impl From<InternalMonitorClient> for MonitorClient {
    fn from(client: InternalMonitorClient) -> Self {
        // Connections are not kept idle between pages.
        let req_client = reqwest::Client::builder()
            .danger_accept_invalid_certs(client.allow_insecure)
            .timeout(client.timeout)
            .pool_max_idle_per_host(0)
            .build()
            .expect("Failed to build client");

        MonitorClient {
            base_path: client.base_path,
            credentials: client.credentials,
            page_size: client.page_size,
            max_pages: client.max_pages,
            max_duration: client.max_duration,
            query_style: client.query_style,
            client: req_client,
        }
    }
}

impl MonitorClient {
    /// Creates a builder for the client
    pub fn builder() -> InternalMonitorClientBuilder {
        InternalMonitorClient::builder()
    }

    /// Creates a client with default settings, asking `provider` for the access token.
    pub async fn from_provider(
        base_path: &str,
        provider: &dyn CredentialProvider,
    ) -> MonitorResult<MonitorClient> {
        let token = provider.access_token().await?;
        Ok(MonitorClient::builder()
            .base_path(base_path)
            .credentials(Credentials::new(&token))
            .build())
    }

    /// Returns the base path of the dataset.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the configured page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Sets the amount of records requested per page.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size;
    }

    /// Returns the headers sent with every stream request.
    pub fn get_default_headers(&self) -> MonitorResult<HeaderMap> {
        if self.credentials.access_token.is_empty() {
            return Err(MonitorError::MissingCredentials);
        }

        let mut authorization =
            HeaderValue::from_str(&format!("Bearer {}", self.credentials.access_token))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, authorization);
        Ok(headers)
    }

    /// Builds the request for the page at `cursor` without sending it.
    pub fn prepare_request(&self, cursor: &Cursor) -> MonitorResult<reqwest::Request> {
        let url = cursor.stream_url(&self.base_path, self.query_style)?;
        let headers = self.get_default_headers()?;
        Ok(self.client.get(url).headers(headers).build()?)
    }

    /// Fetches and parses the page at `cursor`.
    ///
    /// Any status outside of 200-399 is returned as `MonitorError::Status`.
    #[tracing::instrument(skip_all, fields(cursor = %cursor.cursor_id, limit = cursor.limit))]
    pub async fn fetch_page(&self, cursor: &Cursor) -> MonitorResult<PageResponse> {
        let request = self.prepare_request(cursor)?;
        if tracing::enabled!(tracing::Level::TRACE) {
            let dump = request.to_http_string()?;
            tracing::trace!("sending request:\n{}", dump);
        }

        let response = self.client.execute(request).await?;
        let status = response.status();
        if !(200..400).contains(&status.as_u16()) {
            let body = response.text().await.unwrap_or_default();
            let message = match body.trim() {
                "" => status.canonical_reason().unwrap_or("Unknown status").to_string(),
                text => text.to_string(),
            };
            tracing::debug!(status = status.as_u16(), %message, "stream request failed");
            return Err(MonitorError::status(status.as_u16(), message));
        }

        let text = response.text().await?;
        let page = PageResponse::parse(&text)?;
        tracing::debug!(end_cursor = %page.end_cursor, "received page");
        Ok(page)
    }

    /// Starts a pagination with the configured page size.
    pub fn paginator(&self) -> MonitorResult<CursorPaginator<'_>> {
        CursorPaginator::new(self, self.page_size)
    }

    /// Starts a pagination with the given page size.
    pub fn paginator_with_page_size(&self, page_size: u32) -> MonitorResult<CursorPaginator<'_>> {
        CursorPaginator::new(self, page_size)
    }

    /// Fetches every page of the stream.
    pub async fn fetch_all(&self, page_size: u32) -> MonitorResult<ResultSet> {
        self.paginator_with_page_size(page_size)?.collect_all().await
    }
}
