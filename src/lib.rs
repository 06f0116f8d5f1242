#![warn(missing_docs)]
#![crate_name = "monitor_stream_rs"]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Monitoring Stream Client
//!
//! `monitor_stream_rs` is a web client which pages through a monitoring event stream
//! (`GET {base_path}/stream?cursor=<cursor>&limit=<n>`) and collects every page.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use monitor_stream_rs::{Credentials, MonitorClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = MonitorClient::builder()
//!         .base_path("https://lens.docusign.net/api/v2.0/datasets/monitor")
//!         .credentials(Credentials::new("my-access-token"))
//!         .build();
//!     let pages = client.fetch_all(100).await.expect("failed to fetch the stream");
//!     println!("{}", pages.to_json_string());
//! }
//! ```

/// Module containing the client.
pub mod client;
/// Module containing the pagination cursor.
pub mod cursor;
/// Module containing the error type.
pub mod error;
/// Module containing the paginator.
pub mod paginator;
/// Module containing the plain-text result renderer.
pub mod render;
/// Module containing request helpers.
pub mod requests;
/// Module containing the page and result types.
pub mod responses;
/// Module containing the collaborator traits.
pub mod traits;

mod credentials;

pub use client::MonitorClient;
pub use credentials::Credentials;
pub use cursor::{Cursor, QueryStyle};
pub use error::MonitorError;
pub use paginator::CursorPaginator;
pub use render::WriterRenderer;
pub use responses::{PageResponse, ResultSet};
pub use serde_json::Value;
pub use traits::{CredentialProvider, ResultRenderer};

/// Result type for the monitor-stream-rs crate.
pub type MonitorResult<T> = std::result::Result<T, error::MonitorError>;

/// Default amount of records requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 1;
/// Default maximum amount of pages fetched in one pagination.
pub const DEFAULT_MAX_PAGES: u32 = 10_000;

/// Path of the monitor dataset, relative to the API host.
pub const DATASET_PATH: &str = "/api/v2.0/datasets/monitor";
/// Title of the result page.
pub const EXAMPLE_TITLE: &str = "Get monitoring data";
/// Message shown above the fetched pages.
pub const RESULT_MESSAGE: &str = "Results from the DataSet:GetStreamForDataset method:";
/// Advisory shown when the server reports a corrupt connection string.
pub const CONNECTION_ADVISORY: &str =
    "The connection string may be corrupt, please ensure that you are using the right URL.";

/// Joins an API host and the monitor dataset path.
pub fn dataset_url(host: &str) -> String {
    format!("{}{}", host.trim_end_matches('/'), DATASET_PATH)
}

/// Fetches every page of the stream at `base_path`, using `credential` as bearer token.
pub async fn fetch_all(base_path: &str, credential: &str, page_size: u32) -> MonitorResult<ResultSet> {
    MonitorClient::builder()
        .base_path(base_path)
        .credentials(Credentials::new(credential))
        .build()
        .fetch_all(page_size)
        .await
}
