use monitor_stream_rs::{
    Credentials, MonitorClient, ResultRenderer, WriterRenderer, EXAMPLE_TITLE, RESULT_MESSAGE,
};

#[tokio::main]
async fn main() -> miette::Result<()> {
    dotenvy::from_filename("tests/.env").ok();

    let base_path = std::env::var("MONITOR_BASE_PATH").expect("MONITOR_BASE_PATH not set");
    let access_token = std::env::var("MONITOR_ACCESS_TOKEN").expect("MONITOR_ACCESS_TOKEN not set");
    let page_size = std::env::var("MONITOR_PAGE_SIZE")
        .ok()
        .and_then(|size| size.parse().ok())
        .unwrap_or(monitor_stream_rs::DEFAULT_PAGE_SIZE);

    let client = MonitorClient::builder()
        .base_path(&base_path)
        .credentials(Credentials::new(&access_token))
        .build();

    let mut renderer = WriterRenderer::stdout();
    match client.fetch_all(page_size).await {
        Ok(pages) => {
            renderer.render(EXAMPLE_TITLE, RESULT_MESSAGE, &pages.to_json_string());
            Ok(())
        }
        Err(e) => {
            if let Some(advisory) = e.advisory() {
                renderer.render(EXAMPLE_TITLE, advisory, "");
            }
            Err(e.into())
        }
    }
}
