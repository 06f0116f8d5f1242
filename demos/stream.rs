use futures::StreamExt;
use monitor_stream_rs::{Credentials, MonitorClient};

#[tokio::main]
async fn main() {
    dotenvy::from_filename("tests/.env").ok();

    let base_path = std::env::var("MONITOR_BASE_PATH").expect("MONITOR_BASE_PATH not set");
    let access_token = std::env::var("MONITOR_ACCESS_TOKEN").expect("MONITOR_ACCESS_TOKEN not set");

    let client = MonitorClient::builder()
        .base_path(&base_path)
        .credentials(Credentials::new(&access_token))
        .max_duration(std::time::Duration::from_secs(120))
        .build();

    // Example 1: Manual iteration
    println!("=== Manual iteration (10 records per page) ===");
    let mut paginator = client
        .paginator_with_page_size(10)
        .expect("failed to create paginator");

    while let Some(page) = paginator.next_page().await.expect("failed to fetch page") {
        let events = page["data"].as_array().map(Vec::len).unwrap_or_default();
        println!("Page {}: {} events", paginator.pages_fetched(), events);

        // Stop after 3 pages for demo purposes
        if paginator.pages_fetched() >= 3 {
            break;
        }
    }
    println!("Resume from cursor: {:?}", paginator.cursor().cursor_id);

    // Example 2: Stream every page
    println!("\n=== Stream all pages (50 records per page) ===");
    let mut pages = Box::pin(
        client
            .paginator_with_page_size(50)
            .expect("failed to create paginator")
            .into_stream(),
    );

    let mut total = 0;
    while let Some(page) = pages.next().await {
        let page = page.expect("failed to fetch page");
        total += 1;
        println!("  endCursor: {}", page["endCursor"]);
    }
    println!("Total pages collected: {}", total);
}
