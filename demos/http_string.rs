use monitor_stream_rs::{requests::RequestToHttpString, Credentials, Cursor, MonitorClient};

fn main() {
    let base_path = std::env::var("MONITOR_BASE_PATH").expect("MONITOR_BASE_PATH not set");
    let access_token = std::env::var("MONITOR_ACCESS_TOKEN").expect("MONITOR_ACCESS_TOKEN not set");

    let client = MonitorClient::builder()
        .base_path(&base_path)
        .credentials(Credentials::new(&access_token))
        .build();

    let request = client
        .prepare_request(&Cursor::new(client.page_size()))
        .expect("invalid request");

    println!("{}", request.to_http_string().unwrap());
}
