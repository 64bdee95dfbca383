//! HTTP tool tests against a local one-shot server: the todo tool's
//! success/failure contract and the Tavily tool's request/format behavior.

mod init_logging;

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use bard::{TavilySearchTool, TodoTool, Tool};

/// Serves exactly one HTTP response on an ephemeral port and returns the base URL.
async fn serve_once(status_line: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "{}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{}", addr)
}

/// A valid id yields indented JSON carrying id, userId, title, completed.
#[tokio::test]
async fn todo_valid_id_returns_indented_json() {
    let body = r#"{"userId":1,"id":1,"title":"delectus aut autem","completed":false}"#;
    let base = serve_once("HTTP/1.1 200 OK", body.to_string()).await;

    let tool = TodoTool::new().with_base_url(format!("{}/todos", base));
    let out = tool.call(json!({"todo_id": 1})).await.unwrap();

    let value: serde_json::Value = serde_json::from_str(&out.text).expect("valid JSON");
    assert_eq!(value["id"], 1);
    assert_eq!(value["userId"], 1);
    assert_eq!(value["title"], "delectus aut autem");
    assert_eq!(value["completed"], false);
    assert!(out.text.contains('\n'), "re-serialized with indentation");
}

/// A non-2xx status becomes the fetch-error text, not an Err.
#[tokio::test]
async fn todo_http_error_status_returns_error_text() {
    let base = serve_once("HTTP/1.1 404 Not Found", "{}".to_string()).await;

    let tool = TodoTool::new().with_base_url(format!("{}/todos", base));
    let out = tool.call(json!({"todo_id": 9999})).await.unwrap();
    assert!(
        out.text.starts_with("Error fetching todo item:"),
        "{}",
        out.text
    );
}

/// A body that is not JSON becomes the parse-error text, not an Err.
#[tokio::test]
async fn todo_invalid_json_returns_parse_error_text() {
    let base = serve_once("HTTP/1.1 200 OK", "<html>not json</html>".to_string()).await;

    let tool = TodoTool::new().with_base_url(format!("{}/todos", base));
    let out = tool.call(json!({"todo_id": 1})).await.unwrap();
    assert!(
        out.text.starts_with("Error parsing JSON response:"),
        "{}",
        out.text
    );
}

/// An unreachable host becomes the fetch-error text, not an Err.
#[tokio::test]
async fn todo_unreachable_host_returns_error_text() {
    let tool = TodoTool::new().with_base_url("http://127.0.0.1:1/todos");
    let out = tool.call(json!({})).await.unwrap();
    assert!(
        out.text.starts_with("Error fetching todo item:"),
        "{}",
        out.text
    );
}

/// Tavily search formats results from the API response.
#[tokio::test]
async fn tavily_formats_results_from_response() {
    let body = json!({
        "answer": "Fair skies over Seoul.",
        "results": [
            {
                "title": "Seoul Weather Today",
                "url": "https://weather.example/seoul",
                "content": "22C, clear skies"
            },
            {
                "title": "Forecast",
                "url": "https://weather.example/forecast",
                "content": "Sunny all week"
            }
        ]
    })
    .to_string();
    let base = serve_once("HTTP/1.1 200 OK", body).await;

    let tool = TavilySearchTool::new("test-key").with_endpoint(format!("{}/search", base));
    let out = tool
        .call(json!({"query": "weather in Seoul"}))
        .await
        .unwrap();

    assert!(out.text.starts_with("Fair skies over Seoul."));
    assert!(out.text.contains("[1] Seoul Weather Today"));
    assert!(out.text.contains("[2] Forecast"));
    assert!(out.text.contains("URL: https://weather.example/seoul"));
}

/// Tavily propagates API failures as errors (the act node turns them into
/// error tool results for the model).
#[tokio::test]
async fn tavily_api_error_is_err() {
    let base = serve_once(
        "HTTP/1.1 401 Unauthorized",
        r#"{"error":"bad key"}"#.to_string(),
    )
    .await;

    let tool = TavilySearchTool::new("bad-key").with_endpoint(format!("{}/search", base));
    let err = tool.call(json!({"query": "anything"})).await.unwrap_err();
    assert!(err.to_string().contains("401"), "{}", err);
}

/// Live call against the real JSONPlaceholder API (network).
#[tokio::test]
#[ignore = "requires network; run with: cargo test -p bard todo_live -- --ignored"]
async fn todo_live_fetches_item_one() {
    let tool = TodoTool::new();
    let out = tool.call(json!({"todo_id": 1})).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&out.text).expect("valid JSON");
    assert_eq!(value["id"], 1);
}
