//! Tests for the reqwest transport against a one-shot local HTTP responder.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use gif_upload::{Config, HttpTransport, Transport, UploadError};

struct CapturedRequest {
    request_line: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Serves exactly one request, answering with `status` and `body`.
async fn serve_once(
    status: &'static str,
    body: &'static str,
) -> (String, oneshot::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos;
            }
            assert!(n > 0, "connection closed before headers");
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap_or_default().to_string();
        let headers: Vec<(String, String)> = lines
            .filter_map(|l| l.split_once(':'))
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .collect();
        let content_length = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .map(|(_, v)| v.parse::<usize>().unwrap())
            .unwrap_or(0);

        let mut request_body = buf[header_end + 4..].to_vec();
        while request_body.len() < content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before body");
            request_body.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: text/html\r\ncontent-length: {}\r\n\
             connection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();

        let _ = tx.send(CapturedRequest {
            request_line,
            headers,
            body: request_body,
        });
    });

    (format!("http://{addr}"), rx)
}

fn transport_for(server_url: String) -> HttpTransport {
    let config = Config {
        server_url,
        timeout_secs: 5,
        ..Config::default()
    };
    HttpTransport::new(&config).unwrap()
}

#[tokio::test]
async fn test_post_sends_raw_body_without_content_type() {
    let (url, captured) = serve_once("200 OK", "").await;
    let transport = transport_for(url);

    let response = transport.post_text("/gif", "R0lGODlh".into()).await.unwrap();

    assert_eq!(response.status, 200);
    let request = captured.await.unwrap();
    assert_eq!(request.request_line, "POST /gif HTTP/1.1");
    assert_eq!(request.body, b"R0lGODlh");
    assert!(request.header("content-type").is_none());
    assert!(request
        .header("user-agent")
        .unwrap()
        .starts_with("gif-upload/"));
}

#[tokio::test]
async fn test_error_status_is_returned_not_raised() {
    let (url, _captured) = serve_once("500 Internal Server Error", "boom").await;
    let transport = transport_for(url);

    let response = transport.post_text("/gif", "AA==".into()).await.unwrap();

    assert_eq!(response.status, 500);
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_get_page_returns_body() {
    let (url, captured) = serve_once("200 OK", "<h1>It works !</h1>").await;
    let transport = transport_for(url);

    let page = transport.get_page("/").await.unwrap();

    assert_eq!(page.body, "<h1>It works !</h1>");
    assert_eq!(captured.await.unwrap().request_line, "GET / HTTP/1.1");
}

#[tokio::test]
async fn test_zero_timeout_means_no_timeout() {
    let (url, _captured) = serve_once("200 OK", "").await;
    let config = Config {
        server_url: url,
        timeout_secs: 0,
        ..Config::default()
    };
    let transport = HttpTransport::new(&config).unwrap();

    let response = transport.post_text("/gif", "AA==".into()).await.unwrap();

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let transport = transport_for(format!("http://{addr}"));

    let err = transport.post_text("/gif", "AA==".into()).await.unwrap_err();

    assert!(matches!(err, UploadError::Http { .. }));
}

#[test]
fn test_rejects_non_http_server() {
    let config = Config {
        server_url: "file:///tmp/gallery".into(),
        ..Config::default()
    };
    assert!(matches!(
        HttpTransport::new(&config),
        Err(UploadError::InvalidServerUrl { .. })
    ));
}
