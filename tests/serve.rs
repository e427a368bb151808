//! End-to-end tests: a real listener on an ephemeral port, raw HTTP/1.1 over TCP.

use std::net::SocketAddr;
use std::path::PathBuf;

use pngserve::{Config, ImageServer};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

const CAT_PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDRcat";

struct RawResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl RawResponse {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

struct Harness {
    addr: SocketAddr,
    root: PathBuf,
    shutdown: Option<oneshot::Sender<()>>,
    task: tokio::task::JoinHandle<std::io::Result<()>>,
}

impl Harness {
    async fn start(label: &str) -> Self {
        let root = std::env::temp_dir().join(format!("pngserve-e2e-{label}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(root.join("images")).unwrap();
        std::fs::write(root.join("images/cat.png"), CAT_PNG).unwrap();
        std::fs::write(root.join("readme.txt"), b"not an image").unwrap();

        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.server.root_dir = root.display().to_string();
        config.logging.access_log = false;

        let server = ImageServer::bind(config).unwrap();
        let addr = server.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();
        let task = tokio::spawn(server.serve_until(async move {
            let _ = rx.await;
        }));

        Self {
            addr,
            root,
            shutdown: Some(tx),
            task,
        }
    }

    async fn request(&self, method: &str, path: &str) -> RawResponse {
        let mut stream = TcpStream::connect(self.addr).await.unwrap();
        let request = format!("{method} {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.unwrap();
        parse_response(&raw)
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        (&mut self.task).await.unwrap().unwrap();
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

fn parse_response(raw: &[u8]) -> RawResponse {
    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has a header terminator");
    let head = std::str::from_utf8(&raw[..split]).unwrap();
    let body = raw[split + 4..].to_vec();

    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap();
    let status = status_line.split_whitespace().nth(1).unwrap().parse().unwrap();
    let headers = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    RawResponse {
        status,
        headers,
        body,
    }
}

fn assert_cors(resp: &RawResponse) {
    assert_eq!(resp.header("access-control-allow-origin"), Some("*"));
    assert_eq!(resp.header("access-control-allow-methods"), Some("GET, OPTIONS"));
    assert_eq!(
        resp.header("access-control-allow-headers"),
        Some("X-Requested-With, Content-Type, Accept")
    );
}

#[tokio::test]
async fn serves_png_bytes_with_cors() {
    let harness = Harness::start("get").await;

    let resp = harness.request("GET", "/images/cat.png").await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.header("content-type"), Some("image/png"));
    assert_cors(&resp);
    assert_eq!(resp.body, CAT_PNG);

    let again = harness.request("GET", "/images/cat.png").await;
    assert_eq!(again.body, resp.body);

    harness.stop().await;
}

#[tokio::test]
async fn rejects_non_png_and_missing_files() {
    let harness = Harness::start("not-found").await;

    let resp = harness.request("GET", "/readme.txt").await;
    assert_eq!(resp.status, 404);
    assert!(String::from_utf8_lossy(&resp.body).contains("File not found"));
    assert_cors(&resp);

    let resp = harness.request("GET", "/missing.png").await;
    assert_eq!(resp.status, 404);

    // The listener survives failed requests
    let resp = harness.request("GET", "/images/cat.png").await;
    assert_eq!(resp.status, 200);

    harness.stop().await;
}

#[tokio::test]
async fn answers_preflight_on_any_path() {
    let harness = Harness::start("options").await;

    let resp = harness.request("OPTIONS", "/anything").await;
    assert_eq!(resp.status, 200);
    assert_cors(&resp);
    assert!(resp.body.is_empty());

    harness.stop().await;
}

#[tokio::test]
async fn blocks_traversal_and_unknown_methods() {
    let harness = Harness::start("forbidden").await;

    let resp = harness.request("GET", "/../secret.png").await;
    assert_eq!(resp.status, 403);

    let resp = harness.request("DELETE", "/images/cat.png").await;
    assert_eq!(resp.status, 501);
    assert_eq!(resp.header("allow"), Some("GET, HEAD, OPTIONS"));
    assert_cors(&resp);

    harness.stop().await;
}

#[tokio::test]
async fn head_has_length_but_no_body() {
    let harness = Harness::start("head").await;

    let resp = harness.request("HEAD", "/images/cat.png").await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.header("content-length"), Some(CAT_PNG.len().to_string().as_str()));
    assert!(resp.body.is_empty());

    harness.stop().await;
}
