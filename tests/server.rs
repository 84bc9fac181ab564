use source_fragment::config::{AppState, Config};
use source_fragment::server;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Notify;

struct TestServer {
    addr: SocketAddr,
    shutdown: Arc<Notify>,
    task: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start(mount_path: &str, methods: Option<&[&str]>) -> Self {
        let mut cfg = Config::load_from("definitely-missing-config-file").unwrap();
        cfg.logging.access_log = false;
        cfg.fragment.mount_path = mount_path.to_string();
        cfg.fragment.cwd = Some(env!("CARGO_MANIFEST_DIR").into());
        cfg.fragment.methods =
            methods.map(|names| names.iter().map(ToString::to_string).collect());

        let listener = server::create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(AppState::new(cfg).unwrap());
        let shutdown = Arc::new(Notify::new());
        let task = tokio::spawn(server::serve(listener, state, Arc::clone(&shutdown)));

        Self {
            addr,
            shutdown,
            task,
        }
    }

    async fn request(&self, method: &str, path: &str) -> (u16, String, String) {
        let mut stream = TcpStream::connect(self.addr).await.unwrap();
        let request = format!(
            "{method} {path} HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
        );
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.unwrap();
        let raw = String::from_utf8(raw).unwrap();

        let (head, body) = raw.split_once("\r\n\r\n").unwrap();
        let status = head
            .split_whitespace()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap();
        (status, head.to_ascii_lowercase(), body.to_string())
    }

    async fn stop(self) {
        self.shutdown.notify_one();
        self.task.await.unwrap();
    }
}

const SCRIPT: &str = "test/fixture/script.js:2:12:5:6";

#[tokio::test]
async fn mounted_at_root_serves_any_path_and_method() {
    let server = TestServer::start("/", None).await;

    let (status, head, body) = server.request("GET", &format!("/any?loc={SCRIPT}")).await;
    assert_eq!(status, 200);
    assert!(head.contains("content-type: text/html; charset=utf-8"));
    assert!(body.starts_with("<div ") && body.ends_with("</div>"));

    let (status, _, body) = server.request("POST", &format!("/any?loc={SCRIPT}")).await;
    assert_eq!(status, 200);
    assert!(body.starts_with("<div "));

    let (status, _, body) = server.request("GET", &format!("/any?locx={SCRIPT}")).await;
    assert_eq!(status, 400);
    assert_eq!(body, "[source-fragment] Parameter missed: loc");

    let (status, _, body) = server
        .request("GET", "/any?loc=test/fixture/bad-path.js:2:12:5:6")
        .await;
    assert_eq!(status, 404);
    assert!(body.starts_with("[source-fragment] File not found: "));
    assert!(body.ends_with("requested: test/fixture/bad-path.js:2:12:5:6)"));

    server.stop().await;
}

#[tokio::test]
async fn mounted_under_path() {
    let server = TestServer::start("/test", None).await;

    let (status, _, _) = server.request("GET", &format!("/test?loc={SCRIPT}")).await;
    assert_eq!(status, 200);

    let (status, _, _) = server.request("POST", &format!("/test?loc={SCRIPT}")).await;
    assert_eq!(status, 200);

    let (status, _, body) = server.request("GET", &format!("/?loc={SCRIPT}")).await;
    assert_eq!(status, 404);
    assert_eq!(body, "Cannot GET /");

    let (status, _, body) = server.request("GET", &format!("/xx?loc={SCRIPT}")).await;
    assert_eq!(status, 404);
    assert_eq!(body, "Cannot GET /xx");

    server.stop().await;
}

#[tokio::test]
async fn mounted_for_get_only() {
    let server = TestServer::start("/test", Some(&["GET"])).await;

    let (status, _, _) = server.request("GET", &format!("/test?loc={SCRIPT}")).await;
    assert_eq!(status, 200);

    let (status, _, body) = server.request("POST", &format!("/test?loc={SCRIPT}")).await;
    assert_eq!(status, 404);
    assert_eq!(body, "Cannot POST /test");

    let (status, _, body) = server.request("GET", &format!("/test?locx={SCRIPT}")).await;
    assert_eq!(status, 400);
    assert_eq!(body, "[source-fragment] Parameter missed: loc");

    server.stop().await;
}
