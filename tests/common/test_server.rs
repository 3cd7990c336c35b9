use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::LazyLock;

use axum::{Json, Router, http::StatusCode, routing::get};
use serde_json::Value;
use tempfile::TempDir;

pub struct TestServer {
    pub temp_dir: TempDir,
    pub base_url: String,
    server_process: Option<Child>,
}

static BUILD_RELEASE: LazyLock<()> = LazyLock::new(|| {
    let build_status = Command::new("cargo")
        .args(["build", "--release"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .expect("build release binary");
    assert!(build_status.success(), "Failed to build release binary");
});

impl TestServer {
    /// Starts a server whose source URLs point nowhere. Fine for everything
    /// except populate.
    pub async fn start() -> Self {
        Self::start_with_sources("http://127.0.0.1:9/android.json", "http://127.0.0.1:9/ios.json")
            .await
    }

    pub async fn start_with_sources(android_url: &str, ios_url: &str) -> Self {
        LazyLock::force(&BUILD_RELEASE);

        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("gamedex.db");
        let binary = Path::new(env!("CARGO_MANIFEST_DIR")).join("target/release/gamedex");

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        drop(listener);

        let base_url = format!("http://127.0.0.1:{}", port);

        let server_process = Command::new(&binary)
            .args(["serve", "--db"])
            .arg(&db_path)
            .args(["--host", "127.0.0.1", "--port"])
            .arg(port.to_string())
            .args(["--android-url", android_url, "--ios-url", ios_url])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("start server");

        Self::wait_for_ready(&base_url).await;

        Self {
            temp_dir,
            base_url,
            server_process: Some(server_process),
        }
    }

    async fn wait_for_ready(base_url: &str) {
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client
                .get(format!("{}/health", base_url))
                .send()
                .await
                .is_ok()
            {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
        panic!("Server did not become ready");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(mut process) = self.server_process.take() {
            let _ = process.kill();
            let _ = process.wait();
        }
    }
}

/// Serves fixed top-chart documents on an ephemeral port, mimicking the two
/// remote sources. Returns the base URL; the documents live at
/// `/android.json` and `/ios.json`, and `/broken.json` always answers 500.
pub async fn spawn_upstream(android: Value, ios: Value) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upstream");
    let addr = listener.local_addr().expect("upstream addr");

    let app = Router::new()
        .route(
            "/android.json",
            get(move || {
                let doc = android.clone();
                async move { Json(doc) }
            }),
        )
        .route(
            "/ios.json",
            get(move || {
                let doc = ios.clone();
                async move { Json(doc) }
            }),
        )
        .route(
            "/broken.json",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream down") }),
        );

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve upstream");
    });

    format!("http://{addr}")
}
