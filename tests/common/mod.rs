use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// 一次上传请求中收到的字段
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct ReceivedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub len: usize,
}

#[derive(Debug, Default)]
pub struct Recorded {
    pub uploads: Vec<Vec<ReceivedPart>>,
    pub generates: Vec<Value>,
}

#[derive(Clone)]
struct BackendState {
    upload_status: StatusCode,
    generate_status: StatusCode,
    generate_body: String,
    recorded: Arc<Mutex<Recorded>>,
}

#[allow(dead_code)]
pub struct TestBackend {
    pub address: String,
    pub recorded: Arc<Mutex<Recorded>>,
}

#[allow(dead_code)]
impl TestBackend {
    pub fn api_base_url(&self) -> String {
        format!("{}/api", self.address)
    }

    pub fn uploads(&self) -> Vec<Vec<ReceivedPart>> {
        self.recorded.lock().unwrap().uploads.clone()
    }

    pub fn generates(&self) -> Vec<Value> {
        self.recorded.lock().unwrap().generates.clone()
    }
}

async fn upload(State(state): State<BackendState>, mut multipart: Multipart) -> StatusCode {
    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let len = field.bytes().await.unwrap().len();
        parts.push(ReceivedPart {
            name,
            file_name,
            content_type,
            len,
        });
    }
    state.recorded.lock().unwrap().uploads.push(parts);
    state.upload_status
}

async fn generate(
    State(state): State<BackendState>,
    Json(body): Json<Value>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    state.recorded.lock().unwrap().generates.push(body);
    (
        state.generate_status,
        [(header::CONTENT_TYPE, "application/json")],
        state.generate_body.clone(),
    )
}

/// 在随机端口启动假后端
#[allow(dead_code)]
pub async fn spawn_backend(
    upload_status: StatusCode,
    generate_status: StatusCode,
    generate_body: impl Into<String>,
) -> TestBackend {
    let recorded = Arc::new(Mutex::new(Recorded::default()));
    let state = BackendState {
        upload_status,
        generate_status,
        generate_body: generate_body.into(),
        recorded: recorded.clone(),
    };

    let app = Router::new()
        .route("/api/quiz/upload", post(upload))
        .route("/api/generate", post(generate))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestBackend {
        address: format!("http://127.0.0.1:{}", port),
        recorded,
    }
}

/// 写一个指定大小的文件
#[allow(dead_code)]
pub fn write_file(dir: &std::path::Path, name: &str, size: usize) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, vec![b'x'; size]).unwrap();
    path
}
