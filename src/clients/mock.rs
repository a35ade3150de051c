//! 测试用的内存后端

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::clients::QuizBackend;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::{GenerateRequest, UploadedFile};

/// 记录调用并返回预设结果
#[derive(Debug, Default)]
pub struct MockBackend {
    pub upload_fails: bool,
    /// `None` 表示生成接口返回 500
    pub generate_response: Option<Value>,
    /// 按顺序消费的生成结果，用完后回到 `generate_response`
    pub scripted: Mutex<VecDeque<Option<Value>>>,
    pub uploads: Mutex<Vec<String>>,
    pub generates: Mutex<Vec<GenerateRequest>>,
}

impl MockBackend {
    pub fn ok(generate_response: Value) -> Self {
        Self {
            generate_response: Some(generate_response),
            ..Self::default()
        }
    }

    pub fn sequence(responses: Vec<Option<Value>>) -> Self {
        Self {
            scripted: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    pub fn failing_upload() -> Self {
        Self {
            upload_fails: true,
            ..Self::default()
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().map(|u| u.len()).unwrap_or_default()
    }

    pub fn generate_requests(&self) -> Vec<GenerateRequest> {
        self.generates.lock().map(|g| g.clone()).unwrap_or_default()
    }

    fn server_error(endpoint: &str) -> AppError {
        AppError::Api(ApiError::BadStatus {
            endpoint: endpoint.to_string(),
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        })
    }
}

#[async_trait]
impl QuizBackend for MockBackend {
    async fn upload(&self, file: &UploadedFile) -> AppResult<()> {
        if let Ok(mut uploads) = self.uploads.lock() {
            uploads.push(file.name.clone());
        }
        if self.upload_fails {
            Err(Self::server_error("quiz/upload"))
        } else {
            Ok(())
        }
    }

    async fn generate(&self, request: &GenerateRequest) -> AppResult<Value> {
        if let Ok(mut generates) = self.generates.lock() {
            generates.push(*request);
        }
        let scripted = self.scripted.lock().ok().and_then(|mut s| s.pop_front());
        scripted
            .unwrap_or_else(|| self.generate_response.clone())
            .ok_or_else(|| Self::server_error("generate"))
    }
}
