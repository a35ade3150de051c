/// 测验后端 API 客户端
///
/// 封装上传文档、生成测验两个接口
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::{GenerateRequest, UploadedFile};

pub const UPLOAD_ENDPOINT: &str = "quiz/upload";
pub const GENERATE_ENDPOINT: &str = "generate";

/// 后端能力
///
/// 只发起一次请求，不重试
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// 上传文档，任何 2xx 即成功
    async fn upload(&self, file: &UploadedFile) -> AppResult<()>;

    /// 生成测验，返回原始 JSON
    async fn generate(&self, request: &GenerateRequest) -> AppResult<Value>;
}

/// 基于 reqwest 的 HTTP 客户端
#[derive(Debug, Clone)]
pub struct HttpQuizClient {
    http: reqwest::Client,
    upload_url: String,
    generate_url: String,
}

impl HttpQuizClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| AppError::Api(ApiError::ClientBuild(e)))?;

        Ok(Self {
            http,
            upload_url: config.endpoint(UPLOAD_ENDPOINT),
            generate_url: config.endpoint(GENERATE_ENDPOINT),
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    pub fn generate_url(&self) -> &str {
        &self.generate_url
    }

    fn check_status(endpoint: &str, response: &reqwest::Response) -> AppResult<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            warn!("⚠️ {} 返回状态 {}", endpoint, status);
            Err(AppError::Api(ApiError::BadStatus {
                endpoint: endpoint.to_string(),
                status,
            }))
        }
    }
}

#[async_trait]
impl QuizBackend for HttpQuizClient {
    async fn upload(&self, file: &UploadedFile) -> AppResult<()> {
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| AppError::file_read_failed(file.path.display().to_string(), e))?;

        let part = Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| AppError::api_request_failed(&self.upload_url, e))?;
        let form = Form::new().part("file", part);

        info!("📤 正在上传 {} ...", file);

        let response = self
            .http
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&self.upload_url, e))?;

        Self::check_status(&self.upload_url, &response)?;

        info!("✓ 上传成功: {}", file.name);
        Ok(())
    }

    async fn generate(&self, request: &GenerateRequest) -> AppResult<Value> {
        debug!("生成请求: {:?}", request);
        info!("🧠 正在生成 {} 道题 (难度 {}) ...", request.total_questions, request.level);

        let response = self
            .http
            .post(&self.generate_url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&self.generate_url, e))?;

        Self::check_status(&self.generate_url, &response)?;

        let body: Value = response.json().await.map_err(|source| {
            AppError::Api(ApiError::InvalidJson {
                endpoint: self.generate_url.clone(),
                source,
            })
        })?;

        debug!("生成接口返回: {}", body);
        Ok(body)
    }
}
