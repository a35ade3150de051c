//! 上传组件状态
//!
//! 选择文件 → 校验 → 上传，一次操作只发起一次请求

use std::path::Path;
use tracing::{info, warn};

use crate::clients::QuizBackend;
use crate::error::{AppError, AppResult};
use crate::models::UploadedFile;

/// 上传失败时展示的通用提示
pub const UPLOAD_FAILED_MESSAGE: &str = "上传失败";

/// 上传组件
#[derive(Debug, Clone, Default)]
pub struct UploadWidget {
    file: Option<UploadedFile>,
    is_uploading: bool,
    is_uploaded: bool,
    error: Option<String>,
}

impl UploadWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    pub fn is_uploaded(&self) -> bool {
        self.is_uploaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_upload(&self) -> bool {
        self.file.is_some() && !self.is_uploading && !self.is_uploaded
    }

    /// 处理一次文件选择
    ///
    /// 校验失败时只记录提示，已选中的文件保持不变
    pub fn select(&mut self, candidate: AppResult<UploadedFile>) -> AppResult<&UploadedFile> {
        match candidate {
            Ok(file) => {
                info!("📄 已选择文件: {}", file);
                self.error = None;
                self.is_uploaded = false;
                Ok(&*self.file.insert(file))
            }
            Err(e) => {
                warn!("⚠️ 文件未通过校验: {}", e);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// 从本地路径选择文件
    pub async fn select_path(&mut self, path: &Path) -> AppResult<&UploadedFile> {
        let candidate = UploadedFile::from_path(path).await;
        self.select(candidate)
    }

    /// 上传当前文件，没有文件时什么也不做
    ///
    /// 返回 `Ok(true)` 表示本次上传成功
    pub async fn upload<B: QuizBackend + ?Sized>(&mut self, backend: &B) -> AppResult<bool> {
        let Some(file) = self.file.as_ref() else {
            return Ok(false);
        };

        self.is_uploading = true;
        self.error = None;

        let result = backend.upload(file).await;
        self.is_uploading = false;

        match result {
            Ok(()) => {
                self.is_uploaded = true;
                Ok(true)
            }
            Err(e) => {
                warn!("⚠️ 上传失败: {}", e);
                self.error = Some(upload_error_message(&e));
                Err(e)
            }
        }
    }

    /// 移除文件并清空所有状态
    pub fn remove(&mut self) {
        *self = Self::default();
    }
}

fn upload_error_message(err: &AppError) -> String {
    match err {
        AppError::Api(_) => UPLOAD_FAILED_MESSAGE.to_string(),
        other => other.user_message(),
    }
}
