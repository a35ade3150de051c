//! 页面编排 - 持有全部临时状态
//!
//! 隐式流程：
//! 无文件 → 已选择未上传 → 已上传 → 生成中 → 已有题目
//!
//! 所有状态转换都由用户操作和网络调用结果驱动，不自动重试，不取消进行中的请求

use std::fmt;
use std::path::Path;
use serde_json::Value;
use std::time::Instant;
use tracing::{info, warn};

use crate::clients::QuizBackend;
use crate::config::Config;
use crate::error::{AppError, AppResult, FlowError};
use crate::models::{CountKind, Difficulty, QuizQuestion, UploadedFile};
use crate::services::normalizer::normalize;
use crate::services::renderer::{render_empty, render_questions};
use crate::services::{clipboard_text, Clipboard, CopyIndicator};
use crate::utils::logging::export_header;
use crate::workflow::{SettingsPanel, UploadWidget};

/// 当前所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoFile,
    FileSelected,
    FileUploaded,
    Generating,
    QuestionsAvailable,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Phase::NoFile => "未选择文件",
            Phase::FileSelected => "已选择文件，尚未上传",
            Phase::FileUploaded => "文件已上传",
            Phase::Generating => "正在生成",
            Phase::QuestionsAvailable => "题目已生成",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// 短暂提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NotificationKind::Success => write!(f, "✅ {}", self.message),
            NotificationKind::Error => write!(f, "❌ {}", self.message),
        }
    }
}

/// 一次会话
pub struct Session<B: QuizBackend> {
    backend: B,
    upload: UploadWidget,
    settings: SettingsPanel,
    questions: Vec<QuizQuestion>,
    /// 最近一次成功生成的原始响应
    last_response: Option<Value>,
    is_generating: bool,
    notifications: Vec<Notification>,
    copy_indicator: CopyIndicator,
    clipboard: Clipboard,
}

impl<B: QuizBackend> Session<B> {
    pub fn new(backend: B, config: &Config) -> Self {
        Self {
            backend,
            upload: UploadWidget::new(),
            settings: SettingsPanel::new(config.default_settings, config.count_control),
            questions: Vec::new(),
            last_response: None,
            is_generating: false,
            notifications: Vec::new(),
            copy_indicator: CopyIndicator::new(),
            clipboard: Clipboard::new(config.clipboard.clone()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn upload_widget(&self) -> &UploadWidget {
        &self.upload
    }

    pub fn settings(&self) -> &SettingsPanel {
        &self.settings
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    pub fn phase(&self) -> Phase {
        if self.is_generating {
            Phase::Generating
        } else if self.upload.file().is_none() {
            Phase::NoFile
        } else if !self.upload.is_uploaded() {
            Phase::FileSelected
        } else if self.questions.is_empty() {
            Phase::FileUploaded
        } else {
            Phase::QuestionsAvailable
        }
    }

    /// 上传或生成请求进行中
    pub fn in_flight(&self) -> bool {
        self.is_generating || self.upload.is_uploading()
    }

    pub fn can_generate(&self) -> bool {
        self.upload.is_uploaded() && self.settings.can_generate(self.in_flight())
    }

    fn notify(&mut self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => info!("{}", notification),
            NotificationKind::Error => warn!("{}", notification),
        }
        self.notifications.push(notification);
    }

    fn notify_error(&mut self, err: &AppError) {
        self.notify(Notification::error(err.user_message()));
    }

    /// 取走所有待展示的提示
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // ========== 文件 ==========

    pub fn select(&mut self, candidate: AppResult<UploadedFile>) -> AppResult<()> {
        match self.upload.select(candidate) {
            Ok(_) => Ok(()),
            Err(e) => {
                self.notify_error(&e);
                Err(e)
            }
        }
    }

    pub async fn select_path(&mut self, path: &Path) -> AppResult<()> {
        let candidate = UploadedFile::from_path(path).await;
        self.select(candidate)
    }

    pub fn remove_file(&mut self) {
        self.upload.remove();
    }

    pub async fn upload(&mut self) -> AppResult<()> {
        if self.upload.file().is_none() {
            let err = AppError::Flow(FlowError::NoFileSelected);
            self.notify_error(&err);
            return Err(err);
        }

        match self.upload.upload(&self.backend).await {
            Ok(_) => {
                self.notify(Notification::success("文件已上传"));
                Ok(())
            }
            Err(e) => {
                let message = self
                    .upload
                    .error()
                    .map(str::to_string)
                    .unwrap_or_else(|| e.user_message());
                self.notify(Notification::error(message));
                Err(e)
            }
        }
    }

    // ========== 参数 ==========

    pub fn set_count(&mut self, kind: CountKind, value: u32) -> AppResult<()> {
        if let Err(e) = self.settings.set_count(kind, value) {
            let err = AppError::from(e);
            self.notify_error(&err);
            return Err(err);
        }
        Ok(())
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.set_difficulty(difficulty);
    }

    // ========== 生成 ==========

    /// 生成测验
    ///
    /// 成功时整体替换题目列表；失败时保留之前的题目
    pub async fn generate(&mut self) -> AppResult<usize> {
        if !self.upload.is_uploaded() {
            let err = AppError::Flow(FlowError::NotUploaded);
            self.notify_error(&err);
            return Err(err);
        }
        if self.settings.total() == 0 {
            let err = AppError::Flow(FlowError::NothingToGenerate);
            self.notify_error(&err);
            return Err(err);
        }

        let request = self.settings.payload();
        self.is_generating = true;
        let result = self.backend.generate(&request).await;
        self.is_generating = false;

        let questions = result.and_then(|body| {
            normalize(&body)
                .and_then(|n| n.require_recognized())
                .map(|questions| (questions, body))
                .map_err(AppError::from)
        });

        match questions {
            Ok((questions, body)) => {
                let count = questions.len();
                self.questions = questions;
                self.last_response = Some(body);
                self.copy_indicator = CopyIndicator::new();
                self.notify(Notification::success(format!("已生成 {} 道题", count)));
                Ok(count)
            }
            Err(e) => {
                let message = match &e {
                    AppError::Api(_) => "生成测验失败".to_string(),
                    other => other.user_message(),
                };
                self.notify(Notification::error(message));
                Err(e)
            }
        }
    }

    // ========== 结果 ==========

    pub fn copy(&mut self, index: usize, now: Instant) -> AppResult<()> {
        let Some(question) = self.questions.get(index) else {
            let err = AppError::Flow(FlowError::QuestionIndexOutOfRange {
                index: index + 1,
                len: self.questions.len(),
            });
            self.notify_error(&err);
            return Err(err);
        };

        let text = clipboard_text(question);
        if let Err(e) = self.clipboard.write_text(&text) {
            self.notify_error(&e);
            return Err(e);
        }

        self.copy_indicator.mark(index, now);
        self.notify(Notification::success(format!("已复制第 {} 题", index + 1)));
        Ok(())
    }

    pub fn copy_indicator(&self) -> &CopyIndicator {
        &self.copy_indicator
    }

    /// 还没生成过时提示先生成；生成结果为空时输出原始响应
    pub fn render(&self, now: Instant) -> String {
        match (&self.last_response, self.questions.is_empty()) {
            (_, false) => render_questions(&self.questions, &self.copy_indicator, now),
            (Some(raw), true) => render_empty(raw),
            (None, true) => "📭 还没有生成题目\n".to_string(),
        }
    }

    /// 导出当前题目到文件
    pub async fn export(&self, path: &Path) -> AppResult<()> {
        let content = format!(
            "{}{}",
            export_header(self.settings.settings()),
            render_questions(&self.questions, &CopyIndicator::new(), Instant::now())
        );
        tokio::fs::write(path, content)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;
        info!("💾 已导出至: {}", path.display());
        Ok(())
    }
}
