//! 复制题目到剪贴板
//!
//! 终端环境下通过 OSC 52 转义序列写入系统剪贴板

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{option_letter, QuizQuestion};

/// "已复制" 提示的持续时间
pub const COPIED_INDICATOR_TTL: Duration = Duration::from_secs(2);

/// 生成复制用文本：题干 + 带字母的选项
pub fn clipboard_text(question: &QuizQuestion) -> String {
    let options = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| format!("{}. {}", option_letter(i), option))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n{}", question.text, options)
}

/// 按题目索引记录的短暂 "已复制" 状态
///
/// 同一时刻只有一道题处于已复制状态
#[derive(Debug, Clone, Default)]
pub struct CopyIndicator {
    copied: Option<(usize, Instant)>,
}

impl CopyIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, index: usize, now: Instant) {
        self.copied = Some((index, now));
    }

    pub fn is_copied(&self, index: usize, now: Instant) -> bool {
        match self.copied {
            Some((copied, at)) => {
                copied == index && now.saturating_duration_since(at) < COPIED_INDICATOR_TTL
            }
            None => false,
        }
    }

    pub fn active(&self, now: Instant) -> Option<usize> {
        self.copied
            .filter(|(_, at)| now.saturating_duration_since(*at) < COPIED_INDICATOR_TTL)
            .map(|(index, _)| index)
    }
}

/// 剪贴板写入目标
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "path")]
pub enum ClipboardTarget {
    /// 通过终端 OSC 52 写入系统剪贴板
    #[default]
    Terminal,
    /// 写入普通文件
    File(String),
}

/// 剪贴板
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    target: ClipboardTarget,
}

impl Clipboard {
    pub fn new(target: ClipboardTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &ClipboardTarget {
        &self.target
    }

    pub fn write_text(&self, text: &str) -> AppResult<()> {
        match &self.target {
            ClipboardTarget::Terminal => {
                let sequence = osc52_sequence(text);
                let mut stdout = std::io::stdout();
                stdout
                    .write_all(sequence.as_bytes())
                    .and_then(|_| stdout.flush())
                    .map_err(|e| AppError::file_write_failed("<stdout>", e))?;
                debug!("已通过 OSC 52 写入剪贴板 ({} 字节)", text.len());
            }
            ClipboardTarget::File(path) => {
                std::fs::write(path, text).map_err(|e| AppError::file_write_failed(path, e))?;
                debug!("已写入剪贴板文件: {}", path);
            }
        }
        Ok(())
    }
}

/// OSC 52 "设置剪贴板" 序列
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}
