use crate::error::{AppError, AppResult, ConfigError};
use crate::models::{CountControl, GenerationSettings};
use crate::services::ClipboardTarget;
use serde::Deserialize;
use std::path::Path;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "quizgen.toml";

/// 程序配置
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 后端 API 根地址
    pub api_base_url: String,
    /// 请求超时（秒），不设置则一直等待
    pub request_timeout_secs: Option<u64>,
    /// 题量输入控件
    pub count_control: CountControl,
    /// 默认生成参数
    pub default_settings: GenerationSettings,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 剪贴板写入目标
    pub clipboard: ClipboardTarget,
    /// 导出测验的文件
    pub output_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            request_timeout_secs: None,
            count_control: CountControl::NumericInput,
            default_settings: GenerationSettings::default(),
            verbose_logging: false,
            clipboard: ClipboardTarget::Terminal,
            output_file: None,
        }
    }
}

impl Config {
    /// 用环境变量覆盖已有配置
    pub fn with_env(self) -> AppResult<Self> {
        Ok(Self {
            api_base_url: std::env::var("QUIZGEN_API_BASE_URL").unwrap_or(self.api_base_url),
            request_timeout_secs: match std::env::var("QUIZGEN_TIMEOUT_SECS") {
                Ok(v) => Some(parse_env("QUIZGEN_TIMEOUT_SECS", &v, "u64")?),
                Err(_) => self.request_timeout_secs,
            },
            verbose_logging: match std::env::var("QUIZGEN_VERBOSE") {
                Ok(v) => parse_env("QUIZGEN_VERBOSE", &v, "bool")?,
                Err(_) => self.verbose_logging,
            },
            output_file: std::env::var("QUIZGEN_OUTPUT_FILE").ok().or(self.output_file),
            ..self
        })
    }

    /// 默认值 + 环境变量
    pub fn from_env() -> AppResult<Self> {
        Self::default().with_env()
    }

    /// 从 TOML 文件加载，缺失的字段使用默认值
    ///
    /// 默认题量必须在 `count_control` 的范围内
    pub fn from_toml_str(content: &str, path: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(content).map_err(|source| {
            AppError::Config(ConfigError::TomlParseFailed {
                path: path.to_string(),
                source,
            })
        })?;
        config.default_settings.validate(config.count_control)?;
        Ok(config)
    }

    pub async fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// 加载顺序：默认值 → 配置文件（存在时） → 环境变量
    pub async fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let base = if tokio::fs::try_exists(path).await.unwrap_or(false) {
            tracing::debug!("加载配置文件: {}", path.display());
            Self::from_toml_file(path).await?
        } else {
            Self::default()
        };
        base.with_env()
    }

    /// 拼接接口地址
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_env<T: std::str::FromStr>(var_name: &str, value: &str, expected_type: &str) -> AppResult<T> {
    value.parse().map_err(|_| {
        AppError::Config(ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: expected_type.to_string(),
        })
    })
}
