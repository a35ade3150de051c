use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 本地校验错误（文件类型/大小、题量范围）
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 响应结构错误
    #[error("响应错误: {0}")]
    Response(#[from] ResponseError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 流程错误（操作顺序不满足）
    #[error("流程错误: {0}")]
    Flow(#[from] FlowError),
}

/// 本地校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 不支持的文件类型
    #[error("仅支持 PDF、DOCX 或 TXT 文件 (收到: {mime_type})")]
    UnsupportedType { mime_type: String },
    /// 文件过大
    #[error("文件不能超过 10MB (当前: {size} 字节)")]
    TooLarge { size: u64, max: u64 },
    /// 题量超出控件范围
    #[error("题量 {value} 超出范围 [0, {max}]")]
    CountOutOfRange { value: u32, max: u32 },
    /// 无法识别的难度
    #[error("无法识别的难度: {value}")]
    UnknownDifficulty { value: String },
}

impl ValidationError {
    /// 面向用户的简短提示
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::UnsupportedType { .. } => "仅支持 PDF、DOCX 或 TXT 文件",
            ValidationError::TooLarge { .. } => "文件不能超过 10MB",
            ValidationError::CountOutOfRange { .. } => "题量超出允许范围",
            ValidationError::UnknownDifficulty { .. } => "难度只能是 EASY、MEDIUM 或 HARD",
        }
    }
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 非 2xx 响应
    #[error("API返回错误状态 ({endpoint}): {status}")]
    BadStatus {
        endpoint: String,
        status: reqwest::StatusCode,
    },
    /// 响应体不是合法 JSON
    #[error("JSON解析失败 ({endpoint}): {source}")]
    InvalidJson {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 构建客户端失败
    #[error("HTTP客户端初始化失败: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// 响应结构错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    /// 既不是数组，也没有 questions / data 字段
    #[error("无法识别的响应结构 (期望数组、.questions 或 .data)")]
    UnrecognizedShape,
    /// 某道题的结构不合法
    #[error("第 {index} 道题结构不合法: {reason}")]
    InvalidQuestion { index: usize, reason: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 流程错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// 尚未选择文件
    #[error("尚未选择文件")]
    NoFileSelected,
    /// 文件尚未上传
    #[error("文件尚未上传")]
    NotUploaded,
    /// 题目总数为 0
    #[error("题目总数为 0")]
    NothingToGenerate,
    /// 题目索引越界
    #[error("题目索引 {index} 超出范围 (共 {len} 道)")]
    QuestionIndexOutOfRange { index: usize, len: usize },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 面向用户的简短提示
    ///
    /// 后端不返回结构化错误码，网络/HTTP 错误统一归约为通用文案
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(e) => e.user_message().to_string(),
            AppError::Api(_) => "请求失败，请稍后重试".to_string(),
            AppError::Response(_) => "返回的数据格式无法识别".to_string(),
            AppError::Flow(FlowError::NotUploaded) => "请先上传文件".to_string(),
            AppError::Flow(e) => e.to_string(),
            AppError::Config(e) => e.to_string(),
            AppError::File(e) => e.to_string(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_localized() {
        let err = AppError::from(ValidationError::TooLarge {
            size: 12 * 1024 * 1024,
            max: 10 * 1024 * 1024,
        });
        assert_eq!(err.user_message(), "文件不能超过 10MB");

        let err = AppError::from(ValidationError::UnsupportedType {
            mime_type: "image/png".to_string(),
        });
        assert_eq!(err.user_message(), "仅支持 PDF、DOCX 或 TXT 文件");
    }

    #[test]
    fn not_uploaded_asks_for_upload_first() {
        let err = AppError::from(FlowError::NotUploaded);
        assert_eq!(err.user_message(), "请先上传文件");
    }
}
