use crate::error::{AppError, AppResult, FileError, ValidationError};
use std::fmt;
use std::path::{Path, PathBuf};

/// 上传文件大小上限 (10 MiB，含边界)
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// 支持的文档类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [DocumentKind::Pdf, DocumentKind::Docx, DocumentKind::PlainText];

    pub fn mime_type(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentKind::PlainText => "text/plain",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.mime_type() == mime)
    }
}

/// 检查文件类型和大小
///
/// 先检查类型，再检查大小
pub fn validate_file(mime_type: &str, size: u64) -> Result<DocumentKind, ValidationError> {
    let kind = DocumentKind::from_mime(mime_type).ok_or_else(|| ValidationError::UnsupportedType {
        mime_type: mime_type.to_string(),
    })?;

    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge {
            size,
            max: MAX_UPLOAD_BYTES,
        });
    }

    Ok(kind)
}

/// 已通过校验、等待上传的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub path: PathBuf,
}

impl UploadedFile {
    /// 根据元信息构建，未通过校验时返回错误
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        size: u64,
        mime_type: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let mime_type = mime_type.into();
        validate_file(&mime_type, size)?;
        Ok(Self {
            name: name.into(),
            size,
            mime_type,
            path: path.into(),
        })
    }

    /// 从本地路径读取元信息并校验
    ///
    /// MIME 类型按扩展名推断
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::File(FileError::NotFound {
                    path: path.display().to_string(),
                })
            } else {
                AppError::file_read_failed(path.display().to_string(), e)
            }
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let mime_type = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        Ok(Self::new(path, name, metadata.len(), mime_type)?)
    }

    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_mime(&self.mime_type)
    }
}

impl fmt::Display for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, format_file_size(self.size))
    }
}

/// 文件大小的可读格式
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
