use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollageError {
    #[error("Source directory not found: {}", path.display())]
    MissingDirectory { path: PathBuf },

    #[error("List file not found: {}", path.display())]
    MissingListFile { path: PathBuf },

    #[error("Invalid scale axis '{value}', expected 'width' or 'height'")]
    InvalidScaleAxis { value: String },

    #[error("List file is empty or has no usable names: {}", path.display())]
    EmptyList { path: PathBuf },

    #[error("Invalid bounds for '{name}': {reason}")]
    InvalidBounds { name: String, reason: String },

    #[error("Host error: {message}")]
    HostError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Placement,
    Host,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CollageError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CollageError::MissingDirectory { .. }
            | CollageError::MissingListFile { .. }
            | CollageError::InvalidScaleAxis { .. }
            | CollageError::ConfigValidationError { .. }
            | CollageError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            CollageError::EmptyList { .. } => ErrorCategory::Input,
            CollageError::InvalidBounds { .. } => ErrorCategory::Placement,
            CollageError::HostError { .. } => ErrorCategory::Host,
            CollageError::IoError(_) | CollageError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單一項目的失敗，不影響整批
            CollageError::InvalidBounds { .. } => ErrorSeverity::Low,
            CollageError::EmptyList { .. } => ErrorSeverity::Medium,
            CollageError::MissingDirectory { .. }
            | CollageError::MissingListFile { .. }
            | CollageError::InvalidScaleAxis { .. }
            | CollageError::ConfigValidationError { .. }
            | CollageError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            CollageError::HostError { .. }
            | CollageError::IoError(_)
            | CollageError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// 給使用者看的警示訊息（葡萄牙文）
    pub fn user_friendly_message(&self) -> String {
        match self {
            CollageError::MissingDirectory { path } => {
                format!("A pasta {} não foi encontrada.", path.display())
            }
            CollageError::MissingListFile { path } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                if is_on_desktop(path) {
                    format!("O arquivo {} não foi encontrado no Desktop.", name)
                } else {
                    format!("O arquivo {} não foi encontrado.", name)
                }
            }
            CollageError::InvalidScaleAxis { .. } => {
                "Tipo de escalonamento inválido. Use \"width\" ou \"height\".".to_string()
            }
            CollageError::EmptyList { path } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                format!("O arquivo {} está vazio ou inválido.", name)
            }
            other => format!("Ocorreu um erro: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CollageError::MissingDirectory { .. } => {
                "Check --source-dir (or [source].directory) points to an existing folder".to_string()
            }
            CollageError::MissingListFile { .. } => {
                "Create the list file or pass its location with --list-file".to_string()
            }
            CollageError::InvalidScaleAxis { .. } => {
                "Use --scale-axis width or --scale-axis height".to_string()
            }
            CollageError::EmptyList { .. } => {
                "Add one base name per line to the list file".to_string()
            }
            CollageError::InvalidBounds { .. } => {
                "Check the linked file is a valid image with non-zero dimensions".to_string()
            }
            CollageError::HostError { .. } => {
                "Check the document file is writable and not corrupted".to_string()
            }
            CollageError::IoError(_) => "Check file permissions and available disk space".to_string(),
            CollageError::SerializationError(_) => {
                "The document file is not valid JSON; remove it to start a new document".to_string()
            }
            CollageError::ConfigValidationError { .. }
            | CollageError::InvalidConfigValueError { .. } => {
                "Review the configuration values and try again".to_string()
            }
        }
    }

    pub fn host(message: impl Into<String>) -> Self {
        CollageError::HostError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CollageError>;

/// 檔案是否直接位於名為 Desktop 的資料夾（不分大小寫）
fn is_on_desktop(path: &Path) -> bool {
    path.parent()
        .and_then(|parent| parent.file_name())
        .map(|dir| dir.to_string_lossy().eq_ignore_ascii_case("desktop"))
        .unwrap_or(false)
}
