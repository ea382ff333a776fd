use crate::config::{default_extensions, validate_values};
use crate::core::ConfigProvider;
use crate::domain::model::DocumentSettings;
use crate::utils::error::{CollageError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub list: ListConfig,
    #[serde(default)]
    pub placement: PlacementSection,
    pub document: Option<DocumentSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub directory: PathBuf,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    pub file: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacementSection {
    pub scale_percent: Option<f64>,
    pub scale_axis: Option<String>,
    pub align_to_center: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSection {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub resolution: Option<u32>,
    pub name: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CollageError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CollageError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${USERPROFILE})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CollageError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn source_dir(&self) -> &Path {
        &self.source.directory
    }

    fn list_file(&self) -> &Path {
        &self.list.file
    }

    fn extensions(&self) -> &[String] {
        &self.source.extensions
    }

    fn scale_percent(&self) -> f64 {
        self.placement.scale_percent.unwrap_or(50.0)
    }

    fn scale_axis(&self) -> &str {
        self.placement.scale_axis.as_deref().unwrap_or("height")
    }

    fn align_to_center(&self) -> bool {
        self.placement.align_to_center.unwrap_or(true)
    }

    fn document_settings(&self) -> DocumentSettings {
        let defaults = DocumentSettings::default();
        match &self.document {
            Some(section) => DocumentSettings {
                width: section.width.unwrap_or(defaults.width),
                height: section.height.unwrap_or(defaults.height),
                resolution: section.resolution.unwrap_or(defaults.resolution),
                name: section.name.clone().unwrap_or(defaults.name),
            },
            None => defaults,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_values(self)
    }
}
