#[cfg(feature = "cli")]
pub mod cli;
pub mod storage;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::{DocumentSettings, DEFAULT_EXTENSIONS};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::{Path, PathBuf};

pub const DEFAULT_SOURCE_DIR: &str = "D:/Links Produtos";
pub const DEFAULT_LIST_FILE_NAME: &str = "lista.txt";

pub fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

/// 一次執行所需的完整設定，執行期間不變
#[derive(Debug, Clone)]
pub struct PlacementConfig {
    pub source_dir: PathBuf,
    pub list_file: PathBuf,
    pub extensions: Vec<String>,
    pub scale_percent: f64,
    pub scale_axis: String,
    pub align_to_center: bool,
    pub document: DocumentSettings,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            list_file: PathBuf::from(DEFAULT_LIST_FILE_NAME),
            extensions: default_extensions(),
            scale_percent: 50.0,
            scale_axis: "height".to_string(),
            align_to_center: true,
            document: DocumentSettings::default(),
        }
    }
}

impl ConfigProvider for PlacementConfig {
    fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    fn list_file(&self) -> &Path {
        &self.list_file
    }

    fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn scale_percent(&self) -> f64 {
        self.scale_percent
    }

    fn scale_axis(&self) -> &str {
        &self.scale_axis
    }

    fn align_to_center(&self) -> bool {
        self.align_to_center
    }

    fn document_settings(&self) -> DocumentSettings {
        self.document.clone()
    }
}

impl Validate for PlacementConfig {
    fn validate(&self) -> Result<()> {
        validate_values(self)
    }
}

/// 只檢查設定值本身；檔案系統的檢查在 core::validator
pub(crate) fn validate_values<C: ConfigProvider>(config: &C) -> Result<()> {
    validation::validate_path("source_dir", config.source_dir())?;
    validation::validate_path("list_file", config.list_file())?;
    validation::validate_extensions("extensions", config.extensions())?;
    validation::validate_non_negative("scale_percent", config.scale_percent())?;

    let document = config.document_settings();
    validation::validate_range("document.width", document.width, 1, 300_000)?;
    validation::validate_range("document.height", document.height, 1, 300_000)?;
    validation::validate_range("document.resolution", document.resolution, 1, 10_000)?;
    validation::validate_non_empty_string("document.name", &document.name)?;

    Ok(())
}
