use crate::config::{default_extensions, PlacementConfig, DEFAULT_LIST_FILE_NAME, DEFAULT_SOURCE_DIR};
use crate::domain::model::DocumentSettings;
use clap::Parser;
use std::path::PathBuf;

/// 預設清單位置：桌面上的 lista.txt
pub fn default_list_file() -> PathBuf {
    dirs::desktop_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_LIST_FILE_NAME)
}

#[derive(Debug, Clone, Parser)]
#[command(name = "linked-collage")]
#[command(about = "Place a list of image files as linked, scaled and centered layers")]
pub struct CliConfig {
    /// Folder holding the files named in the list
    #[arg(long, default_value = DEFAULT_SOURCE_DIR)]
    pub source_dir: PathBuf,

    /// Newline-delimited list of base names
    #[arg(long, default_value_os_t = default_list_file())]
    pub list_file: PathBuf,

    /// Extensions tried for each name, in priority order
    #[arg(long, value_delimiter = ',', default_values_t = default_extensions())]
    pub extensions: Vec<String>,

    /// Target size as a percentage of the chosen document side
    #[arg(long, default_value = "50")]
    pub scale_percent: f64,

    /// Document side the scale is based on: width or height
    #[arg(long, default_value = "height")]
    pub scale_axis: String,

    /// Keep placed layers where the host put them instead of centering
    #[arg(long)]
    pub no_center: bool,

    /// Canvas document file; opened when present, created otherwise
    #[arg(long, default_value = "colagem-vinculada.json")]
    pub document: PathBuf,

    /// Load settings from a TOML file instead of the flags above
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Resolve names and print the report without touching the document
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn to_placement_config(&self) -> PlacementConfig {
        PlacementConfig {
            source_dir: self.source_dir.clone(),
            list_file: self.list_file.clone(),
            extensions: self.extensions.clone(),
            scale_percent: self.scale_percent,
            scale_axis: self.scale_axis.clone(),
            align_to_center: !self.no_center,
            document: DocumentSettings::default(),
        }
    }
}
