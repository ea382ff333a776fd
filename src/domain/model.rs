use crate::utils::error::CollageError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "tif", "tiff", "psd", "pdf", "svg"];

/// 縮放依據的文件邊
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleAxis {
    Width,
    Height,
}

impl FromStr for ScaleAxis {
    type Err = CollageError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "width" => Ok(ScaleAxis::Width),
            "height" => Ok(ScaleAxis::Height),
            other => Err(CollageError::InvalidScaleAxis {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ScaleAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleAxis::Width => write!(f, "width"),
            ScaleAxis::Height => write!(f, "height"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    TopLeft,
    MiddleCenter,
}

/// 四角框，單位為像素
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_size(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// 四個座標都是有限值（非 NaN、非無限大）
    pub fn is_finite(&self) -> bool {
        [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSettings {
    pub width: u32,
    pub height: u32,
    pub resolution: u32,
    pub name: String,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            width: 3000,
            height: 2000,
            resolution: 300,
            name: "Colagem vinculada".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameEntry(String);

impl NameEntry {
    /// 只接受已清理過、非空的名稱
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            None
        } else {
            Some(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NameEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub name: NameEntry,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectHandle(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub enum PlacementResult {
    Placed {
        name: NameEntry,
        path: PathBuf,
        object: ObjectHandle,
        /// transform 失敗且讀不回邊框時為 None
        final_bounds: Option<Bounds>,
    },
    NotFound {
        name: NameEntry,
    },
}

impl PlacementResult {
    pub fn name(&self) -> &NameEntry {
        match self {
            PlacementResult::Placed { name, .. } | PlacementResult::NotFound { name } => name,
        }
    }

    pub fn is_placed(&self) -> bool {
        matches!(self, PlacementResult::Placed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub total: usize,
    pub not_found: Vec<String>,
}

impl Report {
    pub fn from_results(results: &[PlacementResult]) -> Self {
        let not_found = results
            .iter()
            .filter(|r| !r.is_placed())
            .map(|r| r.name().to_string())
            .collect();
        Self {
            total: results.len(),
            not_found,
        }
    }

    pub fn found(&self) -> usize {
        self.total - self.not_found.len()
    }

    pub fn message(&self) -> String {
        crate::core::report::build_report(self.total, &self.not_found)
    }
}
