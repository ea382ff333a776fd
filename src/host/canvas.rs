use crate::core::{Document, Host};
use crate::domain::model::{Anchor, Bounds, DocumentSettings, ObjectHandle};
use crate::host::image_size;
use crate::utils::error::{CollageError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 連結圖層：只保存檔案路徑與邊框，不複製像素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedLayer {
    pub name: String,
    pub link: PathBuf,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasDocument {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub resolution: u32,
    pub created_at: DateTime<Utc>,
    pub layers: Vec<LinkedLayer>,
    pub active_layer: Option<usize>,
}

impl CanvasDocument {
    pub fn new(settings: &DocumentSettings) -> Self {
        Self {
            name: settings.name.clone(),
            width: settings.width,
            height: settings.height,
            resolution: settings.resolution,
            created_at: Utc::now(),
            layers: Vec::new(),
            active_layer: None,
        }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let data = tokio::fs::read(path).await?;
        let document = serde_json::from_slice(&data)?;
        Ok(document)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_vec_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn layer(&self, object: ObjectHandle) -> Result<&LinkedLayer> {
        self.layers
            .get(object.0)
            .ok_or_else(|| CollageError::host(format!("no layer with handle {}", object.0)))
    }

    fn layer_mut(&mut self, object: ObjectHandle) -> Result<&mut LinkedLayer> {
        self.layers
            .get_mut(object.0)
            .ok_or_else(|| CollageError::host(format!("no layer with handle {}", object.0)))
    }

    /// 只寫入有限的邊框；NaN 或無限大無法存成 JSON，圖層維持原狀
    fn set_bounds(&mut self, object: ObjectHandle, bounds: Bounds) -> Result<()> {
        let layer = self.layer_mut(object)?;
        if !bounds.is_finite() {
            return Err(CollageError::InvalidBounds {
                name: layer.name.clone(),
                reason: format!("transformed bounds are not finite ({:?})", bounds),
            });
        }
        layer.bounds = bounds;
        Ok(())
    }
}

#[async_trait]
impl Document for CanvasDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn width_px(&self) -> f64 {
        self.width as f64
    }

    fn height_px(&self) -> f64 {
        self.height as f64
    }

    async fn place_linked(&mut self, path: &Path) -> Result<ObjectHandle> {
        let data = tokio::fs::read(path).await?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        // 讀不出尺寸時，比照置入時填滿畫布
        let (width, height) = image_size::natural_size(&data, extension, self.resolution as f64)
            .unwrap_or_else(|| {
                tracing::debug!(
                    "Unknown size for {}, placing at canvas size",
                    path.display()
                );
                (self.width_px(), self.height_px())
            });

        let left = (self.width_px() - width) / 2.0;
        let top = (self.height_px() - height) / 2.0;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.layers.push(LinkedLayer {
            name,
            link: path.to_path_buf(),
            bounds: Bounds::from_size(left, top, width, height),
        });
        let index = self.layers.len() - 1;
        self.active_layer = Some(index);
        Ok(ObjectHandle(index))
    }

    fn bounds(&self, object: ObjectHandle) -> Result<Bounds> {
        Ok(self.layer(object)?.bounds)
    }

    fn resize(
        &mut self,
        object: ObjectHandle,
        scale_x_percent: f64,
        scale_y_percent: f64,
        anchor: Anchor,
    ) -> Result<()> {
        let bounds = self.bounds(object)?;
        let width = bounds.width() * scale_x_percent / 100.0;
        let height = bounds.height() * scale_y_percent / 100.0;

        let resized = match anchor {
            Anchor::TopLeft => Bounds::from_size(bounds.left, bounds.top, width, height),
            Anchor::MiddleCenter => {
                let (cx, cy) = bounds.center();
                Bounds::from_size(cx - width / 2.0, cy - height / 2.0, width, height)
            }
        };
        self.set_bounds(object, resized)
    }

    fn translate(&mut self, object: ObjectHandle, dx: f64, dy: f64) -> Result<()> {
        let b = self.bounds(object)?;
        self.set_bounds(
            object,
            Bounds::new(b.left + dx, b.top + dy, b.right + dx, b.bottom + dy),
        )
    }
}

/// 記憶體中的宿主：一組開啟中的文件與作用中文件
#[derive(Debug, Default)]
pub struct CanvasHost {
    documents: Vec<CanvasDocument>,
    active: Option<usize>,
}

impl CanvasHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// 文件檔存在就開啟它作為作用中文件，否則不開啟任何文件
    pub async fn open(path: &Path) -> Result<Self> {
        let mut host = Self::new();
        if tokio::fs::try_exists(path).await? {
            let document = CanvasDocument::load(path).await?;
            tracing::info!(
                "📂 Opened document '{}' with {} layers",
                document.name,
                document.layers.len()
            );
            host.documents.push(document);
            host.active = Some(0);
        }
        Ok(host)
    }

    pub fn active(&self) -> Option<&CanvasDocument> {
        self.active.and_then(|index| self.documents.get(index))
    }

    pub async fn save_active(&self, path: &Path) -> Result<bool> {
        match self.active() {
            Some(document) => {
                document.save(path).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Host for CanvasHost {
    type Doc = CanvasDocument;

    fn document_count(&self) -> usize {
        self.documents.len()
    }

    fn active_document(&mut self) -> Option<&mut CanvasDocument> {
        let index = self.active?;
        self.documents.get_mut(index)
    }

    fn add_document(&mut self, settings: &DocumentSettings) -> Result<&mut CanvasDocument> {
        self.documents.push(CanvasDocument::new(settings));
        let index = self.documents.len() - 1;
        self.active = Some(index);
        Ok(&mut self.documents[index])
    }
}
