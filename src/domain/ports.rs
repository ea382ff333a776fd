use crate::domain::model::{Anchor, Bounds, DocumentSettings, ObjectHandle};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn file_exists(&self, path: &Path) -> impl std::future::Future<Output = bool> + Send;
    fn dir_exists(&self, path: &Path) -> impl std::future::Future<Output = bool> + Send;
    /// 目錄中的檔名（不含路徑）
    fn list_dir(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_dir(&self) -> &Path;
    fn list_file(&self) -> &Path;
    fn extensions(&self) -> &[String];
    fn scale_percent(&self) -> f64;
    fn scale_axis(&self) -> &str;
    fn align_to_center(&self) -> bool;

    fn document_settings(&self) -> DocumentSettings {
        DocumentSettings::default()
    }
}

/// 宿主應用程式：管理開啟中的文件
pub trait Host: Send {
    type Doc: Document;

    fn document_count(&self) -> usize;
    fn active_document(&mut self) -> Option<&mut Self::Doc>;
    fn add_document(&mut self, settings: &DocumentSettings) -> Result<&mut Self::Doc>;
}

#[async_trait]
pub trait Document: Send {
    fn name(&self) -> &str;
    fn width_px(&self) -> f64;
    fn height_px(&self) -> f64;

    /// 以連結方式置入檔案，置入後的物件成為作用中物件
    async fn place_linked(&mut self, path: &Path) -> Result<ObjectHandle>;

    fn bounds(&self, object: ObjectHandle) -> Result<Bounds>;
    fn resize(
        &mut self,
        object: ObjectHandle,
        scale_x_percent: f64,
        scale_y_percent: f64,
        anchor: Anchor,
    ) -> Result<()>;
    fn translate(&mut self, object: ObjectHandle, dx: f64, dy: f64) -> Result<()>;
}
