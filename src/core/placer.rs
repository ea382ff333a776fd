use crate::core::resolver::FileResolver;
use crate::core::transform::{center_offset, scale_factor};
use crate::core::{Document, NameEntry, PlacementResult, ResolvedFile, Storage};
use crate::domain::model::{Anchor, Bounds, ObjectHandle, ScaleAxis};
use crate::utils::error::{CollageError, Result};

pub struct Placer<'a, S: Storage> {
    resolver: FileResolver<'a, S>,
    axis: ScaleAxis,
    scale_percent: f64,
    align_to_center: bool,
}

impl<'a, S: Storage> Placer<'a, S> {
    pub fn new(
        resolver: FileResolver<'a, S>,
        axis: ScaleAxis,
        scale_percent: f64,
        align_to_center: bool,
    ) -> Self {
        Self {
            resolver,
            axis,
            scale_percent,
            align_to_center,
        }
    }

    /// 依清單順序逐一處理，每個名稱恰好產生一個結果。
    ///
    /// 置入本身失敗會中止整批；縮放或置中失敗只記錄並繼續下一個。
    pub async fn place_all<D: Document>(
        &self,
        document: &mut D,
        names: &[NameEntry],
    ) -> Result<Vec<PlacementResult>> {
        let mut results = Vec::with_capacity(names.len());

        for name in names {
            let resolved = match self.resolver.resolve(name).await? {
                Some(resolved) => resolved,
                None => {
                    tracing::info!("🔍 No file found for '{}'", name);
                    results.push(PlacementResult::NotFound { name: name.clone() });
                    continue;
                }
            };

            results.push(self.place_one(document, resolved).await?);
        }

        Ok(results)
    }

    async fn place_one<D: Document>(
        &self,
        document: &mut D,
        resolved: ResolvedFile,
    ) -> Result<PlacementResult> {
        tracing::debug!("Placing {}", resolved.path.display());
        let object = document.place_linked(&resolved.path).await?;

        let final_bounds = match self.fit(document, object, resolved.name.as_str()) {
            Ok(bounds) => Some(bounds),
            Err(e) => {
                let file_name = resolved
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| resolved.name.to_string());
                tracing::warn!("⚠️ Failed to position {}: {}", file_name, e);
                document.bounds(object).ok().filter(Bounds::is_finite)
            }
        };

        Ok(PlacementResult::Placed {
            name: resolved.name,
            path: resolved.path,
            object,
            final_bounds,
        })
    }

    /// 以中心為錨點等比縮放，必要時再平移置中，回傳最後的邊框
    fn fit<D: Document>(&self, document: &mut D, object: ObjectHandle, name: &str) -> Result<Bounds> {
        let doc_width = document.width_px();
        let doc_height = document.height_px();

        let bounds = ensure_finite(document.bounds(object)?, name)?;
        let factor = scale_factor(
            self.axis,
            doc_width,
            doc_height,
            self.scale_percent,
            &bounds,
            name,
        )?;
        document.resize(object, factor, factor, Anchor::MiddleCenter)?;

        if self.align_to_center {
            let scaled = document.bounds(object)?;
            let (dx, dy) = center_offset(doc_width, doc_height, &scaled);
            document.translate(object, dx, dy)?;
        }

        ensure_finite(document.bounds(object)?, name)
    }
}

fn ensure_finite(bounds: Bounds, name: &str) -> Result<Bounds> {
    if bounds.is_finite() {
        Ok(bounds)
    } else {
        Err(CollageError::InvalidBounds {
            name: name.to_string(),
            reason: format!("bounds are not finite ({:?})", bounds),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_extensions;
    use crate::config::storage::LocalStorage;
    use crate::host::canvas::CanvasDocument;
    use crate::domain::model::DocumentSettings;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::path::Path;
    use tempfile::TempDir;

    /// 依檔名給定初始邊框、變形時不檢查數值的文件
    struct FixedDocument {
        sizes: HashMap<String, Bounds>,
        layers: Vec<Bounds>,
        resizes: usize,
    }

    impl FixedDocument {
        fn new(sizes: &[(&str, Bounds)]) -> Self {
            Self {
                sizes: sizes.iter().map(|(n, b)| (n.to_string(), *b)).collect(),
                layers: Vec::new(),
                resizes: 0,
            }
        }
    }

    #[async_trait]
    impl Document for FixedDocument {
        fn name(&self) -> &str {
            "fixed"
        }

        fn width_px(&self) -> f64 {
            3000.0
        }

        fn height_px(&self) -> f64 {
            2000.0
        }

        async fn place_linked(&mut self, path: &Path) -> Result<ObjectHandle> {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let bounds = self
                .sizes
                .get(&stem)
                .copied()
                .unwrap_or_else(|| Bounds::from_size(0.0, 0.0, 100.0, 100.0));
            self.layers.push(bounds);
            Ok(ObjectHandle(self.layers.len() - 1))
        }

        fn bounds(&self, object: ObjectHandle) -> Result<Bounds> {
            self.layers
                .get(object.0)
                .copied()
                .ok_or_else(|| CollageError::host("no such layer"))
        }

        fn resize(&mut self, object: ObjectHandle, sx: f64, sy: f64, _anchor: Anchor) -> Result<()> {
            self.resizes += 1;
            let b = self.bounds(object)?;
            let (cx, cy) = b.center();
            let width = b.width() * sx / 100.0;
            let height = b.height() * sy / 100.0;
            self.layers[object.0] =
                Bounds::from_size(cx - width / 2.0, cy - height / 2.0, width, height);
            Ok(())
        }

        fn translate(&mut self, object: ObjectHandle, dx: f64, dy: f64) -> Result<()> {
            let b = self.bounds(object)?;
            self.layers[object.0] = Bounds::new(b.left + dx, b.top + dy, b.right + dx, b.bottom + dy);
            Ok(())
        }
    }

    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&[8, 6, 0, 0, 0]);
        data
    }

    fn names(values: &[&str]) -> Vec<NameEntry> {
        values.iter().map(|v| NameEntry::new(*v).unwrap()).collect()
    }

    #[tokio::test]
    async fn test_place_scale_and_center() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("sku1.png"), png_header(300, 400)).unwrap();

        let storage = LocalStorage::new();
        let extensions = default_extensions();
        let resolver = FileResolver::new(&storage, temp_dir.path(), &extensions);
        let placer = Placer::new(resolver, ScaleAxis::Height, 50.0, true);
        let mut document = CanvasDocument::new(&DocumentSettings::default());

        let results = placer
            .place_all(&mut document, &names(&["sku1", "sku2"]))
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        match &results[0] {
            PlacementResult::Placed { final_bounds, .. } => {
                let bounds = final_bounds.unwrap();
                assert!((bounds.height() - 1000.0).abs() < 1e-6);
                assert!((bounds.width() - 750.0).abs() < 1e-6);
                assert!((bounds.left - 1125.0).abs() < 1e-6);
                assert!((bounds.top - 500.0).abs() < 1e-6);
            }
            other => panic!("expected placed result, got {:?}", other),
        }
        assert_eq!(
            results[1],
            PlacementResult::NotFound {
                name: NameEntry::new("sku2").unwrap()
            }
        );
        assert_eq!(document.layers.len(), 1);
    }

    #[tokio::test]
    async fn test_transform_failure_keeps_going() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("flat.png"), b"").unwrap();
        std::fs::write(temp_dir.path().join("ok.png"), b"").unwrap();

        let storage = LocalStorage::new();
        let extensions = default_extensions();
        let resolver = FileResolver::new(&storage, temp_dir.path(), &extensions);
        let placer = Placer::new(resolver, ScaleAxis::Height, 50.0, true);
        // 高度為 0 的物件：縮放會失敗，但仍算已置入
        let mut document = FixedDocument::new(&[("flat", Bounds::new(0.0, 100.0, 500.0, 100.0))]);

        let results = placer
            .place_all(&mut document, &names(&["flat", "ok"]))
            .await
            .unwrap();

        assert!(results.iter().all(PlacementResult::is_placed));
        match &results[0] {
            PlacementResult::Placed { final_bounds, .. } => {
                assert_eq!(*final_bounds, Some(Bounds::new(0.0, 100.0, 500.0, 100.0)));
            }
            other => panic!("expected placed result, got {:?}", other),
        }
        match &results[1] {
            PlacementResult::Placed { final_bounds, .. } => {
                let bounds = final_bounds.unwrap();
                assert!((bounds.height() - 1000.0).abs() < 1e-6);
            }
            other => panic!("expected placed result, got {:?}", other),
        }
        assert_eq!(document.layers.len(), 2);
    }

    #[tokio::test]
    async fn test_non_finite_bounds_rejected_before_resize() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("wild.png"), b"").unwrap();

        let storage = LocalStorage::new();
        let extensions = default_extensions();
        let resolver = FileResolver::new(&storage, temp_dir.path(), &extensions);
        let placer = Placer::new(resolver, ScaleAxis::Height, 50.0, true);
        // 高度正常但左右為無限大
        let wild = Bounds::new(f64::NEG_INFINITY, 0.0, f64::INFINITY, 100.0);
        let mut document = FixedDocument::new(&[("wild", wild)]);

        let results = placer
            .place_all(&mut document, &names(&["wild"]))
            .await
            .unwrap();

        assert_eq!(document.resizes, 0);
        match &results[0] {
            PlacementResult::Placed { final_bounds, .. } => assert_eq!(*final_bounds, None),
            other => panic!("expected placed result, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_overflowing_transform_reported_without_bounds() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("sliver.png"), b"").unwrap();
        std::fs::write(temp_dir.path().join("ok.png"), b"").unwrap();

        let storage = LocalStorage::new();
        let extensions = default_extensions();
        let resolver = FileResolver::new(&storage, temp_dir.path(), &extensions);
        let placer = Placer::new(resolver, ScaleAxis::Height, 50.0, true);
        // 極寬極扁：高度方向的倍率讓寬度溢位成無限大
        let sliver = Bounds::from_size(0.0, 0.0, 1e300, 1e-10);
        let mut document = FixedDocument::new(&[("sliver", sliver)]);

        let results = placer
            .place_all(&mut document, &names(&["sliver", "ok"]))
            .await
            .unwrap();

        assert_eq!(document.resizes, 2);
        match &results[0] {
            PlacementResult::Placed { final_bounds, .. } => assert_eq!(*final_bounds, None),
            other => panic!("expected placed result, got {:?}", other),
        }
        match &results[1] {
            PlacementResult::Placed { final_bounds, .. } => {
                assert!(final_bounds.unwrap().is_finite());
            }
            other => panic!("expected placed result, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_without_centering_scales_in_place() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("sku1.png"), png_header(200, 200)).unwrap();

        let storage = LocalStorage::new();
        let extensions = default_extensions();
        let resolver = FileResolver::new(&storage, temp_dir.path(), &extensions);
        let placer = Placer::new(resolver, ScaleAxis::Width, 10.0, false);
        let mut document = CanvasDocument::new(&DocumentSettings::default());

        let results = placer
            .place_all(&mut document, &names(&["sku1"]))
            .await
            .unwrap();

        match &results[0] {
            PlacementResult::Placed { final_bounds, .. } => {
                let bounds = final_bounds.unwrap();
                // 300 px 寬，中心維持在文件中心 (1500, 1000)
                assert!((bounds.width() - 300.0).abs() < 1e-6);
                let (cx, cy) = bounds.center();
                assert!((cx - 1500.0).abs() < 1e-6);
                assert!((cy - 1000.0).abs() < 1e-6);
            }
            other => panic!("expected placed result, got {:?}", other),
        }
    }
}
