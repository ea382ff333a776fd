use crate::core::{NameEntry, ResolvedFile, Storage};
use crate::utils::error::{CollageError, Result};
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;

/// 依副檔名優先順序，在來源資料夾中找出 `<名稱>.<副檔名>`
pub struct FileResolver<'a, S: Storage> {
    storage: &'a S,
    source_dir: PathBuf,
    extensions: Vec<String>,
    /// 資料夾檔名清單，第一次需要比對大小寫時才讀取，之後整批共用
    listing: OnceCell<Vec<String>>,
}

impl<'a, S: Storage> FileResolver<'a, S> {
    pub fn new(storage: &'a S, source_dir: &Path, extensions: &[String]) -> Self {
        Self {
            storage,
            source_dir: source_dir.to_path_buf(),
            extensions: extensions.to_vec(),
            listing: OnceCell::new(),
        }
    }

    async fn listing(&self) -> Result<&[String]> {
        let entries = self
            .listing
            .get_or_try_init(|| async move {
                let entries = self.storage.list_dir(&self.source_dir).await?;
                tracing::debug!(
                    "Listed {} files in {}",
                    entries.len(),
                    self.source_dir.display()
                );
                Ok::<_, CollageError>(entries)
            })
            .await?;
        Ok(entries)
    }

    /// 找不到時回傳 `None`，這是正常結果而非錯誤。
    ///
    /// 每個副檔名先試完全相同的檔名，再比對大小寫不同的副檔名
    /// （多個候選時取檔名字典序最小者）。名稱本身需完全相符。
    /// 大小寫比對用的檔名清單在同一個 resolver 內只讀一次。
    pub async fn resolve(&self, name: &NameEntry) -> Result<Option<ResolvedFile>> {
        for ext in &self.extensions {
            let candidate = self.source_dir.join(format!("{}.{}", name, ext));
            if self.storage.file_exists(&candidate).await {
                return Ok(Some(ResolvedFile {
                    name: name.clone(),
                    path: candidate,
                }));
            }

            let case_variant = self
                .listing()
                .await?
                .iter()
                .filter(|entry| matches_case_insensitive(entry, name.as_str(), ext))
                .min();
            if let Some(file_name) = case_variant {
                return Ok(Some(ResolvedFile {
                    name: name.clone(),
                    path: self.source_dir.join(file_name),
                }));
            }
        }

        Ok(None)
    }
}

fn matches_case_insensitive(file_name: &str, base: &str, ext: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((stem, file_ext)) => stem == base && file_ext.eq_ignore_ascii_case(ext),
        None => false,
    }
}
