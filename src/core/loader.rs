use crate::core::{NameEntry, Storage};
use crate::utils::error::{CollageError, Result};
use std::path::Path;

/// 空白字元，另含 BOM (U+FEFF)：記事本存檔的 UTF-8 清單常以 BOM 開頭
fn is_list_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// 把清單內容拆成名稱：每行移除所有空白字元（包含中間的空白），丟棄空行，保持原順序。
pub fn parse_names(content: &str) -> Vec<NameEntry> {
    content
        .split('\n')
        .filter_map(|line| {
            let cleaned: String = line.chars().filter(|c| !is_list_whitespace(*c)).collect();
            NameEntry::new(cleaned)
        })
        .collect()
}

pub async fn load_names<S: Storage>(storage: &S, list_file: &Path) -> Result<Vec<NameEntry>> {
    let raw = storage.read_file(list_file).await?;
    let content = String::from_utf8_lossy(&raw);
    let names = parse_names(&content);

    if names.is_empty() {
        return Err(CollageError::EmptyList {
            path: list_file.to_path_buf(),
        });
    }

    tracing::debug!("Loaded {} names from {}", names.len(), list_file.display());
    Ok(names)
}
