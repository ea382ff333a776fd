use crate::core::{ConfigProvider, Storage};
use crate::domain::model::ScaleAxis;
use crate::utils::error::{CollageError, Result};

/// 執行前檢查：來源資料夾、清單檔、縮放軸，依序檢查，第一個失敗即中止。
/// 成功時回傳解析後的縮放軸。
pub async fn validate_config<S: Storage, C: ConfigProvider>(
    storage: &S,
    config: &C,
) -> Result<ScaleAxis> {
    if !storage.dir_exists(config.source_dir()).await {
        return Err(CollageError::MissingDirectory {
            path: config.source_dir().to_path_buf(),
        });
    }

    if !storage.file_exists(config.list_file()).await {
        return Err(CollageError::MissingListFile {
            path: config.list_file().to_path_buf(),
        });
    }

    config.scale_axis().parse::<ScaleAxis>()
}
