use crate::core::{Document, Host};
use crate::domain::model::DocumentSettings;
use crate::utils::error::{CollageError, Result};

/// 沒有開啟中的文件時建立新文件，否則沿用作用中的文件
pub fn provision_document<'h, H: Host>(
    host: &'h mut H,
    settings: &DocumentSettings,
) -> Result<&'h mut H::Doc> {
    if host.document_count() == 0 {
        tracing::info!(
            "📄 No open document, creating '{}' ({}x{} px @ {} dpi)",
            settings.name,
            settings.width,
            settings.height,
            settings.resolution
        );
        host.add_document(settings)?;
    }

    let document = host
        .active_document()
        .ok_or_else(|| CollageError::host("host reports open documents but none is active"))?;
    tracing::debug!(
        "Using document '{}' ({}x{} px)",
        document.name(),
        document.width_px(),
        document.height_px()
    );
    Ok(document)
}
