use crate::domain::model::{Bounds, ScaleAxis};
use crate::utils::error::{CollageError, Result};

/// 等比縮放百分比：讓物件在選定的軸上佔文件的 `percent`%
pub fn scale_factor(
    axis: ScaleAxis,
    doc_width: f64,
    doc_height: f64,
    percent: f64,
    object: &Bounds,
    name: &str,
) -> Result<f64> {
    let (doc_side, object_side) = match axis {
        ScaleAxis::Width => (doc_width, object.width()),
        ScaleAxis::Height => (doc_height, object.height()),
    };

    if !object_side.is_finite() || object_side <= 0.0 {
        return Err(CollageError::InvalidBounds {
            name: name.to_string(),
            reason: format!("object {} is {} px", axis, object_side),
        });
    }

    let target = doc_side * (percent / 100.0);
    let factor = (target / object_side) * 100.0;

    // 0% 會把物件縮成一個點
    if !factor.is_finite() || factor <= 0.0 {
        return Err(CollageError::InvalidBounds {
            name: name.to_string(),
            reason: format!("scale factor must be finite and positive ({})", factor),
        });
    }

    Ok(factor)
}

/// 將物件左上角移到置中位置所需的位移
pub fn center_offset(doc_width: f64, doc_height: f64, object: &Bounds) -> (f64, f64) {
    let target_x = (doc_width - object.width()) / 2.0;
    let target_y = (doc_height - object.height()) / 2.0;
    (target_x - object.left, target_y - object.top)
}
