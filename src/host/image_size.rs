//! 由檔頭讀出圖片的原始像素尺寸，不解碼影像內容。

use regex::Regex;

/// 回傳 (寬, 高) 像素；無法判斷時為 `None`。
/// PDF 以點 (1/72 inch) 計算，依文件解析度換算成像素。
/// 兩邊都必須是有限的正數，否則一律視為無法判斷。
pub fn natural_size(data: &[u8], extension: &str, resolution: f64) -> Option<(f64, f64)> {
    let size = match extension.to_ascii_lowercase().as_str() {
        "png" => png_size(data),
        "jpg" | "jpeg" => jpeg_size(data),
        "psd" => psd_size(data),
        "tif" | "tiff" => tiff_size(data),
        "svg" => svg_size(data),
        "pdf" => pdf_size(data, resolution),
        _ => None,
    };
    size.filter(|(width, height)| is_usable_side(*width) && is_usable_side(*height))
}

fn is_usable_side(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn be_u16(data: &[u8], at: usize) -> Option<u16> {
    let bytes = data.get(at..at + 2)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

fn be_u32(data: &[u8], at: usize) -> Option<u32> {
    let bytes = data.get(at..at + 4)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn png_size(data: &[u8]) -> Option<(f64, f64)> {
    const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    if data.get(..8)? != &SIGNATURE[..] || data.get(12..16)? != &b"IHDR"[..] {
        return None;
    }
    Some((be_u32(data, 16)? as f64, be_u32(data, 20)? as f64))
}

fn jpeg_size(data: &[u8]) -> Option<(f64, f64)> {
    if data.get(..2)? != &[0xFFu8, 0xD8][..] {
        return None;
    }

    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            return None;
        }
        let marker = data[pos + 1];
        // 填充位元組
        if marker == 0xFF {
            pos += 1;
            continue;
        }
        let length = be_u16(data, pos + 2)? as usize;

        let is_sof = (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_sof {
            let height = be_u16(data, pos + 5)?;
            let width = be_u16(data, pos + 7)?;
            return Some((width as f64, height as f64));
        }
        pos += 2 + length;
    }
    None
}

fn psd_size(data: &[u8]) -> Option<(f64, f64)> {
    if data.get(..4)? != &b"8BPS"[..] {
        return None;
    }
    let height = be_u32(data, 14)?;
    let width = be_u32(data, 18)?;
    Some((width as f64, height as f64))
}

fn tiff_size(data: &[u8]) -> Option<(f64, f64)> {
    let little_endian = match data.get(..4)? {
        [b'I', b'I', 42, 0] => true,
        [b'M', b'M', 0, 42] => false,
        _ => return None,
    };

    let read_u16 = |at: usize| -> Option<u16> {
        let bytes = data.get(at..at + 2)?;
        let raw = [bytes[0], bytes[1]];
        Some(if little_endian {
            u16::from_le_bytes(raw)
        } else {
            u16::from_be_bytes(raw)
        })
    };
    let read_u32 = |at: usize| -> Option<u32> {
        let bytes = data.get(at..at + 4)?;
        let raw = [bytes[0], bytes[1], bytes[2], bytes[3]];
        Some(if little_endian {
            u32::from_le_bytes(raw)
        } else {
            u32::from_be_bytes(raw)
        })
    };

    let ifd = read_u32(4)? as usize;
    let count = read_u16(ifd)? as usize;
    let mut width = None;
    let mut height = None;

    for i in 0..count {
        let entry = ifd + 2 + i * 12;
        let tag = read_u16(entry)?;
        let field_type = read_u16(entry + 2)?;
        // SHORT 或 LONG
        let value = match field_type {
            3 => read_u16(entry + 8)? as u32,
            4 => read_u32(entry + 8)?,
            _ => continue,
        };
        match tag {
            256 => width = Some(value),
            257 => height = Some(value),
            _ => {}
        }
    }

    Some((width? as f64, height? as f64))
}

fn svg_size(data: &[u8]) -> Option<(f64, f64)> {
    let text = String::from_utf8_lossy(data.get(..data.len().min(8192))?);
    let tag = Regex::new(r"(?s)<svg\b[^>]*>").ok()?.find(&text)?.as_str().to_string();

    let attribute = |name: &str| -> Option<f64> {
        let re = Regex::new(&format!(r#"\s{}\s*=\s*["']\s*([0-9.]+)\s*(px)?\s*["']"#, name)).ok()?;
        re.captures(&tag)?.get(1)?.as_str().parse().ok()
    };

    if let (Some(width), Some(height)) = (attribute("width"), attribute("height")) {
        return Some((width, height));
    }

    let view_box = Regex::new(r#"viewBox\s*=\s*["']\s*[-0-9.]+[\s,]+[-0-9.]+[\s,]+([0-9.]+)[\s,]+([0-9.]+)\s*["']"#)
        .ok()?
        .captures(&tag)?;
    Some((
        view_box.get(1)?.as_str().parse().ok()?,
        view_box.get(2)?.as_str().parse().ok()?,
    ))
}

fn pdf_size(data: &[u8], resolution: f64) -> Option<(f64, f64)> {
    if data.get(..5)? != &b"%PDF-"[..] {
        return None;
    }
    let text = String::from_utf8_lossy(data);
    let re = Regex::new(
        r"/MediaBox\s*\[\s*(-?[0-9.]+)\s+(-?[0-9.]+)\s+(-?[0-9.]+)\s+(-?[0-9.]+)\s*\]",
    )
    .ok()?;
    let caps = re.captures(&text)?;

    let mut corners = [0.0f64; 4];
    for (i, corner) in corners.iter_mut().enumerate() {
        *corner = caps.get(i + 1)?.as_str().parse().ok()?;
    }
    Some((
        (corners[2] - corners[0]).abs() * resolution / 72.0,
        (corners[3] - corners[1]).abs() * resolution / 72.0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_size() {
        let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&640u32.to_be_bytes());
        data.extend_from_slice(&480u32.to_be_bytes());
        assert_eq!(natural_size(&data, "PNG", 300.0), Some((640.0, 480.0)));
        assert_eq!(natural_size(&data[..10], "png", 300.0), None);
    }

    #[test]
    fn test_jpeg_size_skips_segments() {
        let mut data = vec![0xFF, 0xD8];
        // APP0 長度 4（含長度欄位本身）
        data.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x04, 0x00, 0x00]);
        // SOF0: 長度, 精度, 高, 寬
        data.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08]);
        data.extend_from_slice(&300u16.to_be_bytes());
        data.extend_from_slice(&200u16.to_be_bytes());
        assert_eq!(natural_size(&data, "jpg", 300.0), Some((200.0, 300.0)));
    }

    #[test]
    fn test_psd_size() {
        let mut data = b"8BPS".to_vec();
        data.extend_from_slice(&[0, 1, 0, 0, 0, 0, 0, 0, 0, 3]);
        data.extend_from_slice(&1024u32.to_be_bytes());
        data.extend_from_slice(&2048u32.to_be_bytes());
        assert_eq!(natural_size(&data, "psd", 300.0), Some((2048.0, 1024.0)));
    }

    #[test]
    fn test_tiff_size_little_endian() {
        let mut data = vec![b'I', b'I', 42, 0];
        data.extend_from_slice(&8u32.to_le_bytes());
        data.extend_from_slice(&2u16.to_le_bytes());
        // ImageWidth SHORT
        data.extend_from_slice(&256u16.to_le_bytes());
        data.extend_from_slice(&3u16.to_le_bytes());
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&[0x20, 0x03, 0, 0]);
        // ImageLength LONG
        data.extend_from_slice(&257u16.to_le_bytes());
        data.extend_from_slice(&4u16.to_le_bytes());
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&600u32.to_le_bytes());
        assert_eq!(natural_size(&data, "tiff", 300.0), Some((800.0, 600.0)));
    }

    #[test]
    fn test_svg_size_attributes_and_view_box() {
        let sized = br#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg" width="120px" height="80"></svg>"#;
        assert_eq!(natural_size(sized, "svg", 300.0), Some((120.0, 80.0)));

        let boxed = br#"<svg viewBox="0 0 64 32" xmlns="http://www.w3.org/2000/svg"/>"#;
        assert_eq!(natural_size(boxed, "svg", 300.0), Some((64.0, 32.0)));

        let relative = br#"<svg width="100%" height="100%"></svg>"#;
        assert_eq!(natural_size(relative, "svg", 300.0), None);
    }

    #[test]
    fn test_pdf_size_uses_resolution() {
        let data = b"%PDF-1.4\n1 0 obj << /Type /Page /MediaBox [0 0 144 72] >> endobj";
        assert_eq!(natural_size(data, "pdf", 300.0), Some((600.0, 300.0)));
    }

    #[test]
    fn test_overflowing_svg_size_is_unknown() {
        let huge = "9".repeat(400);
        let svg = format!(r#"<svg width="{}" height="100"></svg>"#, huge);
        assert_eq!(natural_size(svg.as_bytes(), "svg", 300.0), None);

        let view_box = format!(r#"<svg viewBox="0 0 {} 100"></svg>"#, huge);
        assert_eq!(natural_size(view_box.as_bytes(), "svg", 300.0), None);
    }

    #[test]
    fn test_zero_sized_header_is_unknown() {
        let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&500u32.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        assert_eq!(natural_size(&data, "png", 300.0), None);

        let flat = br#"<svg width="0" height="50"></svg>"#;
        assert_eq!(natural_size(flat, "svg", 300.0), None);
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(natural_size(b"GIF89a", "gif", 300.0), None);
    }
}
