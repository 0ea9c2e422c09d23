/// Pick the mime type for an image data URI.
///
/// A declared `image/*` content type wins; otherwise the type is sniffed from
/// the leading bytes, falling back to `image/jpeg`.
pub fn image_mime(declared: Option<&str>, bytes: &[u8]) -> String {
    if let Some(declared) = declared {
        let essence = declared
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if essence.starts_with("image/") && essence.len() > "image/".len() {
            return essence;
        }
    }

    detect_image_mime(bytes).to_string()
}

pub fn detect_image_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, 0x50, 0x4E, 0x47, ..] => "image/png",
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => "image/webp",
        _ => {
            tracing::debug!(
                "Unrecognized image format (first 4 bytes: {:02X?}), falling back to image/jpeg",
                &bytes[..bytes.len().min(4)]
            );
            "image/jpeg"
        }
    }
}
