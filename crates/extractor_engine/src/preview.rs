use base64::{engine::general_purpose::STANDARD, Engine};

/// Media type used when the selection did not declare one.
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Encodes a file as a `data:` URI that a renderer can display without
/// touching the filesystem again.
pub fn data_uri(media_type: &str, bytes: &[u8]) -> String {
    let media_type = match media_type.trim() {
        "" => FALLBACK_MEDIA_TYPE,
        declared => declared,
    };
    let encoded = STANDARD.encode(bytes);
    let mut uri = String::with_capacity("data:;base64,".len() + media_type.len() + encoded.len());
    uri.push_str("data:");
    uri.push_str(media_type);
    uri.push_str(";base64,");
    uri.push_str(&encoded);
    uri
}

/// Splits a `data:` URI produced by [`data_uri`] into media type and payload length.
pub fn describe_data_uri(uri: &str) -> Option<(&str, usize)> {
    let rest = uri.strip_prefix("data:")?;
    let (media_type, payload) = rest.split_once(";base64,")?;
    Some((media_type, payload.len()))
}
