//! Payload summarization.
//!
//! Bodies are reduced to a bounded textual form before they enter an audit
//! record: binary blobs and file uploads are replaced by short notes, JSON
//! is re-serialized canonically, and anything unserializable becomes a
//! structured placeholder instead of an error. Summarization is a pure
//! function of (content type, bytes), so the same payload always yields
//! the same summary.

use serde_json::Value;

/// Placeholder stored when a JSON body cannot be parsed.
pub const JSON_PARSE_FAILURE: &str = r#"{"error":"JSON_PARSING_FAILED"}"#;

/// Summarize a request or response body for logging.
///
/// Returns `None` for an empty body.
pub fn summarize(content_type: Option<&str>, body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }

    let ct = content_type.unwrap_or("");

    if ct.starts_with("multipart/form-data") {
        let name = multipart_file_name(body).unwrap_or_else(|| "unknown".to_string());
        return Some(format!(
            "File upload (name: {}, size: {} bytes)",
            name,
            body.len()
        ));
    }

    if is_binary_content_type(ct) {
        return Some(binary_note(body.len()));
    }

    if ct.contains("json") {
        return Some(match serde_json::from_slice::<Value>(body) {
            Ok(value) => value.to_string(),
            Err(_) => JSON_PARSE_FAILURE.to_string(),
        });
    }

    match std::str::from_utf8(body) {
        Ok(text) => Some(text.to_string()),
        Err(_) => Some(binary_note(body.len())),
    }
}

fn binary_note(len: usize) -> String {
    format!("Image byte data (size: {} bytes)", len)
}

fn is_binary_content_type(ct: &str) -> bool {
    ct.starts_with("image/") || ct.starts_with("application/octet-stream")
}

/// Pull the original file name out of a multipart body's part headers.
///
/// Only the leading headers are scanned; file contents are never read
/// past the first kilobyte.
fn multipart_file_name(body: &[u8]) -> Option<String> {
    let head = String::from_utf8_lossy(&body[..body.len().min(1024)]).into_owned();
    let start = head.find("filename=\"")? + "filename=\"".len();
    let rest = &head[start..];
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}
