//! Attachment encoding.
//!
//! Report evidence and announcement images are persisted inline as data
//! URIs. Every attached file must encode successfully before the record
//! is built; one failed read rejects the whole submission, so nothing is
//! partially persisted.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use futures::future::try_join_all;

use bayanihan_shared::constants::MAX_ATTACHMENT_SIZE;

/// Read one file and encode it as a `data:` URI.
pub async fn encode_attachment(path: &str) -> Result<String, String> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| format!("Failed to read attachment {path}: {e}"))?;

    if data.len() > MAX_ATTACHMENT_SIZE {
        return Err(format!(
            "Attachment too large: {} bytes (max {})",
            data.len(),
            MAX_ATTACHMENT_SIZE
        ));
    }

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Ok(format!("data:{};base64,{}", mime.essence_str(), BASE64.encode(&data)))
}

/// Encode every attachment, preserving order. Fails as a whole if any
/// single read or encode fails.
pub async fn encode_attachments(paths: &[String]) -> Result<Vec<String>, String> {
    try_join_all(paths.iter().map(|p| encode_attachment(p))).await
}
