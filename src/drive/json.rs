use base64::{engine::general_purpose, Engine};
use serde::{de::DeserializeOwned, Serialize};

use std::path::Path;

use super::{error::*, r#trait::*};

/// Decodes a JSON file read from a drive. Absent and zero-length files decode to `None`.
pub fn decode_json<T: DeserializeOwned>(content: Option<Vec<u8>>) -> Result<Option<T>, DriveError> {
    match content {
        Some(bytes) if !bytes.is_empty() => Ok(Some(serde_json::from_slice(&bytes)?)),
        _ => Ok(None),
    }
}

pub fn encode_json<T: Serialize>(value: &T) -> Result<Vec<u8>, DriveError> {
    Ok(serde_json::to_vec(value)?)
}

/// Reads a file and renders it as a `data:` URL, e.g. for profile images.
pub async fn read_as_data_url(drive: &dyn Drive, path: &str) -> Result<Option<String>, DriveError> {
    let content = match drive.get(path).await? {
        Some(content) => content,
        None => return Ok(None),
    };
    let encoded = general_purpose::STANDARD.encode(content);
    Ok(Some(format!("data:{};base64,{}", mime_type(path), encoded)))
}

fn mime_type(path: &str) -> &'static str {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_json_treats_empty_as_absent() {
        let decoded: Option<Vec<u32>> = decode_json(Some(Vec::new())).unwrap();
        assert!(decoded.is_none());
        let decoded: Option<Vec<u32>> = decode_json(None).unwrap();
        assert!(decoded.is_none());
        let decoded: Option<Vec<u32>> = decode_json(Some(b"[1,2]".to_vec())).unwrap();
        assert_eq!(decoded, Some(vec![1, 2]));
    }

    #[test]
    fn decode_json_reports_garbage() {
        let res: Result<Option<Vec<u32>>, _> = decode_json(Some(b"{not json".to_vec()));
        assert!(matches!(res, Err(DriveError::Json(_))));
    }

    #[test]
    fn mime_from_extension() {
        assert_eq!(mime_type("/images/avatar.PNG"), "image/png");
        assert_eq!(mime_type("/profile.json"), "application/json");
        assert_eq!(mime_type("/blob"), "application/octet-stream");
    }
}
