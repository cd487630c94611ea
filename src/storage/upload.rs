/**
 * Upload Pipeline
 *
 * Receives an incoming multipart file, validates it against the size bound
 * and extension allow-list, derives a collision-resistant storage key, and
 * delegates the payload to the object store. Deletion mirrors this: the
 * stored URL is parsed back into a key and a best-effort delete is issued.
 */
use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart};
use uuid::Uuid;

use crate::error::ApiError;
use crate::storage::ObjectStore;

/// Maximum accepted upload size (10 MB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Extension allow-list for every upload surface.
pub const ALLOWED_EXTENSIONS: [&str; 8] =
    ["jpeg", "jpg", "png", "gif", "pdf", "pptx", "docx", "doc"];

const INVALID_FILE_TYPE: &str =
    "Invalid file type. Only images, PDF, PPTX, and DOCX are allowed.";

/// Derived classification of an uploaded file, recorded on materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Pptx,
    Docx,
    Image,
    Other,
}

impl FileType {
    /// Classify a lowercased file extension.
    pub fn classify(extension: &str) -> FileType {
        match extension {
            "pdf" => FileType::Pdf,
            "pptx" => FileType::Pptx,
            "docx" | "doc" => FileType::Docx,
            "jpg" | "jpeg" | "png" | "gif" => FileType::Image,
            _ => FileType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Pptx => "pptx",
            FileType::Docx => "docx",
            FileType::Image => "image",
            FileType::Other => "other",
        }
    }
}

/// A file read out of a multipart request body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn size(&self) -> i64 {
        self.bytes.len() as i64
    }
}

/// Text fields plus at most one file, collected from a multipart body.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub file: Option<UploadedFile>,
}

impl MultipartForm {
    /// Fetch a trimmed text field, treating whitespace-only values as absent.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Body limit layer for upload routes.
pub fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024)
}

/// Lowercased extension of `filename`, if any.
pub fn file_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}

/// Validate an upload against the allow-list and size bound; returns the
/// lowercased extension.
pub fn validate_upload(filename: &str, size: usize) -> Result<String, ApiError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(ApiError::validation("File exceeds the 10MB size limit"));
    }
    let extension =
        file_extension(filename).ok_or_else(|| ApiError::validation(INVALID_FILE_TYPE))?;
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ApiError::validation(INVALID_FILE_TYPE));
    }
    Ok(extension)
}

/// Derive a collision-resistant storage key: `{namespace}/{uuid}.{ext}`.
pub fn object_key(namespace: &str, extension: &str) -> String {
    format!("{}/{}.{}", namespace, Uuid::new_v4(), extension)
}

/// Recover the storage key from a stored object URL (the path suffix after
/// `.com/`).
pub fn key_from_url(url: &str) -> Option<&str> {
    let (_, key) = url.split_once(".com/")?;
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

/// Read a multipart body into text fields and at most one file.
///
/// The field named `file_field` is treated as the file; every other field
/// is collected as text. Oversized files are rejected while reading.
pub async fn parse_multipart(
    mut multipart: Multipart,
    file_field: &str,
) -> Result<MultipartForm, ApiError> {
    let mut form = MultipartForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Multipart error: {e}")))?
    {
        let Some(name) = field.name().map(|n| n.to_string()) else {
            continue;
        };

        if name == file_field && field.file_name().is_some() {
            let filename = field
                .file_name()
                .map(|f| f.to_string())
                .unwrap_or_default();
            let content_type = mime_guess::from_path(&filename)
                .first()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::validation(format!("Failed to read file: {e}")))?;
            if bytes.len() > MAX_UPLOAD_BYTES {
                return Err(ApiError::validation("File exceeds the 10MB size limit"));
            }
            form.file = Some(UploadedFile {
                filename,
                content_type,
                bytes: bytes.to_vec(),
            });
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| ApiError::validation(format!("Failed to read field: {e}")))?;
            form.fields.insert(name, text);
        }
    }

    Ok(form)
}

/// Validate and store an uploaded file under `namespace`, returning the
/// stored object's URL. A storage failure aborts the owning create.
pub async fn store_upload(
    store: &Arc<dyn ObjectStore>,
    namespace: &str,
    file: &UploadedFile,
) -> Result<String, ApiError> {
    let extension = validate_upload(&file.filename, file.bytes.len())?;
    let key = object_key(namespace, &extension);

    store
        .put(&key, &file.bytes, &file.content_type)
        .await
        .map_err(|e| {
            tracing::error!("Upload to object storage failed: {}", e);
            ApiError::storage("Failed to upload file")
        })
}

/// Best-effort deletion of a stored object by its URL.
///
/// Failures are logged and swallowed: metadata deletion must not be blocked
/// by storage cleanup, and an orphaned object is an accepted outcome.
pub async fn delete_stored_file(store: &Arc<dyn ObjectStore>, url: &str) {
    let Some(key) = key_from_url(url) else {
        tracing::warn!("Could not derive storage key from URL: {}", url);
        return;
    };
    if let Err(e) = store.delete(key).await {
        tracing::warn!("Failed to delete stored object {}: {}", key, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::storage::MemoryStore;

    #[test]
    fn test_allow_list_accepts_known_extensions() {
        for name in [
            "notes.pdf",
            "slides.PPTX",
            "essay.docx",
            "legacy.doc",
            "photo.JPG",
            "photo.jpeg",
            "icon.png",
            "loop.gif",
        ] {
            assert!(validate_upload(name, 1024).is_ok(), "rejected {name}");
        }
    }

    #[test]
    fn test_allow_list_rejects_unknown_extensions() {
        for name in ["malware.exe", "archive.zip", "script.sh", "noextension", "dot."] {
            assert_matches!(
                validate_upload(name, 1024),
                Err(ApiError::Validation { .. }),
                "accepted {name}"
            );
        }
    }

    #[test]
    fn test_oversized_upload_is_rejected() {
        let result = validate_upload("big.pdf", MAX_UPLOAD_BYTES + 1);
        assert_matches!(result, Err(ApiError::Validation { .. }));
        assert!(validate_upload("fits.pdf", MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn test_file_type_classification() {
        assert_eq!(FileType::classify("pdf"), FileType::Pdf);
        assert_eq!(FileType::classify("pptx"), FileType::Pptx);
        assert_eq!(FileType::classify("docx"), FileType::Docx);
        assert_eq!(FileType::classify("doc"), FileType::Docx);
        assert_eq!(FileType::classify("jpeg"), FileType::Image);
        assert_eq!(FileType::classify("gif"), FileType::Image);
        assert_eq!(FileType::classify("csv"), FileType::Other);
    }

    #[test]
    fn test_object_key_shape() {
        let key = object_key("materials/Tech U", "pdf");
        assert!(key.starts_with("materials/Tech U/"));
        assert!(key.ends_with(".pdf"));

        let other = object_key("materials/Tech U", "pdf");
        assert_ne!(key, other);
    }

    #[test]
    fn test_key_from_url() {
        let url = "https://bucket.s3.us-east-1.amazonaws.com/posts/abc.png";
        assert_eq!(key_from_url(url), Some("posts/abc.png"));
        assert_eq!(key_from_url("https://bucket.s3.amazonaws.com/"), None);
        assert_eq!(key_from_url("not a url"), None);
    }

    #[tokio::test]
    async fn test_store_upload_round_trip() {
        let store: Arc<dyn ObjectStore> = Arc::new(MemoryStore::new());
        let file = UploadedFile {
            filename: "photo.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };

        let url = store_upload(&store, "posts", &file).await.unwrap();
        let key = key_from_url(&url).unwrap();
        assert!(key.starts_with("posts/"));

        // Best-effort delete must succeed silently.
        delete_stored_file(&store, &url).await;
    }

    #[tokio::test]
    async fn test_store_upload_rejects_bad_extension() {
        let store: Arc<dyn ObjectStore> = Arc::new(MemoryStore::new());
        let file = UploadedFile {
            filename: "payload.exe".to_string(),
            content_type: "application/octet-stream".to_string(),
            bytes: vec![0],
        };
        let result = store_upload(&store, "posts", &file).await;
        assert_matches!(result, Err(ApiError::Validation { .. }));
    }
}
