use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use docket_blob::BlobError;
use docket_core::{CreateDocument, DocError};
use docket_store::StoreError;

pub const REQUIRED_FIELDS: &str = "file_name, file_content, and content_type are required";
pub const INVALID_BASE64: &str = "Invalid base64 encoded file content";
pub const NOT_FOUND: &str = "Document not found";
pub const NO_FIELDS: &str = "No fields to update";

/// Check the create payload and decode its content. Touches no store.
pub fn decode_content(input: &CreateDocument, max_bytes: u64) -> Result<Vec<u8>, DocError> {
    if input.file_name.trim().is_empty()
        || input.file_content.is_empty()
        || input.content_type.trim().is_empty()
    {
        return Err(DocError::validation(REQUIRED_FIELDS));
    }

    let content = STANDARD
        .decode(input.file_content.as_bytes())
        .map_err(|e| DocError::validation(INVALID_BASE64).with_source(e))?;

    if content.len() as u64 > max_bytes {
        return Err(DocError::validation(format!(
            "File size {} exceeds maximum of {max_bytes} bytes",
            content.len()
        )));
    }

    Ok(content)
}

/// Metadata lookups: a missing record is `NotFound`, anything else is
/// a persistence failure described by `context`.
pub fn store_error(err: StoreError, context: &str) -> DocError {
    match err {
        StoreError::NotFound(_) => DocError::not_found(NOT_FOUND).with_source(err),
        other => DocError::persistence(format!("{context}: {other}")).with_source(other),
    }
}

/// Blob failures keep the kind of the primitive that failed.
pub fn blob_error(err: BlobError, context: &str) -> DocError {
    let message = format!("{context}: {err}");
    match err {
        BlobError::Invalid { .. } => DocError::validation(err.to_string()).with_source(err),
        BlobError::Write { .. } => DocError::storage_write(message).with_source(err),
        BlobError::NotFound { .. } | BlobError::Read { .. } => {
            DocError::storage_read(message).with_source(err)
        }
        BlobError::Access { .. } => DocError::storage_access(message).with_source(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_core::ErrorKind;

    #[test]
    fn required_fields_are_checked_together() {
        for input in [
            CreateDocument::new("", "aGVsbG8=", "text/plain"),
            CreateDocument::new("a.txt", "", "text/plain"),
            CreateDocument::new("a.txt", "aGVsbG8=", " "),
        ] {
            let err = decode_content(&input, 100).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
            assert_eq!(err.message, REQUIRED_FIELDS);
        }
    }

    #[test]
    fn bad_base64_is_validation() {
        let err = decode_content(&CreateDocument::new("a.txt", "%%%", "text/plain"), 100)
            .unwrap_err();
        assert_eq!(err.message, INVALID_BASE64);
    }

    #[test]
    fn decodes_and_enforces_size() {
        let input = CreateDocument::new("a.txt", "aGVsbG8=", "text/plain");
        assert_eq!(decode_content(&input, 5).unwrap(), b"hello");

        let err = decode_content(&input, 4).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn blob_errors_map_by_primitive() {
        let err = blob_error(BlobError::write("k", "timeout"), "Failed to upload file");
        assert_eq!(err.kind, ErrorKind::StorageWrite);
        assert!(err.message.starts_with("Failed to upload file: "));

        let err = blob_error(BlobError::read("k", "reset"), "Failed to read file");
        assert_eq!(err.kind, ErrorKind::StorageRead);
        assert_eq!(
            blob_error(BlobError::not_found("k"), "Failed to read file").kind,
            ErrorKind::StorageRead
        );

        let err = blob_error(BlobError::access("k", "denied"), "Failed to generate download URL");
        assert_eq!(err.kind, ErrorKind::StorageAccess);
        assert!(err.message.starts_with("Failed to generate download URL: "));

        let err = blob_error(BlobError::invalid("too big"), "Failed to upload file");
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn store_errors_map_by_kind() {
        let err = store_error(StoreError::NotFound("x".into()), "Failed to retrieve document");
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, NOT_FOUND);

        let err = store_error(StoreError::Conflict("dup".into()), "Failed to create document record");
        assert_eq!(err.kind, ErrorKind::Persistence);
        assert!(err.message.starts_with("Failed to create document record"));
    }
}
