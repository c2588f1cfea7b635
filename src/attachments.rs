//! Attachment staging.
//!
//! Files are read, size-checked and base64-encoded here, before any
//! analysis request exists. A staging batch is all-or-nothing: when any
//! file in it is rejected, the staged set is left exactly as it was.

use crate::error::AttachmentError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::future::try_join_all;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Maximum number of attachments per analysis request.
pub const MAX_ATTACHMENTS: usize = 2;

/// Maximum decoded size of one attachment, in MiB.
pub const MAX_ATTACHMENT_MB: usize = 4;

/// Maximum decoded size of one attachment, in bytes.
pub const MAX_ATTACHMENT_BYTES: usize = MAX_ATTACHMENT_MB * 1024 * 1024;

/// A binary file staged for inclusion in a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    /// Display name (usually the file name).
    pub name: String,
    pub mime_type: String,
    /// Standard base64 with padding.
    pub data: String,
}

impl Attachment {
    /// Encode raw bytes into a transportable attachment.
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: encode(bytes),
        }
    }

    /// Decode the transported data back into bytes.
    pub fn decode(&self) -> Result<Vec<u8>, AttachmentError> {
        decode(&self.data).map_err(|_| AttachmentError::InvalidEncoding {
            name: self.name.clone(),
        })
    }

    /// Size of the decoded content in bytes.
    pub fn decoded_len(&self) -> Result<usize, AttachmentError> {
        self.decode().map(|bytes| bytes.len())
    }

    /// Read a file from disk, rejecting it before reading if it is too large.
    pub async fn load(path: &Path) -> Result<Self, AttachmentError> {
        let name = display_name(path);
        let unreadable = |e: std::io::Error| AttachmentError::Unreadable {
            name: name.clone(),
            reason: e.to_string(),
        };

        let metadata = tokio::fs::metadata(path).await.map_err(unreadable)?;
        if metadata.len() > MAX_ATTACHMENT_BYTES as u64 {
            return Err(too_large(&name));
        }

        let bytes = tokio::fs::read(path).await.map_err(unreadable)?;
        // The file may have grown since the metadata call.
        if bytes.len() > MAX_ATTACHMENT_BYTES {
            return Err(too_large(&name));
        }

        debug!("Read attachment {} ({} bytes)", name, bytes.len());
        Ok(Self::from_bytes(name.clone(), mime_type_for(path), &bytes))
    }
}

/// Base64-encode bytes for transport.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode transported base64 data.
pub fn decode(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(data)
}

/// The attachments staged for the next analysis request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentSet {
    items: Vec<Attachment>,
}

impl AttachmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether another attachment can still be staged.
    pub fn has_room(&self) -> bool {
        self.items.len() < MAX_ATTACHMENTS
    }

    pub fn as_slice(&self) -> &[Attachment] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Attachment> {
        self.items
    }

    /// Stage a single attachment.
    pub fn stage(&mut self, attachment: Attachment) -> Result<(), AttachmentError> {
        self.stage_all(vec![attachment])
    }

    /// Stage a batch of attachments, all or none.
    pub fn stage_all(&mut self, batch: Vec<Attachment>) -> Result<(), AttachmentError> {
        self.check_room(batch.len())?;

        for attachment in &batch {
            if attachment.decoded_len()? > MAX_ATTACHMENT_BYTES {
                return Err(too_large(&attachment.name));
            }
        }

        self.items.extend(batch);
        Ok(())
    }

    /// Read and stage files from disk, all or none.
    ///
    /// Files are read concurrently; the first failure aborts the batch.
    pub async fn stage_files(&mut self, paths: &[PathBuf]) -> Result<(), AttachmentError> {
        if paths.is_empty() {
            return Ok(());
        }
        self.check_room(paths.len())?;

        let loaded = try_join_all(paths.iter().map(|p| Attachment::load(p))).await?;
        info!("Staged {} attachment(s)", loaded.len());
        self.stage_all(loaded)
    }

    /// Remove the attachment at `index`, returning it.
    pub fn remove(&mut self, index: usize) -> Option<Attachment> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    fn check_room(&self, incoming: usize) -> Result<(), AttachmentError> {
        if self.items.len() + incoming > MAX_ATTACHMENTS {
            return Err(AttachmentError::TooMany {
                max: MAX_ATTACHMENTS,
            });
        }
        Ok(())
    }
}

fn too_large(name: &str) -> AttachmentError {
    AttachmentError::TooLarge {
        name: name.to_string(),
        max_mb: MAX_ATTACHMENT_MB,
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Guess a MIME type from the file extension.
///
/// Covers images, PDF, Word and Excel documents; anything else is sent as
/// `application/octet-stream`.
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokio_test::{assert_err, assert_ok};

    fn small(name: &str) -> Attachment {
        Attachment::from_bytes(name, "image/png", &[0x89, b'P', b'N', b'G'])
    }

    #[test]
    fn test_base64_round_trip() {
        let bytes: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let attachment = Attachment::from_bytes("blob.bin", "application/octet-stream", &bytes);
        assert_eq!(attachment.decode().unwrap(), bytes);
        assert_eq!(attachment.decoded_len().unwrap(), 1000);
    }

    #[test]
    fn test_third_attachment_rejected_without_mutation() {
        let mut set = AttachmentSet::new();
        assert_ok!(set.stage(small("a.png")));
        assert_ok!(set.stage(small("b.png")));
        let before = set.clone();

        let err = set.stage(small("c.png")).unwrap_err();
        assert_eq!(err, AttachmentError::TooMany { max: 2 });
        assert_eq!(set, before);
        assert!(!set.has_room());
    }

    #[test]
    fn test_batch_exceeding_limit_rejected_whole() {
        let mut set = AttachmentSet::new();
        assert_ok!(set.stage(small("a.png")));
        assert_err!(set.stage_all(vec![small("b.png"), small("c.png")]));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_oversized_attachment_named_in_rejection() {
        let mut set = AttachmentSet::new();
        let big = vec![0u8; MAX_ATTACHMENT_BYTES + 1];
        let err = set
            .stage_all(vec![small("ok.png"), Attachment::from_bytes("huge.pdf", "application/pdf", &big)])
            .unwrap_err();

        assert_eq!(
            err,
            AttachmentError::TooLarge {
                name: "huge.pdf".to_string(),
                max_mb: 4
            }
        );
        assert!(err.to_string().contains("huge.pdf"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_exactly_max_size_accepted() {
        let mut set = AttachmentSet::new();
        let edge = vec![7u8; MAX_ATTACHMENT_BYTES];
        assert_ok!(set.stage(Attachment::from_bytes("edge.bin", "application/octet-stream", &edge)));
    }

    #[test]
    fn test_invalid_encoding_rejected() {
        let mut set = AttachmentSet::new();
        let bad = Attachment {
            name: "bad.png".to_string(),
            mime_type: "image/png".to_string(),
            data: "not base64!!".to_string(),
        };
        assert_eq!(
            set.stage(bad).unwrap_err(),
            AttachmentError::InvalidEncoding {
                name: "bad.png".to_string()
            }
        );
    }

    #[test]
    fn test_remove() {
        let mut set = AttachmentSet::new();
        set.stage_all(vec![small("a.png"), small("b.png")]).unwrap();
        assert_eq!(set.remove(0).map(|a| a.name), Some("a.png".to_string()));
        assert_eq!(set.as_slice()[0].name, "b.png");
        assert!(set.remove(5).is_none());
        assert!(set.has_room());
    }

    #[test]
    fn test_mime_type_for() {
        assert_eq!(mime_type_for(Path::new("cat.JPG")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("paper.pdf")), "application/pdf");
        assert_eq!(mime_type_for(Path::new("noext")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_stage_files_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"hello attachment").unwrap();

        let mut set = AttachmentSet::new();
        set.stage_files(&[path]).await.unwrap();

        let staged = &set.as_slice()[0];
        assert_eq!(staged.name, "notes.txt");
        assert_eq!(staged.mime_type, "text/plain");
        assert_eq!(staged.decode().unwrap(), b"hello attachment");
    }

    #[tokio::test]
    async fn test_stage_files_aborts_whole_batch_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        std::fs::write(&good, [1u8, 2, 3]).unwrap();
        let missing = dir.path().join("missing.png");

        let mut set = AttachmentSet::new();
        let err = set.stage_files(&[good, missing]).await.unwrap_err();

        assert!(matches!(err, AttachmentError::Unreadable { ref name, .. } if name == "missing.png"));
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn test_stage_files_rejects_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bin");
        std::fs::write(&path, vec![0u8; MAX_ATTACHMENT_BYTES + 10]).unwrap();

        let mut set = AttachmentSet::new();
        let err = set.stage_files(&[path]).await.unwrap_err();
        assert!(matches!(err, AttachmentError::TooLarge { ref name, .. } if name == "big.bin"));
    }

    #[tokio::test]
    async fn test_stage_files_checks_count_before_reading() {
        let mut set = AttachmentSet::new();
        let paths: Vec<PathBuf> = ["a", "b", "c"].iter().map(PathBuf::from).collect();
        assert_eq!(
            set.stage_files(&paths).await.unwrap_err(),
            AttachmentError::TooMany { max: 2 }
        );
    }
}
