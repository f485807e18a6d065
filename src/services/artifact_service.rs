use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;
use crate::models::Artifact;
use crate::utils::errors::{ChartError, ERRORCODE_OPEN, ERRORCODE_WRITE};

/// Rendered charts stored as `<directory>/<uuid>.png`.
///
/// Every publish writes a fresh random file name, so concurrent writers never
/// collide and no locking is needed. Nothing here deletes files.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    directory: PathBuf,
}

impl ArtifactStore {
    pub const EXTENSION: &'static str = "png";

    pub fn new(directory: impl Into<PathBuf>) -> Self {
        ArtifactStore {
            directory: directory.into(),
        }
    }

    /// Location of the image for `id`
    pub fn path_for(&self, id: &Uuid) -> PathBuf {
        self.directory
            .join(format!("{}.{}", id.hyphenated(), Self::EXTENSION))
    }

    /// Write `bytes` under a new random identifier
    pub fn publish(&self, bytes: Vec<u8>) -> Result<Artifact, ChartError> {
        let id = Uuid::new_v4();
        let path = self.path_for(&id);

        std::fs::write(&path, &bytes).map_err(|source| ChartError::Io {
            code: ERRORCODE_WRITE,
            source,
        })?;

        info!("💾 Stored chart {} ({} bytes)", id, bytes.len());

        Ok(Artifact {
            id,
            image_bytes: bytes,
            created_at: Utc::now(),
        })
    }

    /// Read the image stored for `argument`.
    ///
    /// The identifier is parsed before the filesystem is touched.
    pub fn fetch(&self, argument: &str) -> Result<Vec<u8>, ChartError> {
        let id = parse_identifier(argument)?;
        let path = self.path_for(&id);

        if !path.is_file() {
            return Err(ChartError::ArtifactNotFound(id.to_string()));
        }

        let mut file = File::open(&path).map_err(|source| ChartError::Io {
            code: ERRORCODE_OPEN,
            source,
        })?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|source| ChartError::Io {
            code: ERRORCODE_OPEN,
            source,
        })?;

        if bytes.is_empty() {
            return Err(ChartError::EmptyArtifact(id.to_string()));
        }

        debug!("Read chart {} ({} bytes)", id, bytes.len());
        Ok(bytes)
    }
}

/// Parse a retrieval argument as a non-nil UUID
pub fn parse_identifier(argument: &str) -> Result<Uuid, ChartError> {
    match Uuid::parse_str(argument.trim()) {
        Ok(id) if !id.is_nil() => Ok(id),
        _ => Err(ChartError::InvalidIdentifier(argument.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_then_fetch() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ArtifactStore::new(dir.path());

        let artifact = store.publish(vec![1, 2, 3]).expect("publish failed");
        assert!(store.path_for(&artifact.id).is_file());
        assert_eq!(artifact.id.get_version_num(), 4);

        let bytes = store.fetch(&artifact.id.to_string()).expect("fetch failed");
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[test]
    fn test_publish_uses_fresh_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ArtifactStore::new(dir.path());

        let first = store.publish(vec![1]).expect("publish failed");
        let second = store.publish(vec![1]).expect("publish failed");

        assert_ne!(first.id, second.id);
        assert_eq!(std::fs::read_dir(dir.path()).expect("read_dir").count(), 2);
    }

    #[test]
    fn test_invalid_identifier_skips_filesystem() {
        // The directory does not exist: a lookup would report "not found"
        let store = ArtifactStore::new("/definitely/not/a/real/dir");

        assert!(matches!(
            store.fetch("not-a-uuid"),
            Err(ChartError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            store.fetch("00000000-0000-0000-0000-000000000000"),
            Err(ChartError::InvalidIdentifier(_))
        ));
        assert!(matches!(store.fetch(""), Err(ChartError::InvalidIdentifier(_))));
    }

    #[test]
    fn test_unknown_identifier_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ArtifactStore::new(dir.path());

        let result = store.fetch(&Uuid::new_v4().to_string());
        assert!(matches!(result, Err(ChartError::ArtifactNotFound(_))));
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ArtifactStore::new(dir.path());

        let id = Uuid::new_v4();
        std::fs::write(store.path_for(&id), b"").expect("write failed");

        assert!(matches!(
            store.fetch(&id.to_string()),
            Err(ChartError::EmptyArtifact(_))
        ));
    }

    #[test]
    fn test_braced_and_uppercase_identifiers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ArtifactStore::new(dir.path());
        let artifact = store.publish(vec![9]).expect("publish failed");

        let braced = format!("{{{}}}", artifact.id);
        let upper = artifact.id.to_string().to_uppercase();

        assert_eq!(store.fetch(&braced).expect("braced"), vec![9]);
        assert_eq!(store.fetch(&upper).expect("upper"), vec![9]);
    }

    #[test]
    fn test_publish_into_missing_directory_fails() {
        let store = ArtifactStore::new("/definitely/not/a/real/dir");
        let result = store.publish(vec![1]);
        assert!(matches!(result, Err(ChartError::Io { code: ERRORCODE_WRITE, .. })));
    }
}
