//! File-based registry store.
//!
//! Persists the registry as a pretty-printed JSON document. Every save writes
//! a sibling temp file, syncs it, and renames it over the target.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

use docverify_core::constants::TEMP_FILE_EXTENSION;
use docverify_core::error::{DocVerifyError, Result};
use docverify_core::traits::RegistryStore;
use docverify_core::types::Registry;

/// File-based registry store.
///
/// # File Format
///
/// ```text
/// {
///   "documents": [
///     { "registrationNumber": "...", "documentType": "...", ... }
///   ]
/// }
/// ```
///
/// A missing file is an empty registry. A file that exists but cannot be read
/// or parsed is a [`DocVerifyError::StorageRead`].
#[derive(Clone, Debug)]
pub struct FileStore {
    /// Path to the registry file
    path: PathBuf,
}

impl FileStore {
    /// Creates a store for the file at `path`.
    ///
    /// Nothing is touched on disk until the first load or save.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the scratch path used during saves: the full file name with
    /// `.tmp` appended, so it never coincides with the target.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".");
        name.push(TEMP_FILE_EXTENSION);
        PathBuf::from(name)
    }

    async fn write_temp(&self, temp_path: &Path, contents: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::File::create(temp_path).await?;
        file.write_all(contents).await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl RegistryStore for FileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Registry> {
        let contents = match fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Registry file not found, starting empty");
                return Ok(Registry::default());
            }
            Err(e) => return Err(DocVerifyError::read(&self.path, e)),
        };

        let registry: Registry = serde_json::from_slice(&contents)
            .map_err(|e| DocVerifyError::read(&self.path, e))?;

        debug!(count = registry.len(), "Registry loaded");
        Ok(registry)
    }

    #[instrument(skip(self, registry), fields(path = %self.path.display(), count = registry.len()))]
    async fn save(&self, registry: &Registry) -> Result<()> {
        let contents = serde_json::to_vec_pretty(registry)
            .map_err(|e| DocVerifyError::write(&self.path, e))?;

        // Write atomically (write to temp, then rename)
        let temp_path = self.temp_path();
        if let Err(e) = self.write_temp(&temp_path, &contents).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(DocVerifyError::write(&self.path, e));
        }

        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            warn!(error = %e, "Failed to move registry into place");
            let _ = fs::remove_file(&temp_path).await;
            return Err(DocVerifyError::write(&self.path, e));
        }

        info!(count = registry.len(), "Registry saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use docverify_core::types::{DocumentRecord, MetadataValue};
    use tempfile::tempdir;

    fn sample_registry() -> Registry {
        let mut transcript = DocumentRecord::new("Transcript", "KU0040642023", "t.pdf");
        transcript.storage_url = Some("https://blob.example/t.pdf".into());
        transcript.student_name = Some("Amina Otieno".into());
        transcript.institution = Some("Kenyatta University".into());
        transcript.metadata = Some(
            [
                ("gpa".to_string(), MetadataValue::parse_lenient("3.7")),
                ("honours".to_string(), MetadataValue::Bool(true)),
            ]
            .into_iter()
            .collect(),
        );

        let certificate = DocumentRecord::new("Certificate", "ABC-1", "c.pdf");

        Registry::from_documents(vec![transcript, certificate])
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.json");

        let store = FileStore::new(&path);
        let registry = store.load().await.unwrap();

        assert!(registry.is_empty());
        assert!(!path.exists()); // File not created until save
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.json");
        let registry = sample_registry();

        FileStore::new(&path).save(&registry).await.unwrap();

        // Load through a fresh instance
        let loaded = FileStore::new(&path).load().await.unwrap();
        assert_eq!(loaded, registry);
        assert_eq!(loaded.documents[0].registration_number, "KU0040642023");
        assert_eq!(loaded.documents[1].registration_number, "ABC-1");
    }

    #[tokio::test]
    async fn test_resave_is_stable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.json");
        let store = FileStore::new(&path);

        store.save(&sample_registry()).await.unwrap();
        let first = fs::read(&path).await.unwrap();

        let loaded = store.load().await.unwrap();
        store.save(&loaded).await.unwrap();
        let second = fs::read(&path).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lib").join("document-registry.json");

        let store = FileStore::new(&path);
        store.save(&sample_registry()).await.unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_invalid_file_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.json");

        fs::write(&path, b"invalid data").await.unwrap();

        let err = FileStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, DocVerifyError::StorageRead { .. }));
    }

    #[tokio::test]
    async fn test_empty_file_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.json");

        fs::write(&path, b"").await.unwrap();

        let err = FileStore::new(&path).load().await.unwrap_err();
        assert!(err.is_storage_error());
    }

    #[tokio::test]
    async fn test_reads_legacy_registry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("document-registry.json");

        let legacy = r#"{
  "documents": [
    {
      "registrationNumber": "KU0040642023",
      "documentType": "Transcript",
      "filename": "1700000000000_transcript.pdf",
      "publicUrl": "data:application/pdf;base64,JVBERi0=",
      "uploadedAt": "2023-11-14T22:13:20.000Z",
      "verified": true,
      "studentName": "Amina Otieno"
    }
  ]
}"#;
        fs::write(&path, legacy).await.unwrap();

        let registry = FileStore::new(&path).load().await.unwrap();
        let record = &registry.documents[0];

        assert_eq!(record.storage_url.as_deref(), Some("data:application/pdf;base64,JVBERi0="));
        assert_eq!(
            record.registered_at,
            Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap()
        );
        assert_eq!(record.student_name.as_deref(), Some("Amina Otieno"));
    }

    #[tokio::test]
    async fn test_unknown_fields_survive_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.json");

        let json = r#"{
  "documents": [
    {
      "registrationNumber": "R1",
      "documentType": "Diploma",
      "filename": "d.pdf",
      "registeredAt": "2024-01-01T00:00:00Z",
      "verified": true,
      "sealNumber": "S-99"
    }
  ],
  "exportedBy": "registrar"
}"#;
        fs::write(&path, json).await.unwrap();

        let store = FileStore::new(&path);
        let registry = store.load().await.unwrap();
        store.save(&registry).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).await.unwrap()).unwrap();
        assert_eq!(raw["exportedBy"], "registrar");
        assert_eq!(raw["documents"][0]["sealNumber"], "S-99");
    }

    #[tokio::test]
    async fn test_atomic_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.json");
        let temp_path = dir.path().join("registry.json.tmp");

        let store = FileStore::new(&path);
        assert_eq!(store.temp_path(), temp_path);
        store.save(&sample_registry()).await.unwrap();

        // Temp file should not exist after save
        assert!(!temp_path.exists());
        // Main file should exist
        assert!(path.exists());
    }

    #[test]
    fn test_temp_path_is_distinct() {
        let tmp = FileStore::new("data/registry.tmp");
        assert_eq!(tmp.temp_path(), PathBuf::from("data/registry.tmp.tmp"));

        let json = FileStore::new("data/a.json");
        let yaml = FileStore::new("data/a.yaml");
        assert_ne!(json.temp_path(), yaml.temp_path());
    }

    #[tokio::test]
    async fn test_save_over_tmp_named_registry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.tmp");
        let store = FileStore::new(&path);

        store.save(&sample_registry()).await.unwrap();
        store.save(&Registry::default()).await.unwrap();

        assert!(store.load().await.unwrap().is_empty());
        assert!(!dir.path().join("registry.tmp.tmp").exists());
    }

    #[tokio::test]
    async fn test_unwritable_location_is_write_error() {
        let dir = tempdir().unwrap();
        // A regular file where the parent directory should be
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").await.unwrap();
        let path = blocker.join("registry.json");

        let err = FileStore::new(&path).save(&sample_registry()).await.unwrap_err();
        assert!(matches!(err, DocVerifyError::StorageWrite { .. }));
    }
}
