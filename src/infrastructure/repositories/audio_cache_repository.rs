use crate::domain::tts::{CacheKey, LanguageCode, PcmAudio, StorageError};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Content-addressed store of synthesized audio.
///
/// Each artifact is a WAV file named after its cache key. There is no index:
/// a file existing at the key's path is the cache entry. Files are published
/// by renaming a fully written temp file into place, so readers only ever see
/// complete artifacts. Nothing is evicted.
pub struct AudioCacheRepository {
    dir: PathBuf,
}

impl AudioCacheRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;
        tracing::info!(cache_dir = %dir.display(), "Audio cache ready");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn key_for(
        &self,
        text: &str,
        speaker: &str,
        language: LanguageCode,
        sample_rate: u32,
    ) -> CacheKey {
        CacheKey::chunk(text, speaker, language, sample_rate)
    }

    pub fn combined_key_for(
        &self,
        text: &str,
        speaker: &str,
        language: LanguageCode,
        sample_rate: u32,
    ) -> CacheKey {
        CacheKey::combined(text, speaker, language, sample_rate)
    }

    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Path of the artifact for `key`, if it has been stored
    pub async fn get(&self, key: &CacheKey) -> Result<Option<PathBuf>, StorageError> {
        let path = self.path_for(key);
        match tokio::fs::try_exists(&path).await {
            Ok(true) => Ok(Some(path)),
            Ok(false) => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    /// Store `audio` under `key` and return its path.
    ///
    /// Safe to call concurrently for the same key: each writer renames its
    /// own temp file over the target, and the last rename wins.
    pub async fn put(&self, key: &CacheKey, audio: &PcmAudio) -> Result<PathBuf, StorageError> {
        let bytes = audio.to_wav_bytes()?;
        let dir = self.dir.clone();
        let path = self.path_for(key);

        let stored = tokio::task::spawn_blocking(move || {
            write_atomically(&dir, &path, &bytes)?;
            Ok::<_, StorageError>(path)
        })
        .await
        .map_err(|e| StorageError::Task(e.to_string()))??;

        tracing::debug!(
            cache_key = %key,
            path = %stored.display(),
            duration_ms = audio.duration().as_millis(),
            "Audio artifact stored"
        );

        Ok(stored)
    }

    /// Decode a stored artifact
    pub async fn read(&self, path: &Path) -> Result<PcmAudio, StorageError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| StorageError::io(path, e))?;
        PcmAudio::from_wav_bytes(&bytes)
    }

    /// Verify that new artifacts can be written
    pub async fn check_writable(&self) -> Result<(), StorageError> {
        let dir = self.dir.clone();
        tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix(".probe-")
                .tempfile_in(&dir)
                .map(|_| ())
                .map_err(|e| StorageError::io(&dir, e))
        })
        .await
        .map_err(|e| StorageError::Task(e.to_string()))?
    }
}

fn write_atomically(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    std::fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;

    let mut file = tempfile::Builder::new()
        .prefix(".partial-")
        .suffix(".wav")
        .tempfile_in(dir)
        .map_err(|e| StorageError::io(dir, e))?;
    file.write_all(bytes)
        .map_err(|e| StorageError::io(file.path(), e))?;
    file.as_file()
        .sync_all()
        .map_err(|e| StorageError::io(file.path(), e))?;
    file.persist(path)
        .map_err(|e| StorageError::io(path, e.error))?;

    Ok(())
}
