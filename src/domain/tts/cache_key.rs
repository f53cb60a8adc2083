use super::language::LanguageCode;
use sha2::{Digest, Sha256};

/// What an artifact holds: the audio of one chunk, or the stitched audio of a whole text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Chunk,
    Combined,
}

impl ArtifactKind {
    fn namespace(&self) -> &'static str {
        match self {
            ArtifactKind::Chunk => "chunk",
            ArtifactKind::Combined => "combined",
        }
    }
}

/// Content fingerprint of (text, speaker, language, sample rate).
///
/// The digest is SHA-256 over the length-prefixed UTF-8 fields, so it is
/// stable across processes and no field can bleed into its neighbour.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    kind: ArtifactKind,
    digest: String,
}

impl CacheKey {
    pub fn new(
        kind: ArtifactKind,
        text: &str,
        speaker: &str,
        language: LanguageCode,
        sample_rate: u32,
    ) -> Self {
        let sample_rate = sample_rate.to_string();
        let mut hasher = Sha256::new();
        for field in [
            kind.namespace(),
            text,
            speaker,
            language.as_str(),
            sample_rate.as_str(),
        ] {
            hasher.update((field.len() as u64).to_le_bytes());
            hasher.update(field.as_bytes());
        }

        Self {
            kind,
            digest: hex::encode(hasher.finalize()),
        }
    }

    pub fn chunk(text: &str, speaker: &str, language: LanguageCode, sample_rate: u32) -> Self {
        Self::new(ArtifactKind::Chunk, text, speaker, language, sample_rate)
    }

    pub fn combined(text: &str, speaker: &str, language: LanguageCode, sample_rate: u32) -> Self {
        Self::new(ArtifactKind::Combined, text, speaker, language, sample_rate)
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn file_name(&self) -> String {
        match self.kind {
            ArtifactKind::Chunk => format!("{}.wav", self.digest),
            ArtifactKind::Combined => format!("combined_{}.wav", self.digest),
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind.namespace(), self.digest)
    }
}
