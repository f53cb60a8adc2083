use regex::Regex;
use std::sync::OnceLock;

/// Maximum chunk length, in characters, handed to the speech model
pub const DEFAULT_MAX_CHUNK_LENGTH: usize = 1000;

fn sentence_boundary() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[.!?]\s+").expect("sentence boundary pattern is valid"))
}

/// Split text into chunks of at most `max_length` characters.
///
/// Text that already fits is returned unchanged as a single chunk. Longer
/// text is cut at sentence terminators (`.`, `!`, `?` followed by
/// whitespace) and sentences are greedily packed into chunks joined by a
/// single space. A sentence that is longer than `max_length` on its own is
/// packed word by word instead.
///
/// A single word longer than `max_length` cannot be split on a boundary and
/// is emitted as its own oversized chunk.
pub fn split_text(text: &str, max_length: usize) -> Vec<String> {
    if char_len(text) <= max_length {
        return vec![text.to_string()];
    }

    let mut chunks = ChunkBuilder::new(max_length);

    for sentence in split_sentences(text) {
        if chunks.fits(sentence) {
            chunks.append(sentence);
            continue;
        }

        chunks.flush();

        if char_len(sentence) > max_length {
            for word in sentence.split_whitespace() {
                if chunks.fits(word) {
                    chunks.append(word);
                } else {
                    chunks.flush();
                    chunks.append(word);
                }
            }
        } else {
            chunks.append(sentence);
        }
    }

    chunks.finish()
}

/// Sentences in order, terminator kept, separating whitespace dropped
fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    let mut sentences = Vec::new();
    let mut last_end = 0;

    for mat in sentence_boundary().find_iter(text) {
        // Terminators are single-byte ASCII
        sentences.push(&text[last_end..mat.start() + 1]);
        last_end = mat.end();
    }
    sentences.push(&text[last_end..]);

    sentences.into_iter().filter(|s| !s.trim().is_empty())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

struct ChunkBuilder {
    max_length: usize,
    chunks: Vec<String>,
    current: String,
    current_len: usize,
}

impl ChunkBuilder {
    fn new(max_length: usize) -> Self {
        Self {
            max_length,
            chunks: Vec::new(),
            current: String::new(),
            current_len: 0,
        }
    }

    /// Whether `piece` can join the current chunk, counting the joining space
    fn fits(&self, piece: &str) -> bool {
        let joined = if self.current.is_empty() {
            char_len(piece)
        } else {
            self.current_len + 1 + char_len(piece)
        };
        joined <= self.max_length
    }

    fn append(&mut self, piece: &str) {
        if !self.current.is_empty() {
            self.current.push(' ');
            self.current_len += 1;
        }
        self.current.push_str(piece);
        self.current_len += char_len(piece);
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.chunks.push(std::mem::take(&mut self.current));
            self.current_len = 0;
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.chunks
    }
}
