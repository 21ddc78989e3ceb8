use serde::Serialize;

/// Record of a chunk-size cut applied to a document's displayed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Truncation {
    /// Length in characters before the cut.
    pub original_len: usize,
    /// Threshold in effect; also the length after the cut.
    pub chunk_size: usize,
}

impl Truncation {
    /// Characters removed by the cut.
    pub fn overflow(&self) -> usize {
        self.original_len.saturating_sub(self.chunk_size)
    }
}

/// The displayed content of a document plus whether it was cut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentView {
    pub content: String,
    pub truncation: Option<Truncation>,
}

impl ContentView {
    pub fn is_truncated(&self) -> bool {
        self.truncation.is_some()
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

/// `entries_json + "\n" + text` when there is metadata, otherwise `text`.
pub(crate) fn compose(text: &str, entries_json: Option<String>) -> String {
    match entries_json {
        Some(leading) => {
            let mut content = String::with_capacity(leading.len() + 1 + text.len());
            content.push_str(&leading);
            content.push('\n');
            content.push_str(text);
            content
        }
        None => text.to_string(),
    }
}

/// Cut `content` to its first `chunk_size` characters if it is longer.
pub(crate) fn truncate(content: String, chunk_size: Option<usize>) -> ContentView {
    let Some(chunk_size) = chunk_size else {
        return ContentView {
            content,
            truncation: None,
        };
    };

    // Byte offset of the char at index `chunk_size`, if the content has one.
    match content.char_indices().nth(chunk_size) {
        Some((cut, _)) => {
            let original_len = chunk_size + content[cut..].chars().count();
            let mut content = content;
            content.truncate(cut);
            ContentView {
                content,
                truncation: Some(Truncation {
                    original_len,
                    chunk_size,
                }),
            }
        }
        None => ContentView {
            content,
            truncation: None,
        },
    }
}
