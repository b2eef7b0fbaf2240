//! Record metadata as loaded from the collection table.

pub mod parser;

/// One row of the collection.
///
/// `title` and `artist` gate validity; every other column is optional and
/// falls back to an "Unknown …" label when shown to the user.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordData {
    pub title: String,
    pub artist: String,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub label: Option<String>,
    pub image_url: Option<String>,
}

impl RecordData {
    /// A row is usable only when both title and artist carry text.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.artist.trim().is_empty()
    }

    pub fn year_or_unknown(&self) -> &str {
        self.year.as_deref().unwrap_or("Unknown Year")
    }

    pub fn genre_or_unknown(&self) -> &str {
        self.genre.as_deref().unwrap_or("Unknown Genre")
    }

    pub fn label_or_unknown(&self) -> &str {
        self.label.as_deref().unwrap_or("Unknown Label")
    }
}
