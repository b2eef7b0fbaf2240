//! CSV → `RecordData`.
//!
//! Headers are matched case-insensitively (`imageUrl`, `imageurl` and
//! `image_url` all name the cover column). Unknown columns are ignored and
//! short rows simply leave the trailing fields empty. Rows are returned as-is,
//! including ones without a title or artist; dropping those is the scene
//! builder's job so that skipped rows can be counted in one place.

use serde::Deserialize;

use super::RecordData;

/// Error when the table as a whole cannot be read.
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Rows read from a table, in file order.
#[derive(Debug, Default)]
pub struct ParsedTable {
    pub rows: Vec<RecordData>,
    /// Rows the CSV reader itself rejected (bad quoting, invalid UTF-8, ...)
    pub unreadable: usize,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    artist: Option<String>,
    #[serde(default)]
    year: Option<String>,
    #[serde(default)]
    genre: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default, rename = "imageurl", alias = "image_url")]
    image_url: Option<String>,
}

impl From<RawRow> for RecordData {
    fn from(raw: RawRow) -> Self {
        RecordData {
            title: raw.title.unwrap_or_default(),
            artist: raw.artist.unwrap_or_default(),
            year: raw.year,
            genre: raw.genre,
            label: raw.label,
            image_url: raw.image_url,
        }
    }
}

fn canonical_header(h: &str) -> String {
    h.trim_start_matches('\u{feff}').trim().to_ascii_lowercase()
}

/// Parse a delimited table with a header row.
///
/// Fails only when the header row itself is unreadable. A missing `title` or
/// `artist` column is not an error: every row then comes back invalid and is
/// dropped by the scene builder. Individual bad rows are counted and skipped.
pub fn parse_records(text: &str) -> Result<ParsedTable, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: csv::StringRecord = reader
        .headers()
        .map_err(|e| ParseError {
            message: format!("Unreadable header row: {}", e),
        })?
        .iter()
        .map(canonical_header)
        .collect();

    let mut table = ParsedTable::default();
    for (line, result) in reader.records().enumerate() {
        let row = result
            .map_err(|e| e.to_string())
            .and_then(|rec| rec.deserialize::<RawRow>(Some(&headers)).map_err(|e| e.to_string()));
        match row {
            Ok(raw) => table.rows.push(raw.into()),
            Err(e) => {
                // +2: one for the header, one for 1-based numbering
                log::debug!("Skipping unreadable row {}: {}", line + 2, e);
                table.unreadable += 1;
            }
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_columns() {
        let csv = "title,artist,year,genre,label,imageUrl\n\
                   Kind of Blue,Miles Davis,1959,Jazz,Columbia,covers/kob.jpg\n";
        let table = parse_records(csv).unwrap();
        assert_eq!(table.rows.len(), 1);
        let r = &table.rows[0];
        assert_eq!(r.title, "Kind of Blue");
        assert_eq!(r.artist, "Miles Davis");
        assert_eq!(r.year.as_deref(), Some("1959"));
        assert_eq!(r.genre.as_deref(), Some("Jazz"));
        assert_eq!(r.label.as_deref(), Some("Columbia"));
        assert_eq!(r.image_url.as_deref(), Some("covers/kob.jpg"));
    }

    #[test]
    fn headers_are_case_insensitive_and_reorderable() {
        let csv = "Artist , TITLE,Image_URL\nNina Simone,Pastel Blues,x.png\n";
        let table = parse_records(csv).unwrap();
        let r = &table.rows[0];
        assert_eq!(r.title, "Pastel Blues");
        assert_eq!(r.artist, "Nina Simone");
        assert_eq!(r.image_url.as_deref(), Some("x.png"));
    }

    #[test]
    fn empty_and_missing_cells_become_none() {
        let csv = "title,artist,year,genre\nHorses,Patti Smith,,\nMarquee Moon,Television\n";
        let table = parse_records(csv).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].year, None);
        assert_eq!(table.rows[0].genre, None);
        assert_eq!(table.rows[1].year, None);
    }

    #[test]
    fn rows_without_artist_are_kept_for_the_builder() {
        let csv = "title,artist\nA,X\nB,\nC,Z\n";
        let table = parse_records(csv).unwrap();
        assert_eq!(table.rows.len(), 3);
        assert!(!table.rows[1].is_valid());
    }

    #[test]
    fn missing_artist_column_yields_invalid_rows() {
        let table = parse_records("title,year\nA,1999\nB,2001\n").unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.unreadable, 0);
        assert!(table.rows.iter().all(|r| !r.is_valid()));
        assert_eq!(table.rows[1].year.as_deref(), Some("2001"));
    }

    #[test]
    fn quoted_fields_with_commas() {
        let csv = "title,artist,label\n\"Crosby, Stills & Nash\",\"CSN\",\"Atlantic\"\n";
        let table = parse_records(csv).unwrap();
        assert_eq!(table.rows[0].title, "Crosby, Stills & Nash");
    }
}
