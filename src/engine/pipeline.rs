use crate::data::parser::parse_records;
use crate::data::RecordData;
use crate::net::fetch::fetch_source;

/// Result of loading the collection table
#[derive(Debug)]
pub struct LoadedCollection {
    /// Every row in file order, valid or not
    pub rows: Vec<RecordData>,
    /// Where the table was read from; relative cover paths resolve against it
    pub origin: String,
    /// Rows the CSV reader could not decode at all
    pub unreadable: usize,
}

/// Error during collection loading. Fatal to startup.
#[derive(Debug)]
pub struct LoadError {
    pub message: String,
    pub phase: &'static str,
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.phase, self.message)
    }
}

impl std::error::Error for LoadError {}

/// The load pipeline: Fetch → Parse
pub fn load_collection(source: &str) -> Result<LoadedCollection, LoadError> {
    log::info!("Loading collection from {}", source);

    let fetched = fetch_source(source).map_err(|e| LoadError {
        message: e.message,
        phase: "fetch",
    })?;

    process_table(&fetched.text, &fetched.origin)
}

/// Parse raw table text (for testing)
pub fn process_table(text: &str, origin: &str) -> Result<LoadedCollection, LoadError> {
    let table = parse_records(text).map_err(|e| LoadError {
        message: e.message,
        phase: "parse",
    })?;

    log::info!(
        "Read {} rows from {} ({} unreadable)",
        table.rows.len(),
        origin,
        table.unreadable
    );

    Ok(LoadedCollection {
        rows: table.rows,
        origin: origin.to_string(),
        unreadable: table.unreadable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_fails_in_fetch_phase() {
        let err = load_collection("no/such/dir/records.csv").unwrap_err();
        assert_eq!(err.phase, "fetch");
        assert!(err.to_string().starts_with("[fetch]"));
    }

    #[test]
    fn table_without_artist_column_still_loads() {
        let loaded = process_table("title,year\nA,1999\nB,2001\n", "records.csv").unwrap();
        assert_eq!(loaded.rows.len(), 2);
        assert!(loaded.rows.iter().all(|r| !r.is_valid()));
    }

    #[test]
    fn keeps_origin_and_rows() {
        let loaded = process_table("title,artist\nA,B\nC,\n", "data/records.csv").unwrap();
        assert_eq!(loaded.rows.len(), 2);
        assert_eq!(loaded.origin, "data/records.csv");
        assert_eq!(loaded.unreadable, 0);
    }

    #[test]
    fn loads_from_disk() {
        let path = std::env::temp_dir().join(format!("record-spiral-load-{}.csv", std::process::id()));
        std::fs::write(&path, "title,artist,year\nBlue Lines,Massive Attack,1991\n").unwrap();
        let loaded = load_collection(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.rows[0].year.as_deref(), Some("1991"));
        let _ = std::fs::remove_file(&path);
    }
}
