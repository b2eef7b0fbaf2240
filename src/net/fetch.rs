use url::Url;

/// Result of reading the collection source
#[derive(Clone)]
pub struct FetchResult {
    pub text: String,
    /// Resolved location (final URL after redirects, or the file path)
    pub origin: String,
}

/// Error during fetch
#[derive(Debug)]
pub struct FetchError {
    pub message: String,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FetchError {}

/// True when `source` names an `http(s)` resource rather than a local path.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Read the collection table from disk, or over HTTP for URLs (blocking).
pub fn fetch_source(source: &str) -> Result<FetchResult, FetchError> {
    if is_remote(source) {
        fetch_url(source)
    } else {
        let text = std::fs::read_to_string(source).map_err(|e| FetchError {
            message: format!("Cannot read {}: {}", source, e),
        })?;
        Ok(FetchResult {
            text,
            origin: source.to_string(),
        })
    }
}

/// Resolve a cover location found in the table against the table's origin.
///
/// Absolute URLs pass through. Relative references are joined onto a remote
/// origin with URL rules, or onto the directory of a local table file.
pub fn resolve_location(origin: &str, href: &str) -> String {
    if is_remote(href) {
        return href.to_string();
    }
    if href.starts_with("//") {
        return format!("https:{}", href);
    }
    if is_remote(origin) {
        if let Ok(base) = Url::parse(origin) {
            if let Ok(joined) = base.join(href) {
                return joined.to_string();
            }
        }
        return href.to_string();
    }
    let path = std::path::Path::new(href);
    if path.is_absolute() {
        return href.to_string();
    }
    match std::path::Path::new(origin).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(path).to_string_lossy().into_owned(),
        _ => href.to_string(),
    }
}

fn fetch_url(url_str: &str) -> Result<FetchResult, FetchError> {
    let parsed = Url::parse(url_str).map_err(|e| FetchError {
        message: format!("Invalid URL: {}", e),
    })?;

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("record-spiral/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(15))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| FetchError {
            message: format!("Client error: {}", e),
        })?;

    let response = client
        .get(parsed.as_str())
        .header("Accept", "text/csv,text/plain;q=0.9,*/*;q=0.8")
        .send()
        .map_err(|e| FetchError {
            message: format!("Request failed: {}", e),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError {
            message: format!("HTTP {} for {}", status.as_u16(), url_str),
        });
    }

    let final_url = response.url().to_string();

    let text = response.text().map_err(|e| FetchError {
        message: format!("Failed to read body: {}", e),
    })?;

    Ok(FetchResult {
        text,
        origin: final_url,
    })
}
