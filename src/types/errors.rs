use std::fmt;

// === UrlError ===

/// Errors related to URL list validation.
#[derive(Debug)]
pub enum UrlError {
    /// The candidate does not parse as an absolute URL with an authority.
    Invalid(String),
}

impl fmt::Display for UrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlError::Invalid(candidate) => write!(f, "Invalid URL: {}", candidate),
        }
    }
}

impl std::error::Error for UrlError {}

// === FetchError ===

/// Errors produced by the timed page fetcher. All are per-URL and
/// recoverable: the pipeline converts each into a fallback record.
#[derive(Debug)]
pub enum FetchError {
    /// The retrieval did not settle before the deadline (milliseconds).
    Timeout(u64),
    /// The server answered with a non-success HTTP status.
    Status(u16),
    /// The request failed at the transport level.
    Transport(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Timeout(ms) => write!(f, "Request timed out after {}ms", ms),
            FetchError::Status(code) => write!(f, "HTTP error: status {}", code),
            FetchError::Transport(msg) => write!(f, "Network error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

// === ExtractError ===

/// Errors related to metadata extraction from page markup.
#[derive(Debug)]
pub enum ExtractError {
    /// A selector failed to compile while querying the document.
    Selector(String),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Selector(msg) => write!(f, "Markup query failed: {}", msg),
        }
    }
}

impl std::error::Error for ExtractError {}

// === CacheError ===

/// Errors related to the persisted cache collection.
///
/// Reads are always tolerant (absent or malformed data loads as empty);
/// these only surface from writes and clears.
#[derive(Debug)]
pub enum CacheError {
    /// An I/O error occurred while writing or removing the stored value.
    Io(String),
    /// Failed to serialize the cache collection.
    Serialization(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Io(msg) => write!(f, "Cache I/O error: {}", msg),
            CacheError::Serialization(msg) => write!(f, "Cache serialization error: {}", msg),
        }
    }
}

impl std::error::Error for CacheError {}

// === PipelineError ===

/// Run-level pipeline failures. Unlike per-URL errors, these abort the run
/// and replace the presentation surface with a single error notice.
#[derive(Debug)]
pub enum PipelineError {
    /// The input list contained no valid URLs.
    NoValidUrls,
    /// The run finished with zero bookmarks. Defensive: cannot occur once
    /// validation passed, since every surviving URL yields at least a
    /// fallback record.
    EmptyResult,
    /// The URL list resource could not be read.
    ListUnavailable(String),
    /// The persisted cache could not be written or cleared.
    Cache(CacheError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::NoValidUrls => write!(f, "No valid URLs found in the input list"),
            PipelineError::EmptyResult => write!(f, "No bookmarks were produced"),
            PipelineError::ListUnavailable(msg) => {
                write!(f, "Failed to load the URL list: {}", msg)
            }
            PipelineError::Cache(err) => write!(f, "Cache failure: {}", err),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<CacheError> for PipelineError {
    fn from(err: CacheError) -> Self {
        PipelineError::Cache(err)
    }
}
