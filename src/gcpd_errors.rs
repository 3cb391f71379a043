use thiserror::Error;

#[derive(Error, Debug)]
pub enum GcpdError {
    #[error("No usable data: {0}")]
    NoData(String),

    #[error("Unsupported document shape: {0}")]
    ParseState(String),

    #[error("Unknown photometric system: {0}")]
    UnknownSystem(String),

    #[error("Malformed markup: {0}")]
    MalformedMarkup(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP ureq error: {0}")]
    Http(#[from] ureq::Error),

    #[error("Unable to perform file operation: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<quick_xml::Error> for GcpdError {
    fn from(err: quick_xml::Error) -> Self {
        GcpdError::MalformedMarkup(err.to_string())
    }
}

impl PartialEq for GcpdError {
    fn eq(&self, other: &Self) -> bool {
        use GcpdError::*;
        match (self, other) {
            (NoData(a), NoData(b)) => a == b,
            (ParseState(a), ParseState(b)) => a == b,
            (UnknownSystem(a), UnknownSystem(b)) => a == b,
            (MalformedMarkup(a), MalformedMarkup(b)) => a == b,
            (InvalidConfig(a), InvalidConfig(b)) => a == b,
            (InvalidUrl(a), InvalidUrl(b)) => a == b,

            // foreign payloads are not comparable: same variant is enough
            (Http(_), Http(_)) => true,
            (Io(_), Io(_)) => true,
            (Json(_), Json(_)) => true,

            _ => false,
        }
    }
}

impl GcpdError {
    /// True for failures caused by the document content rather than the transport or the caller.
    pub fn is_document_error(&self) -> bool {
        matches!(
            self,
            GcpdError::NoData(_) | GcpdError::ParseState(_) | GcpdError::MalformedMarkup(_)
        )
    }
}
