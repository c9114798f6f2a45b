use std::fmt;

pub type SubmissionId = u64;

/// One call against the license service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    /// `GET licenses?target=...`
    LookupByUrl { target: String },
    /// `POST licenses` with the POM text as `application/xml`.
    SubmitPom { content: String },
    /// `GET caches`
    DumpCaches,
    /// `DELETE caches`
    ClearCaches,
}

impl ApiCall {
    pub fn method(&self) -> reqwest::Method {
        match self {
            ApiCall::LookupByUrl { .. } | ApiCall::DumpCaches => reqwest::Method::GET,
            ApiCall::SubmitPom { .. } => reqwest::Method::POST,
            ApiCall::ClearCaches => reqwest::Method::DELETE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub json: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Completed {
        submission_id: SubmissionId,
        result: Result<ApiResponse, ClientError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientError {
    pub kind: FailureKind,
    /// For `HttpStatus` this is the raw response body.
    pub message: String,
}

impl ClientError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Text to put in front of the user: the body verbatim for a remote
    /// failure, a short description otherwise.
    pub fn user_message(&self) -> String {
        match self.kind {
            FailureKind::HttpStatus(_) => self.message.clone(),
            _ => format!("{}: {}", self.kind, self.message),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ClientError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    MalformedJson,
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedJson => write!(f, "malformed json response"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
