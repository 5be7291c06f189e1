//! Estimation service failures

/// Why a call to the estimation service did not produce a plan
#[derive(Debug, thiserror::Error)]
pub enum EstimateError {
    /// No response arrived: connection refused, DNS, TLS, timeout
    #[error("estimation service unreachable: {0}")]
    Unreachable(String),

    /// The service answered with a non-success status
    #[error("estimation service returned HTTP {0}")]
    Status(u16),

    /// A success response whose body is not a plan
    #[error("estimation service returned an unreadable plan: {0}")]
    Malformed(String),

    #[error("{0}")]
    Unexpected(String),
}

impl EstimateError {
    /// Degraded availability: transport failures and any HTTP status >= 400.
    ///
    /// These are recovered by the local fallback plan. This deliberately does
    /// not separate a rejected request (4xx) from an outage.
    pub fn is_degraded(&self) -> bool {
        match self {
            Self::Unreachable(_) => true,
            Self::Status(code) => *code >= 400,
            Self::Malformed(_) | Self::Unexpected(_) => false,
        }
    }
}

impl From<ureq::Error> for EstimateError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => Self::Status(code),
            ureq::Error::Json(e) => Self::Malformed(e.to_string()),
            ureq::Error::BadUri(uri) => Self::Unexpected(format!("invalid service URL: {uri}")),
            other => Self::Unreachable(other.to_string()),
        }
    }
}
