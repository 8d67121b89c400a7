use thiserror::Error;

/// Errors from the terebi API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, TLS, timeout...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status. The body is not
    /// parsed; the status code alone is the contract.
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// The response body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The configured base URL is not a valid URL.
    #[error("invalid base URL: {0}")]
    BaseUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_matches_contract() {
        let err = ApiError::Status { status: 404 };
        assert_eq!(err.to_string(), "HTTP 404");

        let err = ApiError::Status { status: 500 };
        assert_eq!(err.to_string(), "HTTP 500");
    }
}
