use thiserror::Error;

/// Failure of a single forecast request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced an HTTP response (DNS, connect, TLS, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// The provider answered with a non-2xx status.
    #[error("Upstream responded with HTTP {0}")]
    UpstreamHttp(u16),

    /// The body could not be read or did not match the forecast shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Errors surfaced by the registry, the calculator and the view state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Hour index {index} out of range for {len} hourly samples")]
    IndexOutOfRange { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_mentions_status() {
        let err = WeatherError::from(FetchError::UpstreamHttp(403));
        assert_eq!(err.to_string(), "Upstream responded with HTTP 403");
    }

    #[test]
    fn index_error_mentions_bounds() {
        let err = WeatherError::IndexOutOfRange { index: 21, len: 12 };
        let msg = err.to_string();
        assert!(msg.contains("21"));
        assert!(msg.contains("12"));
    }
}
