pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The geocoding service answered, but with an empty ZIP record.
    #[error("zip '{zip}' not found")]
    NotFound { zip: String },

    #[error("unsupported feature {feature}")]
    UnsupportedFeature { feature: String },

    #[error("invalid argument {value} {reason}")]
    InvalidArgument { value: String, reason: String },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("miscellaneous/internal error: {0}")]
    Other(#[from] OtherError),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<curl::Error> for Error {
    fn from(value: curl::Error) -> Self {
        if value.is_couldnt_connect() {
            Self::Network(NetworkError::Connect(Box::new(value)))
        } else if value.is_couldnt_resolve_host() || value.is_couldnt_resolve_proxy() {
            Self::Network(NetworkError::Dns(Box::new(value)))
        } else if value.is_ssl_connect_error()
            || value.is_ssl_certproblem()
            || value.is_peer_failed_verification()
            || value.is_ssl_issuer_error()
        {
            Self::Protocol(ProtocolError::TlsVerification(Box::new(value)))
        } else if value.is_operation_timedout() {
            Self::Network(NetworkError::TimedOut(Box::new(value)))
        } else if value.is_got_nothing() || value.is_recv_error() || value.is_send_error() {
            Self::Network(NetworkError::Disconnected(Box::new(value)))
        } else {
            Self::Other(OtherError::from(value))
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(
            ParseError::new("malformed JSON response")
                .with_position(value.line(), value.column())
                .with_source(Box::new(value)),
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub struct ParseError {
    reason: String,
    position: Option<(usize, usize)>,
    #[source]
    source: Option<BoxedError>,
}

impl ParseError {
    pub fn new<S: Into<String>>(reason: S) -> Self {
        Self {
            reason: reason.into(),
            position: None,
            source: None,
        }
    }

    /// Records the 1-based line and column where parsing stopped.
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.position = Some((line, column));
        self
    }

    pub fn with_source(mut self, source: BoxedError) -> Self {
        self.source = Some(source);
        self
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn position(&self) -> Option<(usize, usize)> {
        self.position
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position {
            Some((line, column)) => write!(
                f,
                "parse error at line {} column {}: {}",
                line, column, self.reason
            )?,
            None => write!(f, "parse error: {}", self.reason)?,
        }

        if let Some(source) = &self.source {
            write!(f, " ({})", source)?;
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ProtocolError {
    #[error("protocol response error: {0}")]
    InvalidResponse(BoxedError),

    #[error("TLS verification error: {0}")]
    TlsVerification(BoxedError),
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NetworkError {
    #[error("connection error: {0}")]
    Connect(BoxedError),

    #[error("DNS resolution error: {0}")]
    Dns(BoxedError),

    #[error("network operation timed out: {0}")]
    TimedOut(BoxedError),

    #[error("connection disconnected: {0}")]
    Disconnected(BoxedError),
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OtherError {
    #[error(transparent)]
    Curl(#[from] curl::Error),

    #[error(transparent)]
    Custom(#[from] BoxedError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let error = Error::NotFound {
            zip: "99999".to_string(),
        };

        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "zip '99999' not found");
    }

    #[test]
    fn test_parse_error_from_json() {
        let json_error = serde_json::from_str::<Vec<u32>>("[1, 2").unwrap_err();
        let error = Error::from(json_error);

        match &error {
            Error::Parse(parse_error) => {
                assert_eq!(parse_error.reason(), "malformed JSON response");
                assert_eq!(parse_error.position().map(|p| p.0), Some(1));
            }
            _ => panic!("unexpected error {:?}", error),
        }

        assert!(error.to_string().starts_with("parse error at line 1"));
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_parse_error_without_position() {
        let error = ParseError::new("HTTP response header incomplete");

        assert_eq!(
            error.to_string(),
            "parse error: HTTP response header incomplete"
        );
    }
}
