//! Common error.

use crate::envelope::Envelope;

/// Common error.
#[derive(Debug)]
pub enum Error {
    /// A required configuration value is absent or empty.
    ConfigurationMissing(String),
    /// The outbound request could not be completed.
    TransportFailure(String),
    /// The downstream response body could not be read.
    BodyReadFailure(String),
    /// A payload could not be encoded as JSON.
    SerializationFailure(serde_json::Error),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::SerializationFailure(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ConfigurationMissing(name) => {
                write!(f, "{} not configured", name)
            },
            Error::TransportFailure(s) => write!(f, "transport failure: {}", s),
            Error::BodyReadFailure(s) => write!(f, "body read failure: {}", s),
            Error::SerializationFailure(e) => {
                write!(f, "serde_json::Error: {}", e)
            },
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationFailure(e)
    }
}

impl Error {
    /// Message put in the `error` field of the response body.
    pub fn public_message(&self) -> String {
        match self {
            Error::ConfigurationMissing(name) => {
                format!("{} environment variable not set", name)
            },
            Error::TransportFailure(s) => {
                format!("Failed to invoke target lambda: {}", s)
            },
            Error::BodyReadFailure(s) => {
                format!("Failed to read response: {}", s)
            },
            Error::SerializationFailure(_) => {
                "Failed to marshal response".to_string()
            },
        }
    }
}

/// Failed invocation.
///
/// Carries both the envelope returned to the caller and the error reported to
/// the invoking infrastructure.
#[derive(Debug)]
pub struct Failure {
    /// Status 500 envelope with an `error` body.
    pub response: Envelope,
    /// Underlying cause.
    pub error: Error,
}

impl Failure {
    /// Wraps an error into an error envelope.
    pub fn new(error: Error) -> Self {
        Self {
            response: Envelope::error(&error.public_message()),
            error,
        }
    }

    /// Splits into the envelope and the error.
    pub fn into_parts(self) -> (Envelope, Error) {
        (self.response, self.error)
    }
}

impl From<Error> for Failure {
    fn from(e: Error) -> Self {
        Failure::new(e)
    }
}

impl std::error::Error for Failure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.error, self.response.status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_of_missing_configuration_has_exact_body() {
        let failure = Failure::new(
            Error::ConfigurationMissing("TARGET_API_URL".to_string()),
        );
        assert_eq!(failure.response.status_code, 500);
        assert_eq!(
            failure.response.body,
            r#"{"error": "TARGET_API_URL environment variable not set"}"#,
        );
    }

    #[test]
    fn failure_body_stays_valid_json_with_quoted_error_text() {
        let failure = Failure::new(
            Error::TransportFailure(r#"bad "host" \ here"#.to_string()),
        );
        let body: serde_json::Value =
            serde_json::from_str(&failure.response.body).unwrap();
        assert_eq!(
            body["error"],
            r#"Failed to invoke target lambda: bad "host" \ here"#,
        );
    }

    #[test]
    fn serialization_failure_uses_fixed_message() {
        let e = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let (response, error) = Failure::new(e.into()).into_parts();
        assert_eq!(response.body, r#"{"error": "Failed to marshal response"}"#);
        assert!(matches!(error, Error::SerializationFailure(_)));
    }
}
