use std::error::Error as StdError;
use std::fmt;

/// Error type for the buying assistant client
///
/// Represents the failures that can occur while talking to the assistant backend
/// or while setting up a session.
///
/// # Example
///
/// ```rust
/// use buying_assistant::Error;
///
/// fn describe(error: Error) {
///     match error {
///         Error::Request(e) => eprintln!("Network error: {}", e),
///         Error::Response(msg, status) => {
///             eprintln!("Backend error: {} (status: {:?})", msg, status)
///         },
///         Error::Parse(e) => eprintln!("Failed to decode response: {}", e),
///         Error::Config(msg) => eprintln!("Bad configuration: {}", msg),
///         Error::EmptyInput => eprintln!("Nothing to send"),
///         Error::Other(msg) => eprintln!("Error: {}", msg),
///     }
/// }
/// ```
#[derive(Debug)]
pub enum Error {
    /// HTTP transport error
    Request(reqwest::Error),
    /// Backend answered with a non-success status
    Response(String, Option<u16>),
    /// JSON decoding error
    Parse(serde_json::Error),
    /// Invalid or missing configuration value
    Config(String),
    /// The utterance was empty after trimming
    EmptyInput,
    /// Other errors
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Request(e) => write!(f, "Request error: {}", e),
            Error::Response(msg, status) => match status {
                Some(code) => write!(f, "Backend error (status {}): {}", code, msg),
                None => write!(f, "Backend error: {}", msg),
            },
            Error::Parse(e) => write!(f, "Parse error: {}", e),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::EmptyInput => write!(f, "Input is empty"),
            Error::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Request(e) => Some(e),
            Error::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Request(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Config(format!("invalid URL: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
