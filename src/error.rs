use std::fmt;

/// Error returned by the underlying transport when a request cannot complete
/// (DNS, connection refused, timeout, ...).
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, InvokeError>;

/// Failure of a remote function call.
///
/// Every variant is surfaced to the caller unchanged; nothing in the invoker
/// catches, retries or downgrades an error. The one lenient case, an envelope
/// without `data.result`, is not an error at all and shows up as `None` from
/// [`Invoker::call_result`](crate::Invoker::call_result).
#[derive(Debug)]
pub enum InvokeError {
    /// The verb is not one of GET, POST, PUT, DELETE, PATCH
    UnsupportedVerb {
        /// The token as supplied by the caller
        verb: String,
    },
    /// The function name was empty
    EmptyFunctionName,
    /// The function name cannot stand as a single path segment (`.` or `..`)
    InvalidFunctionName {
        /// The name as supplied by the caller
        name: String,
    },
    /// A dispatch key without the `<verb>_<function>` separator
    InvalidDispatchKey {
        /// The key as supplied by the caller
        key: String,
    },
    /// The base address (or the URL derived from it) is not a usable URL
    InvalidAddress {
        /// The offending address
        address: String,
        /// Why it was rejected
        reason: String,
    },
    /// The parameter object could not be serialized to JSON
    Serialize(serde_json::Error),
    /// The network call itself did not complete
    Transport(TransportError),
    /// A response arrived with a non-2xx status
    Http {
        /// Function that was called
        function: String,
        /// HTTP status code of the response
        status: u16,
    },
    /// The response body is not valid JSON
    Parse(serde_json::Error),
    /// The unwrapped result does not match the requested Rust type
    Decode(serde_json::Error),
}

impl InvokeError {
    /// HTTP status code for [`InvokeError::Http`], `None` otherwise.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            InvokeError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the request never produced a response.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, InvokeError::Transport(_))
    }
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvokeError::UnsupportedVerb { verb } => write!(
                f,
                "unsupported verb '{}': expected one of GET, POST, PUT, DELETE, PATCH",
                verb
            ),
            InvokeError::EmptyFunctionName => write!(f, "function name must not be empty"),
            InvokeError::InvalidFunctionName { name } => {
                write!(f, "invalid function name '{}': not a path segment", name)
            }
            InvokeError::InvalidDispatchKey { key } => write!(
                f,
                "invalid dispatch key '{}': expected <verb>_<functionName>",
                key
            ),
            InvokeError::InvalidAddress { address, reason } => {
                write!(f, "invalid address '{}': {}", address, reason)
            }
            InvokeError::Serialize(e) => write!(f, "failed to serialize params: {}", e),
            InvokeError::Transport(e) => write!(f, "transport failure: {}", e),
            InvokeError::Http { function, status } => {
                write!(f, "HTTP error calling '{}': status {}", function, status)
            }
            InvokeError::Parse(e) => write!(f, "response body is not valid JSON: {}", e),
            InvokeError::Decode(e) => write!(f, "failed to decode function result: {}", e),
        }
    }
}

impl std::error::Error for InvokeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvokeError::Serialize(e) | InvokeError::Parse(e) | InvokeError::Decode(e) => Some(e),
            InvokeError::Transport(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
