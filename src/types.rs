//! Shared request and response model: the verb enumeration and the response
//! envelope returned by the backend.

use crate::error::InvokeError;
use http::Method;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// HTTP verb a remote function is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Verb {
    /// All supported verbs.
    pub const ALL: [Verb; 5] = [Verb::Get, Verb::Post, Verb::Put, Verb::Delete, Verb::Patch];

    /// Normalized lowercase token (`"get"`, `"post"`, ...)
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Put => "put",
            Verb::Delete => "delete",
            Verb::Patch => "patch",
        }
    }

    /// Method sent on the wire
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
            Verb::Patch => Method::PATCH,
        }
    }

    /// GET carries its params in the query string, never in a body.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        matches!(self, Verb::Get)
    }
}

impl FromStr for Verb {
    type Err = InvokeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Verb::Get),
            "post" => Ok(Verb::Post),
            "put" => Ok(Verb::Put),
            "delete" => Ok(Verb::Delete),
            "patch" => Ok(Verb::Patch),
            _ => Err(InvokeError::UnsupportedVerb {
                verb: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed response body, kept verbatim.
///
/// The backend wraps results as `{ "data": { "result": ... } }`. No shape
/// validation happens when an `Envelope` is built; the accessors below are
/// lenient and report a missing level as `None` instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope(Value);

impl Envelope {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The `data` member, if present.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.0.get("data")
    }

    /// `data.result`, or `None` when either level is absent.
    ///
    /// An explicit `"result": null` is returned as `Some(Value::Null)`.
    #[must_use]
    pub fn result(&self) -> Option<&Value> {
        self.data().and_then(|data| data.get("result"))
    }

    /// Owned variant of [`Envelope::result`].
    #[must_use]
    pub fn into_result(self) -> Option<Value> {
        match self.0 {
            Value::Object(mut body) => match body.remove("data") {
                Some(Value::Object(mut data)) => data.remove("result"),
                _ => None,
            },
            _ => None,
        }
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for Envelope {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
