use crate::error::{InvokeError, Result};
use crate::invoker::Invoker;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::Verb;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Separator between the verb and the function name in a dispatch key.
pub const DISPATCH_SEPARATOR: char = '_';

/// A dispatch key split into its verb and function name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchKey {
    pub verb: Verb,
    pub function_name: String,
}

/// Split `<verb>_<functionName>` at the first `_`.
///
/// The verb is matched case-insensitively. Everything after the first
/// separator is the function name, so `post_update_status` resolves to
/// `(Post, "update_status")`.
pub fn resolve_dispatch_key(key: &str) -> Result<DispatchKey> {
    let (verb, function_name) = key.split_once(DISPATCH_SEPARATOR).ok_or_else(|| {
        InvokeError::InvalidDispatchKey {
            key: key.to_string(),
        }
    })?;
    let verb: Verb = verb.parse()?;
    if function_name.is_empty() {
        return Err(InvokeError::EmptyFunctionName);
    }
    Ok(DispatchKey {
        verb,
        function_name: function_name.to_string(),
    })
}

/// Name-driven facade over a single [`Invoker`].
///
/// Any key is accepted; it is only interpreted when the call is made.
#[derive(Debug)]
pub struct Dispatcher<T = ReqwestTransport> {
    invoker: Arc<Invoker<T>>,
}

impl<T> Clone for Dispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            invoker: Arc::clone(&self.invoker),
        }
    }
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(invoker: Invoker<T>) -> Self {
        Self {
            invoker: Arc::new(invoker),
        }
    }

    pub fn from_shared(invoker: Arc<Invoker<T>>) -> Self {
        Self { invoker }
    }

    #[must_use]
    pub fn invoker(&self) -> &Invoker<T> {
        &self.invoker
    }

    /// Callable for `key`. Resolution is deferred to [`RemoteFunction::call`].
    pub fn function(&self, key: impl Into<String>) -> RemoteFunction<T> {
        RemoteFunction {
            invoker: Arc::clone(&self.invoker),
            key: key.into(),
        }
    }

    /// Resolve `key` and return the unwrapped result of the call.
    pub async fn call(&self, key: &str, params: Option<&Value>) -> Result<Option<Value>> {
        dispatch(&self.invoker, key, params).await
    }

    /// [`Dispatcher::call`] decoded into `R`.
    pub async fn call_as<R>(&self, key: &str, params: Option<&Value>) -> Result<Option<R>>
    where
        R: DeserializeOwned,
    {
        decode(dispatch(&self.invoker, key, params).await?)
    }
}

/// Callable bound to one dispatch key.
#[derive(Debug)]
pub struct RemoteFunction<T = ReqwestTransport> {
    invoker: Arc<Invoker<T>>,
    key: String,
}

impl<T> Clone for RemoteFunction<T> {
    fn clone(&self) -> Self {
        Self {
            invoker: Arc::clone(&self.invoker),
            key: self.key.clone(),
        }
    }
}

impl<T: Transport> RemoteFunction<T> {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn call(&self, params: Option<&Value>) -> Result<Option<Value>> {
        dispatch(&self.invoker, &self.key, params).await
    }

    pub async fn call_as<R>(&self, params: Option<&Value>) -> Result<Option<R>>
    where
        R: DeserializeOwned,
    {
        decode(dispatch(&self.invoker, &self.key, params).await?)
    }
}

async fn dispatch<T: Transport>(
    invoker: &Invoker<T>,
    key: &str,
    params: Option<&Value>,
) -> Result<Option<Value>> {
    let resolved = resolve_dispatch_key(key)?;
    debug!(
        key = key,
        verb = %resolved.verb,
        function = %resolved.function_name,
        "Dispatch key resolved"
    );
    invoker
        .call_result(resolved.verb.as_str(), &resolved.function_name, params)
        .await
}

fn decode<R: DeserializeOwned>(result: Option<Value>) -> Result<Option<R>> {
    result
        .map(|value| serde_json::from_value(value).map_err(InvokeError::Decode))
        .transpose()
}
