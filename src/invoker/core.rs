use crate::config::{detect_site_id_from_env, InvokerConfig};
use crate::error::{InvokeError, Result};
use crate::transport::{FunctionRequest, ReqwestTransport, Transport};
use crate::types::{Envelope, Verb};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Path segment that roots every function endpoint under the base address.
pub const FUNCTIONS_SEGMENT: &str = "_functions";

/// Name of the query parameter carrying GET params.
pub const PARAMS_QUERY_KEY: &str = "params";

/// Turns a logical function call into one HTTP exchange.
///
/// Holds nothing but the resolved base address and the transport, so a shared
/// reference can serve any number of concurrent calls.
#[derive(Debug)]
pub struct Invoker<T = ReqwestTransport> {
    base_address: String,
    endpoint_root: Url,
    transport: T,
}

impl Invoker<ReqwestTransport> {
    /// Create an invoker with the default `reqwest` transport.
    ///
    /// The site identifier is read from `FNCALL_SITE_ID`, once, and only when
    /// the config carries no base address.
    pub fn new(config: InvokerConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout_ms).map_err(InvokeError::Transport)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Invoker<T> {
    pub fn with_transport(config: InvokerConfig, transport: T) -> Result<Self> {
        Self::with_transport_and_detector(config, transport, detect_site_id_from_env)
    }

    /// Create an invoker with an explicit site identifier detector.
    pub fn with_transport_and_detector<F>(
        config: InvokerConfig,
        transport: T,
        detect_site_id: F,
    ) -> Result<Self>
    where
        F: FnOnce() -> Option<String>,
    {
        let base_address = config.resolve_base_address(detect_site_id);
        let endpoint_root = absolute_root(&base_address, config.origin.as_deref())?;
        debug!(
            base_address = %base_address,
            endpoint_root = %endpoint_root,
            "Invoker created"
        );
        Ok(Self {
            base_address,
            endpoint_root,
            transport,
        })
    }

    /// Base address as resolved at construction.
    #[must_use]
    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Call `function_name` and return the parsed response body verbatim.
    ///
    /// GET sends `params` as the JSON-encoded `params` query parameter; every
    /// other verb sends it as the JSON request body. Without params no query
    /// parameter and no body is sent. A non-2xx status fails with
    /// [`InvokeError::Http`] before the body is looked at.
    pub async fn call_full(
        &self,
        verb: &str,
        function_name: &str,
        params: Option<&Value>,
    ) -> Result<Envelope> {
        let verb: Verb = verb.parse()?;
        let request = self.build_request(verb, function_name, params)?;
        debug!(
            verb = %verb,
            function = function_name,
            url = %request.url,
            has_body = request.body.is_some(),
            "Calling remote function"
        );

        let response = self
            .transport
            .send(request)
            .await
            .map_err(InvokeError::Transport)?;

        if !response.is_success() {
            warn!(
                verb = %verb,
                function = function_name,
                status = response.status,
                "Remote function returned non-success status"
            );
            return Err(InvokeError::Http {
                function: function_name.to_string(),
                status: response.status,
            });
        }

        let body: Value = serde_json::from_slice(&response.body).map_err(InvokeError::Parse)?;
        debug!(
            function = function_name,
            status = response.status,
            "Remote function completed"
        );
        Ok(Envelope::new(body))
    }

    /// Call `function_name` and return `data.result` from the envelope.
    ///
    /// Returns `Ok(None)` when the envelope has no `data` (or no
    /// `data.result`); a missing result is not treated as an error.
    pub async fn call_result(
        &self,
        verb: &str,
        function_name: &str,
        params: Option<&Value>,
    ) -> Result<Option<Value>> {
        let envelope = self.call_full(verb, function_name, params).await?;
        Ok(envelope.into_result())
    }

    /// [`Invoker::call_result`] decoded into `R`.
    pub async fn call_result_as<R>(
        &self,
        verb: &str,
        function_name: &str,
        params: Option<&Value>,
    ) -> Result<Option<R>>
    where
        R: DeserializeOwned,
    {
        match self.call_result(verb, function_name, params).await? {
            Some(result) => serde_json::from_value(result)
                .map(Some)
                .map_err(InvokeError::Decode),
            None => Ok(None),
        }
    }

    /// Build the outbound request without sending it.
    pub fn build_request(
        &self,
        verb: Verb,
        function_name: &str,
        params: Option<&Value>,
    ) -> Result<FunctionRequest> {
        if function_name.is_empty() {
            return Err(InvokeError::EmptyFunctionName);
        }
        if matches!(function_name, "." | "..") {
            return Err(InvokeError::InvalidFunctionName {
                name: function_name.to_string(),
            });
        }

        // Pushed as one segment: `/`, `?`, `#` and `%` in the name are escaped
        let mut url = self.endpoint_root.clone();
        url.path_segments_mut()
            .map_err(|()| InvokeError::InvalidAddress {
                address: self.endpoint_root.to_string(),
                reason: "base address cannot carry path segments".to_string(),
            })?
            .pop_if_empty()
            .push(FUNCTIONS_SEGMENT)
            .push(function_name);

        let body = match (verb.is_read_only(), params) {
            (true, Some(params)) => {
                let encoded = serde_json::to_string(params).map_err(InvokeError::Serialize)?;
                url.query_pairs_mut().append_pair(PARAMS_QUERY_KEY, &encoded);
                None
            }
            (false, Some(params)) => {
                Some(serde_json::to_vec(params).map_err(InvokeError::Serialize)?)
            }
            (_, None) => None,
        };

        Ok(FunctionRequest {
            method: verb.method(),
            url,
            body,
        })
    }
}

/// Absolute form of `base_address` with trailing slashes removed.
fn absolute_root(base_address: &str, origin: Option<&str>) -> Result<Url> {
    let trimmed = base_address.trim_end_matches('/');
    let absolute = if trimmed.starts_with('/') || trimmed.is_empty() {
        match origin {
            Some(origin) => format!("{}{}", origin.trim_end_matches('/'), trimmed),
            None => {
                return Err(InvokeError::InvalidAddress {
                    address: base_address.to_string(),
                    reason: "relative base address requires an origin".to_string(),
                })
            }
        }
    } else {
        trimmed.to_string()
    };

    let url = Url::parse(&absolute).map_err(|e| InvokeError::InvalidAddress {
        address: absolute.clone(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() || url.query().is_some() || url.fragment().is_some() {
        return Err(InvokeError::InvalidAddress {
            address: absolute,
            reason: "base address must be a hierarchical URL without a query or fragment"
                .to_string(),
        });
    }
    Ok(url)
}
