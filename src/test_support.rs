//! In-memory transport used by the unit tests.

use crate::error::TransportError;
use crate::transport::{FunctionRequest, Transport, TransportResponse};
use parking_lot::Mutex;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

type Responder =
    dyn Fn(&FunctionRequest) -> Result<TransportResponse, TransportError> + Send + Sync;

/// Records every request and answers with a caller-supplied responder.
#[derive(Clone)]
pub struct RecordingTransport {
    requests: Arc<Mutex<Vec<FunctionRequest>>>,
    responder: Arc<Responder>,
}

impl RecordingTransport {
    pub fn responding<F>(responder: F) -> Self
    where
        F: Fn(&FunctionRequest) -> Result<TransportResponse, TransportError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            responder: Arc::new(responder),
        }
    }

    /// Always answers `status` with `body`.
    pub fn fixed(status: u16, body: &str) -> Self {
        let body = body.as_bytes().to_vec();
        Self::responding(move |_| {
            Ok(TransportResponse {
                status,
                body: body.clone(),
            })
        })
    }

    pub fn requests(&self) -> Vec<FunctionRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> FunctionRequest {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

impl fmt::Debug for RecordingTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingTransport")
            .field("requests", &self.requests.lock().len())
            .finish()
    }
}

impl Transport for RecordingTransport {
    fn send(
        &self,
        request: FunctionRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send {
        let outcome = (self.responder)(&request);
        self.requests.lock().push(request);
        async move { outcome }
    }
}

/// Decoded value of the `params` query parameter, if any.
pub fn query_params(request: &FunctionRequest) -> Option<serde_json::Value> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == "params")
        .map(|(_, v)| serde_json::from_str(&v).expect("params query is JSON"))
}
