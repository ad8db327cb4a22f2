#![allow(dead_code)]

use fncall::ReqwestTransport;

/// Transport that never routes loopback test traffic through a system proxy.
pub fn local_transport() -> ReqwestTransport {
    ReqwestTransport::from_client(reqwest::Client::builder().no_proxy().build().unwrap())
}

pub mod mock_backend {
    use parking_lot::Mutex;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::thread;
    use tiny_http::{Header, Response, Server};

    /// A request as the backend saw it.
    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub method: String,
        /// Path plus query, as sent
        pub url: String,
        pub content_type: Option<String>,
        pub body: String,
    }

    impl RecordedRequest {
        pub fn path(&self) -> &str {
            self.url.split('?').next().unwrap_or_default()
        }

        /// Decoded value of the `params` query parameter.
        pub fn query_params(&self) -> Option<Value> {
            let query = self.url.split_once('?')?.1;
            let parsed = url::Url::parse(&format!("http://mock/?{}", query)).unwrap();
            parsed
                .query_pairs()
                .find(|(k, _)| k == "params")
                .map(|(_, v)| serde_json::from_str(&v).unwrap())
        }
    }

    type Handler = dyn Fn(&RecordedRequest) -> (u16, String) + Send + Sync;

    /// Mock function backend on an ephemeral port.
    ///
    /// The server thread lives for the rest of the test process.
    pub struct MockBackend {
        pub base_address: String,
        requests: Arc<Mutex<Vec<RecordedRequest>>>,
    }

    impl MockBackend {
        pub fn start<F>(handler: F) -> Self
        where
            F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
        {
            let server = Server::http("127.0.0.1:0").unwrap();
            let addr = server.server_addr().to_ip().unwrap();
            let requests = Arc::new(Mutex::new(Vec::new()));
            let recorded = Arc::clone(&requests);
            let handler: Arc<Handler> = Arc::new(handler);

            thread::spawn(move || {
                for mut request in server.incoming_requests() {
                    let mut body = String::new();
                    let _ = request.as_reader().read_to_string(&mut body);
                    let content_type = request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv("Content-Type"))
                        .map(|h| h.value.as_str().to_string());
                    let seen = RecordedRequest {
                        method: request.method().to_string(),
                        url: request.url().to_string(),
                        content_type,
                        body,
                    };
                    let (status, reply) = handler(&seen);
                    recorded.lock().push(seen);

                    let header =
                        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
                    let response = Response::from_string(reply)
                        .with_status_code(status)
                        .with_header(header);
                    let _ = request.respond(response);
                }
            });

            Self {
                base_address: format!("http://{}/api/v1/site", addr),
                requests,
            }
        }

        /// Always answers 200 with `{"data":{"result": result}}`.
        pub fn returning(result: Value) -> Self {
            let body = json!({ "data": { "result": result } }).to_string();
            Self::start(move |_| (200, body.clone()))
        }

        /// Answers every request with `status` and `body`.
        pub fn with_status(status: u16, body: &str) -> Self {
            let body = body.to_string();
            Self::start(move |_| (status, body.clone()))
        }

        /// Echoes method, path and params back as the result.
        pub fn echo() -> Self {
            Self::start(|req| {
                let params = if req.body.is_empty() {
                    req.query_params().unwrap_or(Value::Null)
                } else {
                    serde_json::from_str(&req.body).unwrap_or(Value::Null)
                };
                let result = json!({
                    "method": req.method,
                    "path": req.path(),
                    "params": params,
                });
                (200, json!({ "data": { "result": result } }).to_string())
            })
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().clone()
        }

        pub fn last_request(&self) -> RecordedRequest {
            self.requests.lock().last().cloned().unwrap()
        }
    }
}
