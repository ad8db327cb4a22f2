//! # fncall
//!
//! **fncall** is a small client for invoking named functions on a backend over
//! HTTP. Every function lives at `{base_address}/_functions/{name}` and answers
//! with a `{ "data": { "result": ... } }` envelope.
//!
//! ## Architecture
//!
//! - **[`invoker`]** - builds the request for a verb, function name and
//!   parameter object, performs it and unwraps the envelope
//! - **[`dispatcher`]** - name-driven facade: `"<verb>_<function>"` keys map
//!   onto invoker calls
//! - **[`transport`]** - the seam to the network, with a `reqwest` default
//! - **[`config`]** - base address resolution, environment and YAML loading
//! - **[`logging`]** - `tracing-subscriber` setup
//! - **[`cli`]** - the `fncall` command line client
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Dispatcher
//!     participant Invoker
//!     participant Transport
//!     participant Backend
//!
//!     Caller->>Dispatcher: call("get_fetchThing", params)
//!     Dispatcher->>Dispatcher: resolve_dispatch_key
//!     Dispatcher->>Invoker: call_result("get", "fetchThing", params)
//!     Invoker->>Invoker: build_request<br/>(query for GET, body otherwise)
//!     Invoker->>Transport: send(FunctionRequest)
//!     Transport->>Backend: GET /_functions/fetchThing?params=...
//!     Backend-->>Transport: 200 {"data":{"result":...}}
//!     Transport-->>Invoker: TransportResponse
//!     Invoker-->>Dispatcher: data.result
//!     Dispatcher-->>Caller: Option<Value>
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use fncall::{Dispatcher, Invoker, InvokerConfig};
//! use serde_json::json;
//!
//! # async fn run() -> fncall::Result<()> {
//! let invoker = Invoker::new(InvokerConfig::new().base_address("http://x/api/v1/site"))?;
//!
//! // Explicit call, full envelope
//! let envelope = invoker.call_full("GET", "getUsers", Some(&json!({ "limit": 10 }))).await?;
//! println!("{}", envelope.as_value());
//!
//! // Name-driven call, unwrapped result
//! let api = Dispatcher::new(invoker);
//! let status = api.call("post_update_status", Some(&json!({ "id": 1 }))).await?;
//! println!("{:?}", status);
//! # Ok(())
//! # }
//! ```
//!
//! ## Runtime Considerations
//!
//! Calls are plain futures; there is no internal task, queue or lock. Run
//! independent calls concurrently with whatever combinator fits, e.g.
//! `futures::future::join_all` when each call must settle on its own.

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod invoker;
pub mod logging;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::{detect_site_id_from_env, InvokerConfig, API_PREFIX};
pub use dispatcher::{resolve_dispatch_key, DispatchKey, Dispatcher, RemoteFunction};
pub use error::{InvokeError, Result, TransportError};
pub use invoker::Invoker;
pub use transport::{FunctionRequest, ReqwestTransport, Transport, TransportResponse};
pub use types::{Envelope, Verb};
