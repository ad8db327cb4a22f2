//! # Invoker Module
//!
//! The invoker turns a logical function call (verb, function name, parameter
//! object) into a single HTTP exchange with the backend and normalizes what
//! comes back.
//!
//! ## Request Shape
//!
//! Every call targets `{base_address}/_functions/{function_name}`:
//!
//! - **GET**: params are JSON-encoded into one query parameter named `params`;
//!   no body is sent.
//! - **POST / PUT / DELETE / PATCH**: params are the JSON request body with
//!   `Content-Type: application/json`. Without params no body is sent.
//!
//! ```text
//! GET  http://x/api/v1/site/_functions/getUsers?params=%7B%22limit%22%3A10%7D
//! POST http://x/api/v1/site/_functions/updateStatus   {"id":1,"status":"done"}
//! ```
//!
//! ## Response Shape
//!
//! The backend answers with an envelope:
//!
//! ```json
//! { "data": { "result": [{ "id": 1 }] } }
//! ```
//!
//! - [`Invoker::call_full`] returns the parsed body as an [`Envelope`](crate::Envelope)
//!   without checking its shape.
//! - [`Invoker::call_result`] returns `data.result`, or `None` when the
//!   envelope has no `data`.
//!
//! ## Errors
//!
//! - Network failures surface as [`InvokeError::Transport`](crate::InvokeError::Transport)
//! - Non-2xx responses surface as [`InvokeError::Http`](crate::InvokeError::Http)
//!   with the status code; the body is not parsed
//! - Bodies that are not JSON surface as [`InvokeError::Parse`](crate::InvokeError::Parse)
//!
//! There are no retries and no timeouts at this layer.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fncall::{Invoker, InvokerConfig};
//! use serde_json::json;
//!
//! # async fn run() -> fncall::Result<()> {
//! let invoker = Invoker::new(InvokerConfig::new().base_address("http://x/api/v1/site"))?;
//! let users = invoker
//!     .call_result("GET", "getUsers", Some(&json!({ "limit": 10 })))
//!     .await?;
//! println!("{:?}", users);
//! # Ok(())
//! # }
//! ```

mod core;

pub use self::core::{Invoker, FUNCTIONS_SEGMENT, PARAMS_QUERY_KEY};
