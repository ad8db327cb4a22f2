//! # Dispatcher Module
//!
//! Open-ended, name-driven calling convention over an [`Invoker`](crate::Invoker).
//!
//! ## Dispatch Keys
//!
//! A key has the form `<verb>_<functionName>`:
//!
//! | Key | Verb | Function |
//! |-----|------|----------|
//! | `get_fetchThing` | GET | `fetchThing` |
//! | `POST_createUser` | POST | `createUser` |
//! | `post_update_status` | POST | `update_status` |
//!
//! The key is split at the first `_`; the verb is case-insensitive and the
//! function name keeps any further underscores. Parameters are always a
//! single JSON object.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fncall::{Dispatcher, Invoker, InvokerConfig};
//! use serde_json::json;
//!
//! # async fn run() -> fncall::Result<()> {
//! let api = Dispatcher::new(Invoker::new(InvokerConfig::from_env())?);
//!
//! // Same as invoker.call_result("get", "fetchThing", ...)
//! let thing = api.call("get_fetchThing", Some(&json!({ "test": "data" }))).await?;
//!
//! // Or keep a callable around
//! let update = api.function("post_update_status");
//! update.call(Some(&json!({ "id": 1, "status": "done" }))).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! The dispatcher holds only an `Arc` to its invoker; clones share it and
//! calls never share request state. There is no batching here. Compose
//! independent calls with `futures::future::join_all` (every call settles on
//! its own) rather than `try_join_all` when one failure must not hide the
//! others.

mod core;
#[cfg(test)]
mod tests;

pub use self::core::{
    resolve_dispatch_key, DispatchKey, Dispatcher, RemoteFunction, DISPATCH_SEPARATOR,
};
