use super::{resolve_dispatch_key, Dispatcher};
use crate::config::InvokerConfig;
use crate::error::InvokeError;
use crate::invoker::Invoker;
use crate::test_support::{query_params, RecordingTransport};
use crate::transport::TransportResponse;
use crate::types::Verb;
use serde_json::{json, Value};

fn dispatcher(transport: RecordingTransport) -> Dispatcher<RecordingTransport> {
    let invoker = Invoker::with_transport_and_detector(
        InvokerConfig::new().base_address("http://x/api/v1/site"),
        transport,
        || None,
    )
    .unwrap();
    Dispatcher::new(invoker)
}

/// Echoes the function name and params back inside the envelope.
fn echo_transport() -> RecordingTransport {
    RecordingTransport::responding(|request| {
        let function = request
            .url
            .path_segments()
            .and_then(|mut s| s.next_back())
            .unwrap_or_default()
            .to_string();
        let params = match &request.body {
            Some(body) => serde_json::from_slice::<Value>(body).unwrap(),
            None => query_params(request).unwrap_or(Value::Null),
        };
        let body = json!({"data": {"result": {"function": function, "params": params}}});
        Ok(TransportResponse {
            status: 200,
            body: body.to_string().into_bytes(),
        })
    })
}

#[test]
fn test_resolve_simple_key() {
    let key = resolve_dispatch_key("get_fetchThing").unwrap();
    assert_eq!(key.verb, Verb::Get);
    assert_eq!(key.function_name, "fetchThing");
}

#[test]
fn test_resolve_key_with_embedded_separator() {
    let key = resolve_dispatch_key("post_update_status").unwrap();
    assert_eq!(key.verb, Verb::Post);
    assert_eq!(key.function_name, "update_status");

    let key = resolve_dispatch_key("delete_a__b_").unwrap();
    assert_eq!(key.verb, Verb::Delete);
    assert_eq!(key.function_name, "a__b_");
}

#[test]
fn test_resolve_key_verb_case_insensitive() {
    assert_eq!(resolve_dispatch_key("GET_users").unwrap().verb, Verb::Get);
    assert_eq!(resolve_dispatch_key("Put_users").unwrap().verb, Verb::Put);
}

#[test]
fn test_resolve_key_errors() {
    assert!(matches!(
        resolve_dispatch_key("fetchThing"),
        Err(InvokeError::InvalidDispatchKey { .. })
    ));
    assert!(matches!(
        resolve_dispatch_key("get_"),
        Err(InvokeError::EmptyFunctionName)
    ));
    assert!(matches!(
        resolve_dispatch_key("fetch_thing"),
        Err(InvokeError::UnsupportedVerb { ref verb }) if verb == "fetch"
    ));
    assert!(matches!(
        resolve_dispatch_key("_thing"),
        Err(InvokeError::UnsupportedVerb { .. })
    ));
}

#[tokio::test]
async fn test_dispatch_matches_invoker_call_result() {
    let transport = echo_transport();
    let api = dispatcher(transport.clone());
    let params = json!({"test": "data"});

    let via_dispatcher = api.call("get_fetchThing", Some(&params)).await.unwrap();
    let via_invoker = api
        .invoker()
        .call_result("get", "fetchThing", Some(&params))
        .await
        .unwrap();
    assert_eq!(via_dispatcher, via_invoker);

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], requests[1]);
}

#[tokio::test]
async fn test_function_callable_uses_full_function_name() {
    let transport = echo_transport();
    let api = dispatcher(transport.clone());

    let update = api.function("post_update_status");
    assert_eq!(update.key(), "post_update_status");
    let result = update.call(Some(&json!({"id": 1}))).await.unwrap();
    assert_eq!(
        result,
        Some(json!({"function": "update_status", "params": {"id": 1}}))
    );

    let request = transport.last_request();
    assert_eq!(request.method, http::Method::POST);
    assert_eq!(
        request.url.as_str(),
        "http://x/api/v1/site/_functions/update_status"
    );
}

#[tokio::test]
async fn test_any_key_yields_a_callable() {
    let transport = echo_transport();
    let api = dispatcher(transport.clone());

    // Producing the callable never fails; the bad key surfaces on call.
    let bogus = api.function("notAKey");
    let err = bogus.call(None).await.unwrap_err();
    assert!(matches!(err, InvokeError::InvalidDispatchKey { .. }));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_dispatch_propagates_http_errors() {
    let api = dispatcher(RecordingTransport::fixed(404, "{}"));
    let err = api.call("get_missing", None).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_call_as_decodes_result() {
    let api = dispatcher(RecordingTransport::fixed(200, r#"{"data":{"result":42}}"#));
    let n: Option<u64> = api.call_as("get_answer", None).await.unwrap();
    assert_eq!(n, Some(42));

    let n: Option<u64> = api.function("get_answer").call_as(None).await.unwrap();
    assert_eq!(n, Some(42));
}

#[tokio::test]
async fn test_call_as_absent_result_is_none() {
    let api = dispatcher(RecordingTransport::fixed(200, r#"{"ok":true}"#));
    let n: Option<u64> = api.call_as("get_answer", None).await.unwrap();
    assert_eq!(n, None);
}

#[test]
fn test_clones_share_one_invoker() {
    let api = dispatcher(echo_transport());
    let clone = api.clone();
    assert!(std::ptr::eq(api.invoker(), clone.invoker()));
}
