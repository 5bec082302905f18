//! HTTP dispatch: first-match-wins, decline semantics, buffered responses.

use portico::{DispatchOutcome, Dispatcher, Server};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

mod tracing_util;
use tracing_util::TestTracing;

fn wire_text(wire: Vec<u8>) -> String {
    String::from_utf8(wire).expect("response should be valid UTF-8")
}

#[test]
fn test_handled_request_writes_exactly_one_response() {
    let _tracing = TestTracing::init();
    let mut dispatcher = Dispatcher::new();
    dispatcher
        .register_for_method("PUT|GET", "/A", |_req, res| {
            res.set_status(200, "OK");
            res.append("<html><body><h2>This is the A handler</h2></body></html>\n");
            true
        })
        .unwrap();

    let mut wire = Vec::new();
    let outcome = dispatcher.dispatch("GET", "/A", "", &mut wire).unwrap();

    assert_eq!(outcome, DispatchOutcome::Handled);
    let text = wire_text(wire);
    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.contains("Content-Type: text/html\r\n"));
    assert!(text.contains("Connection: close\r\n"));
    assert!(text.ends_with("<html><body><h2>This is the A handler</h2></body></html>\n"));
}

#[test]
fn test_unset_status_defaults_to_500() {
    let mut dispatcher = Dispatcher::new();
    dispatcher
        .register("/B", |_req, res| {
            res.append("body without status");
            true
        })
        .unwrap();

    let mut wire = Vec::new();
    dispatcher.dispatch("GET", "/B", "", &mut wire).unwrap();
    assert!(wire_text(wire).starts_with("HTTP/1.1 500 unknown server error\r\n"));
}

#[test]
fn test_declined_handler_writes_nothing_and_stops_dispatch() {
    let later = Arc::new(AtomicUsize::new(0));
    let later_calls = Arc::clone(&later);

    let mut dispatcher = Dispatcher::new();
    dispatcher
        .register("/(index.*)?", |_req, res| {
            // Declining discards everything buffered so far.
            res.set_status(200, "OK");
            res.append("never sent");
            false
        })
        .unwrap();
    // Also matches "/", but a decline defers to the engine, never to later
    // entries.
    dispatcher
        .register("/.*", move |_req, _res| {
            later_calls.fetch_add(1, Ordering::SeqCst);
            true
        })
        .unwrap();

    let mut wire = Vec::new();
    let outcome = dispatcher.dispatch("GET", "/", "", &mut wire).unwrap();

    assert_eq!(outcome, DispatchOutcome::NotHandled);
    assert!(wire.is_empty());
    assert_eq!(later.load(Ordering::SeqCst), 0);
}

#[test]
fn test_no_match_synthesizes_404() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register("/only", |_req, _res| true).unwrap();

    let mut wire = Vec::new();
    let outcome = dispatcher
        .dispatch("GET", "/missing", "", &mut wire)
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Handled);
    let text = wire_text(wire);
    assert!(text.starts_with("HTTP/1.1 404 Not found\r\n"));
    assert!(text.ends_with("\r\n\r\n<html><body><h2>Page not found!</h2></body></html>\n"));
}

#[test]
fn test_first_match_wins_and_only_one_handler_runs() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    let first_calls = Arc::clone(&first);
    let second_calls = Arc::clone(&second);

    let mut dispatcher = Dispatcher::new();
    dispatcher
        .register("/multi.*", move |_req, res| {
            first_calls.fetch_add(1, Ordering::SeqCst);
            res.set_status(200, "OK");
            true
        })
        .unwrap();
    dispatcher
        .register("/multi", move |_req, res| {
            second_calls.fetch_add(1, Ordering::SeqCst);
            res.set_status(200, "OK");
            true
        })
        .unwrap();

    let mut wire = Vec::new();
    dispatcher.dispatch("GET", "/multi", "", &mut wire).unwrap();

    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 0);
    assert_eq!(dispatcher.handler_count(), 2);
}

#[test]
fn test_request_view_exposes_captures_method_query() {
    let mut dispatcher = Dispatcher::new();
    dispatcher
        .register("/A(.*)", |req, res| {
            assert_eq!(req.path(), "/Axyz");
            assert_eq!(req.capture(0), Some("/Axyz"));
            assert_eq!(req.capture(1), Some("xyz"));
            assert_eq!(req.capture(2), None);
            assert_eq!(req.method(), "put");
            assert_eq!(req.query_string(), "a=1&b=2");
            res.set_status(200, "OK");
            true
        })
        .unwrap();

    let mut wire = Vec::new();
    let outcome = dispatcher
        .dispatch("put", "/Axyz", "a=1&b=2", &mut wire)
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::Handled);
}

#[test]
fn test_server_facade_routes_http_requests() -> anyhow::Result<()> {
    let mut server = Server::new();
    server.add_handler_for("GET", "/hello", |_req, res| {
        res.set_status(200, "OK");
        res.append("hi");
        true
    })?;

    let mut wire = Vec::new();
    let outcome = server.on_http_request("GET", "/hello", "", &mut wire)?;
    assert_eq!(outcome, DispatchOutcome::Handled);
    assert!(wire_text(wire).ends_with("\r\n\r\nhi"));

    let mut wire = Vec::new();
    let outcome = server.on_http_request("POST", "/hello", "", &mut wire)?;
    // Wrong method: no entry matches, the layer itself serves the 404.
    assert_eq!(outcome, DispatchOutcome::Handled);
    assert!(wire_text(wire).starts_with("HTTP/1.1 404"));
    Ok(())
}

#[test]
fn test_registration_rejects_bad_patterns() {
    let mut server = Server::new();
    assert!(server.add_handler("/([a-", |_req, _res| true).is_err());
    assert!(server
        .add_handler_for("(GET", "/x", |_req, _res| true)
        .is_err());
}
