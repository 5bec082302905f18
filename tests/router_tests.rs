//! Pattern-matching semantics of the shared route table.

use portico::router::RouteTable;

mod tracing_util;
use tracing_util::TestTracing;

#[test]
fn test_full_string_match_not_substring() {
    let _tracing = TestTracing::init();
    let mut table = RouteTable::new();
    table.register(None, "/A", "a").unwrap();

    assert!(table.find("GET", "/A").is_some());
    assert!(table.find("GET", "/AB").is_none());
    assert!(table.find("GET", "/x/A").is_none());
}

#[test]
fn test_method_pattern_is_case_insensitive() {
    let mut table = RouteTable::new();
    table.register(Some("PUT|GET"), "/A", "a").unwrap();

    assert!(table.find("put", "/A").is_some());
    assert!(table.find("Get", "/A").is_some());
    assert!(table.find("DELETE", "/A").is_none());
}

#[test]
fn test_path_pattern_is_case_sensitive() {
    let mut table = RouteTable::new();
    table.register(None, "/Case", "a").unwrap();

    assert!(table.find("GET", "/Case").is_some());
    assert!(table.find("GET", "/case").is_none());
}

#[test]
fn test_captures_whole_path_then_groups() {
    let mut table = RouteTable::new();
    table.register(None, "/A(.*)", "a").unwrap();

    let m = table.find("GET", "/Axyz").expect("pattern should match");
    assert_eq!(
        m.captures.to_vec(),
        vec!["/Axyz".to_string(), "xyz".to_string()]
    );
}

#[test]
fn test_optional_group_yields_empty_capture() {
    let mut table = RouteTable::new();
    table.register(None, "/(index.*)?", "root").unwrap();

    let m = table.find("GET", "/").expect("bare root should match");
    assert_eq!(m.captures[0], "/");
    assert_eq!(m.captures[1], "");

    let m = table.find("GET", "/index.html").expect("index should match");
    assert_eq!(m.captures[1], "index.html");
}

#[test]
fn test_registration_order_decides_ties() {
    let mut table = RouteTable::new();
    table.register(None, "/dup", 1).unwrap();
    table.register(None, "/d.*", 2).unwrap();
    table.register(None, "/dup", 3).unwrap();

    assert_eq!(table.len(), 3);
    let m = table.find("GET", "/dup").expect("should match");
    assert_eq!(*m.entry.payload(), 1);
}

#[test]
fn test_find_path_ignores_method() {
    let mut table = RouteTable::new();
    table.register(None, "/websocket", "ws").unwrap();

    assert!(table.find_path("/websocket").is_some());
    assert!(table.find_path("/other").is_none());
}

#[test]
fn test_invalid_pattern_fails_registration() {
    let mut table = RouteTable::new();

    let err = table.register(None, "/([a-", "bad").unwrap_err();
    assert!(err.to_string().contains("invalid pattern"));
    assert!(table.is_empty());

    let err = table.register(Some("(PUT"), "/ok", "bad").unwrap_err();
    assert!(err.to_string().contains("(PUT"));
    assert!(table.is_empty());
}
