use bunner_trie_router_rs::{MatchState, RouteSpec, RouterError, RouterOptions, build};
use serde_json::json;

#[test]
fn router_when_header_pattern_declared_then_value_must_match() {
    let router = build(
        vec![RouteSpec::new("/secure", "secure").header_pattern("x-api-key", "^[a-f0-9]+$")],
        &RouterOptions::default(),
    )
    .expect("routes should build");

    let ok = MatchState::from_request("GET", "/secure", [("x-api-key", "deadbeef")]);
    assert_eq!(router.find(&ok).handler(), Some(&"secure"));

    let bad_value = MatchState::from_request("GET", "/secure", [("x-api-key", "NOPE")]);
    assert!(!router.find(&bad_value).is_matched());

    let missing = MatchState::from_request("GET", "/secure", [("accept", "*/*")]);
    assert!(!router.find(&missing).is_matched());
}

#[test]
fn router_when_header_name_only_then_any_value_matches() {
    let router = build(
        vec![RouteSpec::new("/traced", "traced").header("x-trace-id")],
        &RouterOptions::default(),
    )
    .expect("routes should build");

    let state = MatchState::from_request(
        "GET",
        "/traced",
        [("accept", "text/html"), ("x-trace-id", "abc-123")],
    );
    assert!(router.find(&state).is_matched());
}

#[test]
fn router_when_header_constraint_fails_then_falls_back_to_plain_route() {
    let router = build(
        vec![
            RouteSpec::new("/content", "plain"),
            RouteSpec::new("/content", "json").header_pattern("accept", "application/json"),
        ],
        &RouterOptions::default(),
    )
    .expect("routes should build");

    let json_state = MatchState::from_request("GET", "/content", [("accept", "application/json")]);
    assert_eq!(router.find(&json_state).handler(), Some(&"json"));

    let html_state = MatchState::from_request("GET", "/content", [("accept", "text/html")]);
    assert_eq!(router.find(&html_state).handler(), Some(&"plain"));
}

#[test]
fn router_when_headers_given_as_json_array_then_all_are_required() {
    let router = build(
        vec![
            RouteSpec::new("/both", "both")
                .with_headers(json!(["x-one", { "x-two": "2" }])),
        ],
        &RouterOptions::default(),
    )
    .expect("routes should build");

    let both = MatchState::from_request("GET", "/both", [("x-two", "2"), ("x-one", "1")]);
    assert!(router.find(&both).is_matched());

    let only_one = MatchState::from_request("GET", "/both", [("x-one", "1")]);
    assert!(!router.find(&only_one).is_matched());
}

#[test]
fn router_when_header_value_is_regex_then_whole_value_must_match() {
    let router = build(
        vec![RouteSpec::new("/tenant", "tenant").header_pattern("x-tenant", "[a-z]+")],
        &RouterOptions::default(),
    )
    .expect("routes should build");

    let state = MatchState::from_request("GET", "/tenant", [("x-tenant", "acme")]);
    assert!(router.find(&state).is_matched());

    let partial = MatchState::from_request("GET", "/tenant", [("x-tenant", "acme1")]);
    assert!(!router.find(&partial).is_matched());
}

#[test]
fn router_when_header_spec_is_not_string_or_object_then_returns_error() {
    let err = build(
        vec![RouteSpec::new("/bad", "bad").with_headers(json!([true]))],
        &RouterOptions::default(),
    );
    match err.expect_err("expected header spec error") {
        RouterError::InvalidHeaderSpec { found } => assert_eq!(found, "boolean `true`"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn router_when_headers_given_as_json_object_then_declaration_order_is_kept() {
    let router = build(
        vec![RouteSpec::new("/h", "h").with_headers(json!({ "x-b": "1", "x-a": "2" }))],
        &RouterOptions::default(),
    )
    .expect("routes should build");

    assert_eq!(router.routes(), ["ALL /h {x-b: 1, x-a: 2}".to_string()]);

    let state = MatchState::from_request("GET", "/h", [("x-a", "2"), ("x-b", "1")]);
    assert!(router.find(&state).is_matched());
}
