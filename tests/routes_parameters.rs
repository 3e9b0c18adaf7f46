use bunner_trie_router_rs::{MatchState, RequestParts, RouteSpec, RouterOptions, build};

fn get(path: &str) -> MatchState {
    MatchState::new(RequestParts::new("GET").path(path))
}

#[test]
fn router_when_variable_segment_then_captures_value() {
    let router = build(
        vec![RouteSpec::new("/users/:id/posts/:post", "post")],
        &RouterOptions::default(),
    )
    .expect("routes should build");

    let found = router
        .find(&get("/users/42/posts/hello"))
        .into_match()
        .expect("route should match");

    assert_eq!(
        found.params(),
        vec![
            ("id".to_string(), "42".to_string()),
            ("post".to_string(), "hello".to_string()),
        ]
    );
    assert_eq!(found.param("post"), Some("hello"));
}

#[test]
fn router_when_variable_segment_is_empty_then_not_matched() {
    let router = build(
        vec![RouteSpec::new("/users/:id", "user")],
        &RouterOptions::default(),
    )
    .expect("routes should build");

    assert!(!router.find(&get("/users/")).is_matched());
}

#[test]
fn router_when_conditional_rejects_then_falls_back_to_variable() {
    let router = build(
        vec![
            RouteSpec::new("/items/:slug", "by-slug"),
            RouteSpec::new("/items/:id(\\d+)", "by-id"),
        ],
        &RouterOptions::default(),
    )
    .expect("routes should build");

    let numeric = router
        .find(&get("/items/17"))
        .into_match()
        .expect("numeric id should match");
    assert_eq!(*numeric.handler(), "by-id");
    assert_eq!(numeric.param("id"), Some("17"));

    let slug = router
        .find(&get("/items/blue-shoes"))
        .into_match()
        .expect("slug should match");
    assert_eq!(*slug.handler(), "by-slug");
    assert_eq!(slug.param("slug"), Some("blue-shoes"));
}

#[test]
fn router_when_unnamed_group_then_matches_without_capture() {
    let router = build(
        vec![RouteSpec::new("/v/(1|2)/status", "status")],
        &RouterOptions::default(),
    )
    .expect("routes should build");

    let found = router
        .find(&get("/v/2/status"))
        .into_match()
        .expect("route should match");
    assert!(found.params().is_empty());
    assert!(!router.find(&get("/v/3/status")).is_matched());
}

#[test]
fn router_when_query_constrained_then_requires_pair() {
    let router = build(
        vec![
            RouteSpec::new("/search?q=:term&page=(\\d+)", "paged"),
            RouteSpec::new("/search?q=:term", "search"),
        ],
        &RouterOptions::default(),
    )
    .expect("routes should build");

    let paged = router
        .find_request("GET", "/search?page=3&q=rust", Vec::<(String, String)>::new())
        .into_match()
        .expect("paged search should match");
    assert_eq!(*paged.handler(), "paged");
    assert_eq!(paged.param("term"), Some("rust"));

    let plain = router
        .find_request("GET", "/search?q=rust&page=next", Vec::<(String, String)>::new())
        .into_match()
        .expect("plain search should match");
    assert_eq!(*plain.handler(), "search");

    assert!(
        !router
            .find_request("GET", "/search?page=3", Vec::<(String, String)>::new())
            .is_matched()
    );
}

#[test]
fn router_when_query_key_only_then_any_value_accepted() {
    let router = build(
        vec![RouteSpec::new("/feed?debug", "feed")],
        &RouterOptions::default(),
    )
    .expect("routes should build");

    let state = MatchState::new(
        RequestParts::new("GET")
            .path("/feed")
            .query_pair("debug", "1"),
    );
    assert!(router.find(&state).is_matched());
    assert!(!router.find(&get("/feed")).is_matched());
}

#[test]
fn router_when_query_key_repeats_then_backtracks_to_other_pair() {
    let router = build(
        vec![RouteSpec::new("/s?a=:x&a=1", "repeat")],
        &RouterOptions::default(),
    )
    .expect("routes should build");

    let found = router
        .find_request("GET", "/s?a=1&a=2", Vec::<(String, String)>::new())
        .into_match()
        .expect("repeated key should match in the other assignment");
    assert_eq!(*found.handler(), "repeat");
    assert_eq!(found.param("x"), Some("2"));

    assert!(
        !router
            .find_request("GET", "/s?a=2&a=3", Vec::<(String, String)>::new())
            .is_matched()
    );
}

#[test]
fn router_when_fragment_declared_then_captures_it() {
    let router = build(
        vec![RouteSpec::new("/guide#:section", "guide")],
        &RouterOptions::default(),
    )
    .expect("routes should build");

    let found = router
        .find_request("GET", "/guide#install", Vec::<(String, String)>::new())
        .into_match()
        .expect("fragment route should match");
    assert_eq!(found.param("section"), Some("install"));
}
