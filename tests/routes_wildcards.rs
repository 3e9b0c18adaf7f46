use bunner_trie_router_rs::{MatchState, RequestParts, RouteSpec, RouterError, RouterOptions, build};

fn get(path: &str) -> MatchState {
    MatchState::new(RequestParts::new("GET").path(path))
}

#[test]
fn router_when_glob_is_last_then_captures_remaining_segments() {
    let router = build(
        vec![RouteSpec::new("/files/*", "files")],
        &RouterOptions::default(),
    )
    .expect("routes should build");

    let found = router
        .find(&get("/files/a/b/c"))
        .into_match()
        .expect("glob should match");
    assert_eq!(*found.handler(), "files");
    assert_eq!(found.param("*"), Some("a/b/c"));
}

#[test]
fn router_when_glob_has_literal_continuation_then_backtracks() {
    let router = build(
        vec![
            RouteSpec::new("/files/*", "files"),
            RouteSpec::new("/files/*path/raw", "raw"),
        ],
        &RouterOptions::default(),
    )
    .expect("routes should build");

    let raw = router
        .find(&get("/files/a/b/raw"))
        .into_match()
        .expect("continuation should match");
    assert_eq!(*raw.handler(), "raw");
    assert_eq!(raw.param("path"), Some("a/b"));

    let plain = router
        .find(&get("/files/a/b/c"))
        .into_match()
        .expect("bare glob should match");
    assert_eq!(*plain.handler(), "files");
}

#[test]
fn router_when_exact_prefix_route_exists_then_preferred_over_empty_glob() {
    let router = build(
        vec![
            RouteSpec::new("/assets/*", "assets"),
            RouteSpec::new("/assets", "index"),
        ],
        &RouterOptions::default(),
    )
    .expect("routes should build");

    assert_eq!(router.find(&get("/assets")).handler(), Some(&"index"));
    assert_eq!(router.find(&get("/assets/app.js")).handler(), Some(&"assets"));
}

#[test]
fn router_when_glob_has_regex_then_every_segment_must_match() {
    let router = build(
        vec![RouteSpec::new("/ids/*ids([0-9]+)", "ids")],
        &RouterOptions::default(),
    )
    .expect("routes should build");

    let found = router
        .find(&get("/ids/1/22/333"))
        .into_match()
        .expect("numeric run should match");
    assert_eq!(found.param("ids"), Some("1/22/333"));
    assert!(!router.find(&get("/ids/1/x")).is_matched());
}

#[test]
fn router_when_literal_sibling_exists_then_literal_wins() {
    let router = build(
        vec![
            RouteSpec::new("/static/*", "any"),
            RouteSpec::new("/static/robots.txt", "robots"),
        ],
        &RouterOptions::default(),
    )
    .expect("routes should build");

    assert_eq!(router.find(&get("/static/robots.txt")).handler(), Some(&"robots"));
    assert_eq!(router.find(&get("/static/img/a.png")).handler(), Some(&"any"));
}

#[test]
fn router_when_duplicate_glob_routes_then_returns_error() {
    let err = build(
        vec![RouteSpec::new("/wild/*", "a"), RouteSpec::new("/wild/*", "b")],
        &RouterOptions::default(),
    );
    match err.expect_err("expected duplicate route error") {
        RouterError::DuplicateRoute { route } => assert_eq!(route, "ALL /wild/*"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn router_when_glob_suffix_is_literal_then_returns_pattern_error() {
    let err = build(
        vec![RouteSpec::new("/files/*.png", "png")],
        &RouterOptions::default(),
    );
    match err.expect_err("expected pattern error") {
        RouterError::PatternSyntax {
            pattern, column, ..
        } => {
            assert_eq!(pattern, "/files/*.png");
            assert_eq!(column, Some(9));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
