mod common;

use common::{Post, Response};
use railsync_client::Route;
use railsync_model::RemoteId;

// ── Path construction ────────────────────────────────────────────

#[test]
fn collection_route_uses_controller_name() {
    assert_eq!(Route::collection::<Post>().path(), "posts");
    assert_eq!(Route::collection::<Response>().path(), "responses");
}

#[test]
fn member_route_appends_id() {
    assert_eq!(Route::member::<Post>(RemoteId::new(7)).path(), "posts/7");
}

#[test]
fn parent_prefixed_collection() {
    let route = Route::collection_via::<Response, Post>(RemoteId::new(3));
    assert_eq!(route.path(), "posts/3/responses");
}

// ── Query parameters ─────────────────────────────────────────────

#[test]
fn query_parameters_are_appended() {
    let route = Route::collection::<Post>().with_query([("q", "search")]);
    assert_eq!(route.path(), "posts?q=search");
}

#[test]
fn query_parameters_are_escaped() {
    let route = Route::collection::<Post>().with_query([("q", "two words & more")]);
    assert_eq!(route.path(), "posts?q=two%20words%20%26%20more");
}

#[test]
fn multiple_query_parameters() {
    let route = Route::collection::<Post>().with_query([("page", "2"), ("per", "50")]);
    assert_eq!(route.path(), "posts?page=2&per=50");
}

#[test]
fn empty_query_leaves_path_unchanged() {
    let params: [(&str, &str); 0] = [];
    let route = Route::collection::<Post>().with_query(params);
    assert_eq!(route.path(), "posts");
}

// ── URLs ─────────────────────────────────────────────────────────

#[test]
fn url_joins_base_and_path() {
    let route = Route::member::<Post>(RemoteId::new(7));
    assert_eq!(route.url("http://example.com"), "http://example.com/posts/7");
}

#[test]
fn url_tolerates_trailing_slash_on_base() {
    let route = Route::collection::<Post>();
    assert_eq!(route.url("http://example.com/"), "http://example.com/posts");
}
