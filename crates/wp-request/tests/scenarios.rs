//! Route-compilation behaviour observed through the public API.
#![expect(clippy::expect_used, reason = "tests build known-good routes")]

use rstest::rstest;
use wp_request::{
    BuildOptions, EndpointCatalog, MixinRegistry, RequestOptions, RouteDefinition, RouteError,
    RouteMap, build_handler_spec, build_route_tree,
};
use wp_request_patterns::HttpMethod;

fn get() -> RouteDefinition {
    RouteDefinition::new("wp/v2").with_methods([HttpMethod::Get])
}

fn bootstrap(routes: &RouteMap) -> EndpointCatalog {
    EndpointCatalog::bootstrap(routes, &MixinRegistry::new(), BuildOptions::default())
        .expect("bootstrap")
}

#[test]
fn a_lone_collection_has_no_setters() {
    let routes = RouteMap::new().with_route("/wp/v2/posts", get());
    let tree = build_route_tree(&routes).expect("tree");
    let posts = tree.resource("wp/v2", "posts").expect("posts");
    assert!(posts.root().is_leaf());
    let spec = build_handler_spec("wp/v2", posts, &BuildOptions::default());
    assert!(spec.setters().is_empty());
    assert_eq!(spec.levels().len(), 1);
}

#[rstest]
#[case("7", true)]
#[case("abc", false)]
fn numeric_ids_are_validated_at_render_time(
    #[case] id: &str,
    #[case] valid: bool,
) -> Result<(), RouteError> {
    let routes = RouteMap::new().with_route(r"/wp/v2/posts/(?P<id>[\d]+)", get());
    let catalog = bootstrap(&routes);
    let mut request = catalog.resource("wp/v2", "posts")?.create(RequestOptions::default());
    request.set("id", id)?;
    assert_eq!(request.path_part(1), Some(id));
    assert_eq!(request.validate_path().is_ok(), valid);
    Ok(())
}

#[rstest]
#[case(None, &["posts", "5", "revisions"])]
#[case(Some("9"), &["posts", "5", "revisions", "9"])]
fn collection_setters_optionally_select_an_item(
    #[case] revision: Option<&str>,
    #[case] expected: &[&str],
) -> Result<(), RouteError> {
    let routes = RouteMap::new()
        .with_route(r"/wp/v2/posts/(?P<parent>[\d]+)/revisions", get())
        .with_route(r"/wp/v2/posts/(?P<parent>[\d]+)/revisions/(?P<id>[\d]+)", get());
    let catalog = bootstrap(&routes);
    let mut request = catalog.resource("wp/v2", "posts")?.create(RequestOptions::default());
    request
        .set("parent", 5)?
        .invoke("revisions", revision.map(str::to_owned))?;
    let slots: Vec<_> = request.path_parts().map(|(_, value)| value).collect();
    assert_eq!(slots, expected);
    request.validate_path()
}

#[test]
fn building_twice_gives_equal_tables() {
    let routes = RouteMap::new()
        .with_route(r"/wp/v2/posts/(?P<id>[\d]+)", get())
        .with_route(r"/wp/v2/posts/(?P<parent>[\d]+)/revisions/(?P<id>[\d]+)", get())
        .with_route("/wp/v2/posts/(?P<slug>[a-z-]+)/meta", get());
    let build = || {
        let tree = build_route_tree(&routes).expect("tree");
        let posts = tree.resource("wp/v2", "posts").expect("posts");
        build_handler_spec("wp/v2", posts, &BuildOptions::default())
    };
    assert_eq!(build(), build());
}

#[test]
fn first_alias_registration_wins_across_depths() {
    let routes = RouteMap::new()
        .with_route("/wp/v2/terms/(?P<name>[a-z]+)", get())
        .with_route(r"/wp/v2/terms/(?P<taxonomy>[a-z]+)/items/(?P<name>[\d]+)", get());
    let tree = build_route_tree(&routes).expect("tree");
    let terms = tree.resource("wp/v2", "terms").expect("terms");
    let spec = build_handler_spec("wp/v2", terms, &BuildOptions::default());
    assert_eq!(spec.setters().get("name").map(|setter| setter.level()), Some(1));
    let [conflict] = spec.alias_conflicts() else {
        panic!("expected one conflict, got {:?}", spec.alias_conflicts());
    };
    assert_eq!(conflict.dropped.level, 3);
}
