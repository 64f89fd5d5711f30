#![expect(clippy::expect_used, reason = "tests assert on known-good routes")]

use wp_request_patterns::{
    HttpMethod, MergeKey, MethodSet, Segment, camel_case, extract_named_group, split_path,
};

#[test]
fn classifies_every_component_of_a_wordpress_route() {
    let route = r"/wp/v2/posts/(?P<parent>[\d]+)/revisions/(?P<id>[\d]+)";
    let segments: Vec<_> = split_path(route).into_iter().map(Segment::classify).collect();
    let dynamic: Vec<_> = segments.iter().map(Segment::is_dynamic).collect();
    assert_eq!(dynamic, vec![false, false, false, true, false, true]);

    let aliases: Vec<_> = segments.iter().map(Segment::alias).collect();
    assert_eq!(aliases, vec!["wp", "v2", "posts", "parent", "revisions", "id"]);
}

#[test]
fn slashes_inside_group_patterns_do_not_split() {
    let route = r"/wp/v2/plugins/(?P<plugin>[^.\/]+(?:\/[^.\/]+)?)";
    let components = split_path(route);
    assert_eq!(components.len(), 4);
    let last = components.last().copied().expect("route has components");
    let segment = Segment::classify(last);
    let validator = segment.validator().expect("pattern should compile");
    assert!(validator.validate("akismet/akismet"));
    assert!(!validator.validate("akismet/akismet/extra"));
}

#[test]
fn pattern_is_the_merge_key_for_dynamic_segments() {
    let keys: Vec<MergeKey> = [r"(?P<id>[\d]+)", r"(?P<parent>[\d]+)", r"(?'post'[\d]+)"]
        .into_iter()
        .map(|component| Segment::classify(component).merge_key())
        .collect();
    assert!(keys.windows(2).all(|pair| pair.first() == pair.last()));
}

#[test]
fn empty_group_patterns_accept_any_value() {
    let group = extract_named_group("(?P<id>)").expect("group should be recognised");
    assert!(group.pattern.is_empty());
    let validator = Segment::classify("(?P<id>)")
        .validator()
        .expect("empty pattern should compile");
    for value in ["", "abc", "123", "a/b"] {
        assert!(validator.validate(value), "{value:?} should be accepted");
    }
}

#[test]
fn setter_names_are_camel_cased_aliases() {
    let alias = Segment::classify(r"(?P<plugin_slug>[\w-]+)");
    assert_eq!(camel_case(alias.alias()), "pluginSlug");
}

#[test]
fn route_methods_gain_head_alongside_get() {
    let methods: MethodSet = ["GET", "POST"]
        .into_iter()
        .map(|text| text.parse::<HttpMethod>().expect("method should parse"))
        .collect();
    assert_eq!(methods.to_string(), "get, head, post");
}
