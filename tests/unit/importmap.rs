use js_asset::{ImportMap, ImportMapImport, Media, PrefixResolver};
use serde_json::json;

#[test]
fn test_two_maps_render_one_tag_in_first_seen_order() {
    let a = ImportMap::from_value(&json!({"imports": {"a": "/a.js"}}));
    let b = ImportMap::from_value(&json!({"imports": {"b": "/b.js"}}));

    let media = Media::from_assets([a]).combine(&Media::from_assets([b]));
    let html = media.render(&PrefixResolver::default()).unwrap();

    assert_eq!(html.as_str().matches(r#"<script type="importmap">"#).count(), 1);
    assert_eq!(
        html.as_str(),
        r#"<script type="importmap">{"imports": {"a": "/a.js", "b": "/b.js"}}</script>"#
    );
}

#[test]
fn test_merge_associative_without_collisions() {
    let a = ImportMap::new().import("a", "/a.js").integrity_hash("/a.js", "sha384-a");
    let b = ImportMap::new().scoped("/admin/", "a", "/admin-a.js");
    let c = ImportMap::new().import("c", "/c.js").scoped("/admin/", "c", "/admin-c.js");

    let left = a.merge(&b).merge(&c);
    let right = a.merge(&b.merge(&c));
    assert_eq!(left.to_json().unwrap(), right.to_json().unwrap());
    assert_eq!(
        left.to_json().unwrap(),
        r#"{"imports": {"a": "/a.js", "c": "/c.js"}, "integrity": {"/a.js": "sha384-a"}, "scopes": {"/admin/": {"a": "/admin-a.js", "c": "/admin-c.js"}}}"#
    );
}

#[test]
fn test_map_without_known_keys_contributes_nothing() {
    let base = ImportMap::new().import("a", "/a.js");
    let empty = ImportMap::from_value(&json!({"preload": {"x": "/x.js"}}));
    assert_eq!(base.merge(&empty), base);
    assert!(empty.render().unwrap().is_empty());
}

#[test]
fn test_entry_scope_handling() {
    let mut map = ImportMap::new();
    map.add_entry(&ImportMapImport::scoped("lib", "/scoped-lib.js", "/js/"));
    assert!(map.is_empty());

    map.add_entry(&ImportMapImport::new("lib", "/lib.js"));
    assert_eq!(
        map.render().unwrap().as_str(),
        r#"<script type="importmap">{"imports": {"lib": "/lib.js"}, "scopes": {"/js/": {"lib": "/scoped-lib.js"}}}</script>"#
    );
}

#[test]
fn test_urls_are_script_safe() {
    let map = ImportMap::new().import("x", "/x.js?a=1&b=</script>");
    let html = map.render().unwrap();
    assert_eq!(html.as_str().matches("</script>").count(), 1);
    assert!(html.as_str().contains(r"a=1\u0026b=\u003C/script\u003E"));
}
