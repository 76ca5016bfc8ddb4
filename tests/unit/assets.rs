use js_asset::test_utils::json_object;
use js_asset::{AssetError, Attrs, Css, Js, Json, ManifestResolver, PrefixResolver};
use serde_json::json;
use std::collections::{HashMap, HashSet};

#[test]
fn test_boolean_attributes() {
    let js = Js::new("app.js").attr("bool", true).attr("cool", false);
    assert_eq!(
        js.render(&PrefixResolver::new("/static/")).unwrap().as_str(),
        r#"<script src="/static/app.js" bool></script>"#
    );
}

#[test]
fn test_attribute_values_are_escaped() {
    let js = Js::new("app.js").attr("data-title", r#"Tom & "Jerry" <3 'x'"#);
    assert_eq!(
        js.render(&PrefixResolver::default()).unwrap().as_str(),
        r#"<script src="/static/app.js" data-title="Tom &amp; &quot;Jerry&quot; &lt;3 &#x27;x&#x27;"></script>"#
    );
}

#[test]
fn test_absolute_paths_are_not_resolved() {
    let resolver = PrefixResolver::new("/static/");
    for src in ["https://cdn.example.com/a.js", "http://example.com/a.js", "/a.js"] {
        let html = Js::new(src).render(&resolver).unwrap();
        assert_eq!(html.as_str(), format!(r#"<script src="{src}"></script>"#));
    }
}

#[test]
fn test_manifest_resolver_hashed_names() {
    let mut paths = HashMap::new();
    paths.insert("app.js".to_string(), "app.5f1e2d.js".to_string());
    let resolver = ManifestResolver::new("/static/", paths);

    assert_eq!(
        Js::new("app.js").render(&resolver).unwrap().as_str(),
        r#"<script src="/static/app.5f1e2d.js"></script>"#
    );

    let err = Js::new("missing.js").render(&resolver).unwrap_err();
    assert!(matches!(err, AssetError::StaticResolution { ref path, .. } if path == "missing.js"));

    let lenient = resolver.strict(false);
    assert_eq!(
        Js::new("missing.js").render(&lenient).unwrap().as_str(),
        r#"<script src="/static/missing.js"></script>"#
    );
}

#[test]
fn test_closure_resolver() {
    let resolver = |path: &str| -> js_asset::Result<String> { Ok(format!("/v2/{path}")) };
    assert_eq!(
        Css::new("site.css").render(&resolver).unwrap().as_str(),
        r#"<link href="/v2/site.css" media="all" rel="stylesheet">"#
    );
}

#[test]
fn test_equal_rendering_means_equal_assets() {
    let attrs = Attrs::new().with("id", "main");
    let a = Js::with_attrs("app.js", attrs);
    let b = Js::new("app.js").attr("id", "main");
    assert_eq!(a, b);

    let mut set = HashSet::new();
    set.insert(a);
    set.insert(b);
    set.insert(Js::new("app.js").attr("id", "other"));
    assert_eq!(set.len(), 2);
}

#[test]
fn test_json_block_is_script_safe() {
    let html = Json::new(json_object(json!({"html": "<b>&</b>"})))
        .id("payload")
        .render()
        .unwrap();
    assert_eq!(
        html.as_str(),
        "<script id=\"payload\" type=\"application/json\">{\"html\": \"\\u003Cb\\u003E\\u0026\\u003C/b\\u003E\"}</script>"
    );
}

#[test]
fn test_json_from_serializable_struct() {
    #[derive(serde::Serialize)]
    struct Config {
        debug: bool,
        name: &'static str,
    }

    let json = Json::from_serializable(&Config {
        debug: true,
        name: "app",
    })
    .unwrap();
    assert_eq!(
        json.render().unwrap().as_str(),
        r#"<script type="application/json">{"debug": true, "name": "app"}</script>"#
    );

    let err = Json::from_serializable(&json!("just a string")).unwrap_err();
    assert!(matches!(err, AssetError::SerializationError { .. }));
}

#[test]
fn test_inline_css_differs_from_linked() {
    let data = json_object(json!({"a": [1, 2]}));
    assert_eq!(Json::new(data.clone()), Json::new(data));
    assert_ne!(Css::inline("a{}"), Css::new("a{}"));
}
