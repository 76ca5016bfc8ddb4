use js_asset::{
    Asset, AssetCollection, AssetError, Css, FormsMedia, ImportMapImport, Js, Media,
    PrefixResolver,
};

fn render(media: &Media) -> String {
    media.render(&PrefixResolver::new("/static/")).unwrap().into_string()
}

fn samples() -> Vec<Media> {
    vec![
        Media::new(),
        Media::from_js(["a.js", "b.js"]),
        Media::from_js(["b.js", "c.js"]),
        Media::from_css("screen", ["s.css"]).combine(&Media::from_js(["a.js"])),
        Media::from_assets([
            Asset::from(Js::new("m.js").attr("type", "module")),
            ImportMapImport::new("lib", "/static/lib-1.js").into(),
        ]),
        Media::from_assets([ImportMapImport::new("lib", "/static/lib-2.js")]),
    ]
}

#[test]
fn test_combine_with_empty_renders_identically() {
    for media in samples() {
        assert_eq!(render(&media.combine(&Media::new())), render(&media));
    }
}

#[test]
fn test_combine_associativity_over_samples() {
    let samples = samples();
    for a in &samples {
        for b in &samples {
            for c in &samples {
                assert_eq!(
                    render(&a.combine(b).combine(c)),
                    render(&a.combine(&b.combine(c)))
                );
            }
        }
    }
}

#[test]
fn test_shared_list_is_not_duplicated() {
    let shared = Media::from_js(["shared-1.js", "shared-2.js"]);
    let x = shared.clone();
    let y = Media::from_js(["y.js"]).combine(&shared);

    for combined in [y.combine(&x), x.combine(&y)] {
        let html = render(&combined);
        assert_eq!(html.matches("shared-1.js").count(), 1);
        assert_eq!(html.matches("shared-2.js").count(), 1);
    }
}

#[test]
fn test_end_to_end_scenario() {
    let media = Media::from_js(["a.js", "b.js"])
        .combine(&Media::from_js(["b.js", "c.js"]))
        .combine(&Media::from_js(["a.js", "c.js"]));

    assert_eq!(
        render(&media),
        "<script src=\"/static/a.js\"></script>\n\
         <script src=\"/static/b.js\"></script>\n\
         <script src=\"/static/c.js\"></script>"
    );
}

#[test]
fn test_importmap_collision_follows_flattened_order() {
    let first = Media::from_assets([ImportMapImport::new("lib", "/static/lib-1.js")]);
    let second = Media::from_assets([ImportMapImport::new("lib", "/static/lib-2.js")]);
    let middle = Media::from_js(["x.js"]);

    let html = render(&first.combine(&middle).combine(&second));
    assert!(html.contains(r#""lib": "/static/lib-2.js""#));

    let html = render(&second.combine(&first.combine(&middle)));
    assert!(html.contains(r#""lib": "/static/lib-1.js""#));
}

#[test]
fn test_forms_and_media_collections() {
    let forms = FormsMedia::new().css("all", "base.css").js("forms.js");
    let media = Media::from_assets([Css::new("widget.css")]);

    let combined = AssetCollection::from(forms.clone())
        .combine(&AssetCollection::from(media))
        .unwrap();
    assert_eq!(
        combined.render(&PrefixResolver::default()).unwrap().as_str(),
        "<link href=\"/static/base.css\" media=\"all\" rel=\"stylesheet\">\n\
         <script src=\"/static/forms.js\"></script>\n\
         <link href=\"/static/widget.css\" media=\"all\" rel=\"stylesheet\">"
    );

    let err = AssetCollection::from(forms.clone())
        .combine(&AssetCollection::from(forms))
        .unwrap_err();
    assert!(matches!(err, AssetError::UnsupportedOperand { .. }));
}
