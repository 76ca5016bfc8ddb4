use js_asset::csp::{
    CspConfig, RequestCsp, add_csp_header, apply_nonce, csp_media, current_nonce,
    with_request_nonce,
};
use js_asset::{Css, ImportMapImport, Js, Media, PrefixResolver};
use std::collections::HashMap;

fn render(media: &Media) -> String {
    media.render(&PrefixResolver::new("/static/")).unwrap().into_string()
}

#[test]
fn test_nonce_injection_does_not_mutate() {
    let media = Media::from_assets([
        js_asset::Asset::from(Js::new("a.js")),
        Css::new("a.css").into(),
        Js::new("b.js").attr("nonce", "existing").into(),
        ImportMapImport::new("lib", "/static/lib.js").into(),
    ]);
    let original = render(&media);

    let nonced = apply_nonce(&media, "X");

    assert_eq!(render(&media), original);
    assert_eq!(original.matches("nonce=").count(), 1);

    let html = render(&nonced);
    for line in html.lines() {
        assert!(line.contains(r#"nonce="X""#) || line.contains(r#"nonce="existing""#), "{line}");
    }
    assert_eq!(html.matches(r#"nonce="existing""#).count(), 1);
}

#[tokio::test]
async fn test_request_lifecycle() {
    let config = CspConfig {
        enabled: true,
        default_src: Some(vec!["'self'".to_string()]),
        ..CspConfig::default()
    };
    let request = RequestCsp::on_request_start(&config);
    let media = Media::from_js(["app.js"]);

    let html = request.scope(async { render(&csp_media(&media)) }).await;
    assert_eq!(
        html,
        format!(r#"<script src="/static/app.js" nonce="{}"></script>"#, request.nonce())
    );

    let mut headers: HashMap<String, String> = HashMap::new();
    assert!(request.finish(&mut headers, &config));
    assert_eq!(
        headers["Content-Security-Policy"],
        format!(
            "default-src 'self'; script-src 'nonce-{0}'; style-src 'nonce-{0}'",
            request.nonce()
        )
    );
    assert!(!add_csp_header(&mut headers, "other", &config));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_nonce_does_not_bleed_between_requests() {
    let first = tokio::spawn(with_request_nonce("first", async {
        tokio::task::yield_now().await;
        current_nonce()
    }));
    let second = tokio::spawn(with_request_nonce("second", async {
        tokio::task::yield_now().await;
        current_nonce()
    }));

    assert_eq!(first.await.unwrap().as_deref(), Some("first"));
    assert_eq!(second.await.unwrap().as_deref(), Some("second"));
    assert_eq!(current_nonce(), None);
}
