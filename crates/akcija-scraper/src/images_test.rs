use super::*;
use crate::node::fake::FakeNode;
use crate::store::read_image_manifest;

fn img() -> FakeNode {
    FakeNode::new("img")
}

fn base() -> Url {
    Url::parse("https://www.raskakcija.lt/maxima-akciju-leidinys.htm").unwrap()
}

// -----------------------------------------------------------------------
// resolve_image_source
// -----------------------------------------------------------------------

#[test]
fn lazy_attribute_wins_over_src() {
    let node = img()
        .with_attr("src", "/lazy.gif")
        .with_attr("data-src", "/admin/contentfiles/p1.jpg");
    assert_eq!(
        resolve_image_source(&node).as_deref(),
        Some("/admin/contentfiles/p1.jpg")
    );
}

#[test]
fn priority_order_is_fixed() {
    let node = img()
        .with_attr("data-original", "/c.jpg")
        .with_attr("data-lazy-src", "/b.jpg");
    assert_eq!(resolve_image_source(&node).as_deref(), Some("/b.jpg"));
}

#[test]
fn empty_attribute_falls_through() {
    let node = img().with_attr("data-src", "").with_attr("src", "/a.jpg");
    assert_eq!(resolve_image_source(&node).as_deref(), Some("/a.jpg"));
}

#[test]
fn srcset_takes_first_candidate() {
    let node = img().with_attr(
        "data-srcset",
        "/admin/contentfiles/p1-400.jpg 400w, /admin/contentfiles/p1-800.jpg 800w",
    );
    assert_eq!(
        resolve_image_source(&node).as_deref(),
        Some("/admin/contentfiles/p1-400.jpg")
    );
}

#[test]
fn no_source_attribute_is_none() {
    assert!(resolve_image_source(&img().with_attr("alt", "x")).is_none());
}

// -----------------------------------------------------------------------
// is_content_image
// -----------------------------------------------------------------------

#[test]
fn content_path_is_required() {
    assert!(is_content_image("https://x.lt/Admin/ContentFiles/page1.jpg"));
    assert!(!is_content_image("https://x.lt/uploads/page1.jpg"));
}

#[test]
fn placeholder_is_excluded_in_any_case() {
    assert!(!is_content_image("/admin/contentfiles/PlaceHolder.png"));
    assert!(!is_content_image("/admin/contentfiles/PLACEHOLDER/page.jpg"));
}

#[test]
fn every_marker_excludes() {
    for marker in PLACEHOLDER_MARKERS {
        let src = format!("/admin/contentfiles/{marker}.jpg");
        assert!(!is_content_image(&src), "{src} should be excluded");
    }
}

// -----------------------------------------------------------------------
// extract_image_urls / collect_image_urls
// -----------------------------------------------------------------------

#[test]
fn extract_resolves_relative_sources_and_keeps_duplicates() {
    let root = FakeNode::new("body")
        .child(img().with_attr("src", "/admin/contentfiles/p1.jpg"))
        .child(img().with_attr("src", "/images/logo.png"))
        .child(img().with_attr("data-src", "admin/contentfiles/p2.jpg"))
        .child(img().with_attr("src", "/admin/contentfiles/p1.jpg"));

    let urls = extract_image_urls(&root, &base());

    assert_eq!(
        urls,
        vec![
            "https://www.raskakcija.lt/admin/contentfiles/p1.jpg",
            "https://www.raskakcija.lt/admin/contentfiles/p2.jpg",
            "https://www.raskakcija.lt/admin/contentfiles/p1.jpg",
        ]
    );
}

#[test]
fn collect_from_html_keeps_absolute_urls() {
    let html = r#"<html><body>
        <img src="https://cdn.raskakcija.lt/admin/contentfiles/leidinys/1.jpg">
        <img src="/img/spacer.gif" data-lazy-src="/admin/contentfiles/leidinys/2.jpg">
        <img src="/admin/contentfiles/loading.gif">
        <img>
    </body></html>"#;

    let urls = collect_image_urls("https://www.raskakcija.lt/a/b.htm", html).unwrap();

    assert_eq!(
        urls,
        vec![
            "https://cdn.raskakcija.lt/admin/contentfiles/leidinys/1.jpg",
            "https://www.raskakcija.lt/admin/contentfiles/leidinys/2.jpg",
        ]
    );
}

#[test]
fn collect_rejects_relative_page_url() {
    let err = collect_image_urls("not a url", "<html></html>").unwrap_err();
    assert!(matches!(err, ScraperError::InvalidUrl { .. }), "got: {err:?}");
}

#[test]
fn save_image_manifest_creates_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pending = dir.path().join("toDownload");
    let urls = vec![
        "https://x.lt/admin/contentfiles/1.jpg".to_string(),
        "https://x.lt/admin/contentfiles/2.jpg".to_string(),
    ];

    let path = save_image_manifest(&pending, "maxima_brochures", urls.clone(), "20241017_090503")
        .unwrap();

    assert_eq!(path, pending.join("maxima_brochures_20241017_090503.json"));
    let manifest = read_image_manifest(&path).unwrap();
    assert_eq!(manifest.timestamp, "20241017_090503");
    assert_eq!(manifest.total_images, 2);
    assert_eq!(manifest.image_urls, urls);
}
