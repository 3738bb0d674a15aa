//! Unit tests for the metadata extractor's fallback chains.

use linkboard::services::metadata_extractor::extract;
use url::Url;

fn source() -> Url {
    Url::parse("https://example.com/article").unwrap()
}

#[test]
fn test_og_tags_win_every_chain() {
    let html = r#"<html><head>
        <meta property="og:title" content="OG Title">
        <meta property="og:description" content="OG description.">
        <meta property="og:image" content="https://cdn.example.com/og.png">
        <meta name="description" content="Plain description.">
        <title>Document Title</title>
        </head><body><h1>Heading</h1><p>First paragraph.</p></body></html>"#;

    let meta = extract(html, &source()).unwrap();
    assert_eq!(meta.title.as_deref(), Some("OG Title"));
    assert_eq!(meta.short_description.as_deref(), Some("OG description."));
    assert_eq!(meta.long_description.as_deref(), Some("OG description."));
    assert_eq!(
        meta.image.as_deref(),
        Some("https://cdn.example.com/og.png")
    );
}

#[test]
fn test_title_only_markup_yields_visit_fallback_description() {
    let html = "<html><head><title>Just a Title</title></head><body></body></html>";

    let meta = extract(html, &source()).unwrap();
    assert_eq!(meta.title.as_deref(), Some("Just a Title"));
    assert_eq!(meta.short_description.as_deref(), Some("Visit example.com"));
    assert_eq!(
        meta.long_description.as_deref(),
        Some("Explore more at example.com")
    );
    assert_eq!(meta.image, None);
}

#[test]
fn test_title_falls_back_to_h1_then_hostname() {
    let h1_only = "<html><body><h1>Heading Title</h1></body></html>";
    let meta = extract(h1_only, &source()).unwrap();
    assert_eq!(meta.title.as_deref(), Some("Heading Title"));

    let bare = "<html><body><p></p></body></html>";
    let meta = extract(bare, &source()).unwrap();
    assert_eq!(meta.title.as_deref(), Some("example.com"));
}

#[test]
fn test_descriptions_fall_back_to_paragraphs() {
    let html = r#"<html><body>
        <p>First paragraph of the page.</p>
        <p>Second paragraph of the page.</p>
        <p>Third paragraph never used.</p>
        </body></html>"#;

    let meta = extract(html, &source()).unwrap();
    assert_eq!(
        meta.short_description.as_deref(),
        Some("First paragraph of the page.")
    );
    assert_eq!(
        meta.long_description.as_deref(),
        Some("First paragraph of the page. Second paragraph of the page.")
    );
}

#[test]
fn test_short_description_truncates_long_paragraph_to_100_chars() {
    let paragraph = "x".repeat(300);
    let html = format!("<html><body><p>{}</p></body></html>", paragraph);

    let meta = extract(&html, &source()).unwrap();
    assert_eq!(meta.short_description.unwrap().chars().count(), 100);
}

#[test]
fn test_paragraphs_of_500_chars_or_more_are_skipped() {
    let wall_of_text = "y".repeat(500);
    let html = format!(
        "<html><body><p>{}</p><p>Short one.</p></body></html>",
        wall_of_text
    );

    let meta = extract(&html, &source()).unwrap();
    assert_eq!(meta.short_description.as_deref(), Some("Short one."));
}

#[test]
fn test_meta_name_description_used_when_no_og() {
    let html = r#"<html><head>
        <meta name="description" content="Plain meta description.">
        </head><body><p>Paragraph.</p></body></html>"#;

    let meta = extract(html, &source()).unwrap();
    assert_eq!(
        meta.short_description.as_deref(),
        Some("Plain meta description.")
    );
    assert_eq!(
        meta.long_description.as_deref(),
        Some("Plain meta description.")
    );
}

#[test]
fn test_image_falls_back_to_touch_icon_then_icon() {
    let touch = r#"<html><head>
        <link rel="apple-touch-icon" href="/touch.png">
        <link rel="icon" href="/favicon.ico">
        </head></html>"#;
    let meta = extract(touch, &source()).unwrap();
    assert_eq!(
        meta.image.as_deref(),
        Some("https://example.com/touch.png")
    );

    let icon_only = r#"<html><head><link rel="icon" href="/favicon.ico"></head></html>"#;
    let meta = extract(icon_only, &source()).unwrap();
    assert_eq!(
        meta.image.as_deref(),
        Some("https://example.com/favicon.ico")
    );
}

#[test]
fn test_extracted_text_is_sanitized() {
    let html = "<html><head><title>  Broken\r\nTitle \n</title></head></html>";

    let meta = extract(html, &source()).unwrap();
    assert_eq!(meta.title.as_deref(), Some("Broken Title"));
}
