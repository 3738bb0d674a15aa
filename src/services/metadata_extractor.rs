//! Metadata extraction from page markup.
//!
//! Each field is derived through an ordered fallback chain; the first source
//! yielding a non-empty value wins. Pure function of the markup and the
//! source URL (used only for hostname-derived fallbacks and for resolving
//! relative image references). No network or storage access.

use scraper::{Html, Selector};
use url::Url;

use crate::services::sanitizer::sanitize;
use crate::services::url_validator;
use crate::types::bookmark::RawMetadata;
use crate::types::errors::ExtractError;

/// Derives preview metadata from raw page markup.
///
/// Fallback chains, first present value wins:
/// - image: `og:image` → apple-touch-icon link → generic icon link → absent
/// - title: `og:title` → `<title>` → first `<h1>` → hostname
/// - short description: `og:description` → description meta → first short
///   paragraph (truncated to 100 chars) → "Visit {hostname}"
/// - long description: same og/meta source → first two short paragraphs →
///   "Explore more at {hostname}"
pub fn extract(html: &str, source: &Url) -> Result<RawMetadata, ExtractError> {
    let document = Html::parse_document(html);
    let host = url_validator::hostname(source);

    let image = meta_content(&document, r#"meta[property="og:image"]"#)?
        .or(link_href(&document, r#"link[rel="apple-touch-icon"]"#)?)
        .or(link_href(&document, r#"link[rel~="icon"]"#)?)
        .map(|reference| resolve(source, &reference));

    let title = meta_content(&document, r#"meta[property="og:title"]"#)?
        .or(first_text(&document, "title")?)
        .or(first_text(&document, "h1")?)
        .unwrap_or_else(|| host.clone());

    let description = meta_content(&document, r#"meta[property="og:description"]"#)?
        .or(meta_content(&document, r#"meta[name="description"]"#)?);

    // Candidate paragraphs: non-empty and short enough to read as a summary.
    let selector = compile("p")?;
    let paragraphs: Vec<String> = document
        .select(&selector)
        .map(|el| sanitize(Some(&el.text().collect::<String>())))
        .filter(|text| !text.is_empty() && text.chars().count() < 500)
        .collect();

    let short_description = description
        .clone()
        .or_else(|| paragraphs.first().map(|p| truncate_chars(p, 100)))
        .unwrap_or_else(|| format!("Visit {}", host));

    let long_description = description
        .or_else(|| {
            let joined = paragraphs
                .iter()
                .take(2)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" ");
            (!joined.is_empty()).then_some(joined)
        })
        .unwrap_or_else(|| format!("Explore more at {}", host));

    Ok(RawMetadata {
        title: Some(title),
        short_description: Some(short_description),
        long_description: Some(long_description),
        image,
    })
}

fn compile(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector(e.to_string()))
}

/// First non-empty `content` attribute among elements matching `css`.
fn meta_content(document: &Html, css: &str) -> Result<Option<String>, ExtractError> {
    let selector = compile(css)?;
    Ok(document
        .select(&selector)
        .find_map(|el| el.value().attr("content"))
        .map(|value| sanitize(Some(value)))
        .filter(|value| !value.is_empty()))
}

/// First non-empty `href` attribute among elements matching `css`.
fn link_href(document: &Html, css: &str) -> Result<Option<String>, ExtractError> {
    let selector = compile(css)?;
    Ok(document
        .select(&selector)
        .find_map(|el| el.value().attr("href"))
        .map(|value| sanitize(Some(value)))
        .filter(|value| !value.is_empty()))
}

/// Sanitized text content of the first element matching `css`.
fn first_text(document: &Html, css: &str) -> Result<Option<String>, ExtractError> {
    let selector = compile(css)?;
    Ok(document
        .select(&selector)
        .next()
        .map(|el| sanitize(Some(&el.text().collect::<String>())))
        .filter(|text| !text.is_empty()))
}

/// Resolves a possibly-relative image reference against the source page.
fn resolve(source: &Url, reference: &str) -> String {
    match source.join(reference) {
        Ok(absolute) => absolute.to_string(),
        Err(_) => reference.to_string(),
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
