//! HTML projection of the bookmark collection.
//!
//! Produces a complete standalone document in either view mode. Styling is
//! intentionally minimal; the structure mirrors what the view layer sorts
//! and filters.

use crate::config::FALLBACK_IMAGE;
use crate::types::bookmark::Bookmark;
use crate::types::view::ViewMode;

/// Escapes text for safe use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Renders the visible bookmarks as a full HTML document.
///
/// `total_count` is the size of the unfiltered collection: an empty
/// `visible` slice renders the "no matches" notice when bookmarks exist but
/// none passed the filter, and the "no bookmarks" notice when the
/// collection itself is empty.
pub fn render(visible: &[Bookmark], mode: ViewMode, total_count: usize) -> String {
    let body = if visible.is_empty() {
        if total_count > 0 {
            r#"<div class="notice">No bookmarks match your search</div>"#.to_string()
        } else {
            r#"<div class="notice">No bookmarks to display.</div>"#.to_string()
        }
    } else {
        match mode {
            ViewMode::Card => render_cards(visible),
            ViewMode::Table => render_table(visible),
        }
    };
    document("Bookmarks", &body)
}

/// Renders the single error notice shown when a run-level failure replaces
/// the whole presentation surface.
pub fn render_error(message: &str) -> String {
    let body = format!(
        r#"<div class="error-message">Error loading bookmarks: {}</div>"#,
        escape_html(message)
    );
    document("Bookmarks", &body)
}

fn render_cards(bookmarks: &[Bookmark]) -> String {
    let mut cards = String::from(r#"<div class="card-container">"#);
    for bookmark in bookmarks {
        cards.push_str(&format!(
            r#"
<div class="bookmark-card">
  <div class="bookmark-content">
    <h3><a href="{link}" target="_blank" rel="noopener">{title}</a></h3>
    <p class="bookmark-short-description">{short}</p>
    <p class="bookmark-long-description">{long}</p>
    <p class="bookmark-url">{link}</p>
  </div>
  <div class="bookmark-preview">{image}</div>
</div>"#,
            link = escape_html(&bookmark.link),
            title = escape_html(&bookmark.title),
            short = escape_html(&bookmark.short_description),
            long = escape_html(&bookmark.long_description),
            image = preview_image(bookmark),
        ));
    }
    cards.push_str("\n</div>");
    cards
}

fn render_table(bookmarks: &[Bookmark]) -> String {
    let mut rows = String::from(
        r#"<div class="bookmark-header">
  <div class="header-item" data-sort="title">Title</div>
  <div class="header-item" data-sort="description">Description</div>
  <div class="header-item" data-sort="link">Link</div>
  <div class="header-item">Preview</div>
</div>"#,
    );
    for bookmark in bookmarks {
        rows.push_str(&format!(
            r#"
<div class="bookmark-row">
  <div class="bookmark-cell title"><a href="{link}" target="_blank" rel="noopener">{title}</a></div>
  <div class="bookmark-cell description">{short}</div>
  <div class="bookmark-cell link">{domain}</div>
  <div class="bookmark-cell preview">{image}</div>
</div>"#,
            link = escape_html(&bookmark.link),
            title = escape_html(&bookmark.title),
            short = escape_html(&bookmark.short_description),
            domain = escape_html(&bookmark.domain),
            image = preview_image(bookmark),
        ));
    }
    rows
}

/// Preview image element with a render-time fallback: a broken image swaps
/// to the embedded placeholder.
fn preview_image(bookmark: &Bookmark) -> String {
    format!(
        r#"<img src="{src}" alt="{title} Preview" loading="lazy" onerror="this.onerror=null;this.src='{fallback}';">"#,
        src = escape_html(&bookmark.preview),
        title = escape_html(&bookmark.title),
        fallback = FALLBACK_IMAGE,
    )
}

fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>{title}</title><style>
body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0 auto; max-width: 960px; padding: 2em; color: #24292f; }}
.card-container {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 1em; }}
.bookmark-card, .bookmark-row {{ border: 1px solid #d0d7de; border-radius: 6px; padding: 1em; margin-bottom: 0.5em; }}
.bookmark-header {{ font-weight: 600; display: flex; gap: 1em; }}
.bookmark-row, .bookmark-header {{ display: flex; gap: 1em; align-items: center; }}
.bookmark-cell, .header-item {{ flex: 1; }}
.bookmark-preview img, .bookmark-cell.preview img {{ max-width: 96px; max-height: 96px; }}
.notice, .error-message {{ color: #656d76; padding: 2em; text-align: center; }}
</style></head><body>
{body}
</body></html>"#,
        title = escape_html(title),
        body = body,
    )
}
