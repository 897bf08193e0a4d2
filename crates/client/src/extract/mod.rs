//! Structured post extraction from feed markup.
//!
//! Turns one messy, UI-noise-laden post subtree into a `CapturedPost`.
//! Each field runs its own chain of strategies from the profile; every
//! chain is total and degrades to an empty or default value, so a
//! well-formed fragment never makes extraction fail.

pub mod profile;

pub use profile::FeedProfile;

use chrono::Local;
use feedclip_core::record::CapturedPost;
use feedclip_core::text::normalize_whitespace;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Extract a structured record from a post's HTML subtree.
///
/// `base_url` is the page origin used to resolve relative permalinks;
/// without it, relative hrefs are kept as-is.
pub fn extract_post(html: &str, base_url: Option<&Url>, profile: &FeedProfile) -> CapturedPost {
    let fragment = Html::parse_fragment(html);

    CapturedPost {
        actor: extract_actor(&fragment, profile),
        text: extract_text(&fragment, profile),
        images: extract_images(&fragment, profile),
        timestamp: extract_timestamp(&fragment),
        url: extract_url(&fragment, base_url, profile),
        captured_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// First matching name node wins; an unresolvable or empty name becomes
/// the profile placeholder.
fn extract_actor(fragment: &Html, profile: &FeedProfile) -> String {
    for selector in &profile.actor_selectors {
        let Ok(parsed) = Selector::parse(selector) else {
            continue;
        };
        if let Some(element) = fragment.select(&parsed).next() {
            let name = element_text(&element);
            if name.is_empty() {
                break;
            }
            return collapse_doubled(&name);
        }
    }
    profile.actor_placeholder.clone()
}

/// Repair a name rendered twice inside one node ("Jane DoeJane Doe").
///
/// Only exact even-length duplication collapses. Best effort: a name
/// that legitimately repeats itself collapses too, and nothing else
/// distinguishes the two cases.
fn collapse_doubled(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    if !chars.is_empty() && chars.len() % 2 == 0 {
        let (first, second) = chars.split_at(chars.len() / 2);
        if first == second {
            return first.iter().collect();
        }
    }
    name.to_string()
}

/// Exactly one canonical text container; candidates are never merged,
/// so truncated previews don't mix with full text.
fn extract_text(fragment: &Html, profile: &FeedProfile) -> String {
    for selector in &profile.text_selectors {
        let Ok(parsed) = Selector::parse(selector) else {
            continue;
        };
        if let Some(element) = fragment.select(&parsed).next() {
            return element_text(&element);
        }
    }
    String::new()
}

/// Content images in document order, reaction icons and undersized
/// chrome dropped, capped at the profile limit.
fn extract_images(fragment: &Html, profile: &FeedProfile) -> Vec<String> {
    let selector = Selector::parse("img").expect("invalid selector");
    let mut images = Vec::new();

    for element in fragment.select(&selector) {
        if images.len() >= profile.max_images {
            break;
        }
        let src = element.value().attr("src").unwrap_or("").trim();
        if src.is_empty() || is_icon(element, src, profile) {
            continue;
        }
        images.push(src.to_string());
    }

    images
}

fn is_icon(element: ElementRef, src: &str, profile: &FeedProfile) -> bool {
    if undersized(element.value().attr("width"), profile.min_image_dimension)
        || undersized(element.value().attr("height"), profile.min_image_dimension)
    {
        return true;
    }

    if let Some(alt) = element.value().attr("alt") {
        let alt = alt.to_lowercase();
        if profile.icon_alt_markers.iter().any(|marker| alt.contains(marker.as_str())) {
            return true;
        }
    }

    let src = src.to_lowercase();
    profile.icon_src_markers.iter().any(|marker| src.contains(marker.as_str()))
}

/// A declared dimension below the threshold marks UI chrome; a missing
/// or unparseable attribute proves nothing and passes.
fn undersized(attr: Option<&str>, min: u32) -> bool {
    attr.and_then(|value| value.trim().parse::<u32>().ok()).is_some_and(|value| value < min)
}

/// Machine-readable datetime attribute, else the time element's visible
/// text, else the local wall clock.
fn extract_timestamp(fragment: &Html) -> String {
    let selector = Selector::parse("time").expect("invalid selector");
    if let Some(element) = fragment.select(&selector).next() {
        if let Some(datetime) = element.value().attr("datetime") {
            let datetime = datetime.trim();
            if !datetime.is_empty() {
                return datetime.to_string();
            }
        }
        let visible = element_text(&element);
        if !visible.is_empty() {
            return visible;
        }
    }
    Local::now().to_rfc3339()
}

/// Permalink anchor matching the profile markers, markers tried in
/// priority order across all anchors. Falls back to rebuilding the
/// permalink from a content id in a data attribute.
fn extract_url(fragment: &Html, base_url: Option<&Url>, profile: &FeedProfile) -> String {
    let anchors = Selector::parse("a[href]").expect("invalid selector");

    for marker in &profile.permalink_markers {
        for element in fragment.select(&anchors) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            if href.contains(marker.as_str()) {
                return resolve_href(href, base_url);
            }
        }
    }

    content_id_url(fragment, profile).unwrap_or_default()
}

fn resolve_href(href: &str, base_url: Option<&Url>) -> String {
    match base_url {
        Some(base) => base.join(href).map(|url| url.to_string()).unwrap_or_else(|_| href.to_string()),
        None => href.to_string(),
    }
}

fn content_id_url(fragment: &Html, profile: &FeedProfile) -> Option<String> {
    let pattern = Regex::new(&profile.content_id_pattern).ok()?;
    let selector = Selector::parse("[data-urn], [data-id]").expect("invalid selector");

    for element in fragment.select(&selector) {
        for attr in ["data-urn", "data-id"] {
            let Some(value) = element.value().attr(attr) else {
                continue;
            };
            if let Some(found) = pattern.find(value) {
                let encoded = found.as_str().replace(':', "%3A");
                return Some(profile.permalink_template.replace("{id}", &encoded));
            }
        }
    }

    None
}

fn element_text(element: &ElementRef) -> String {
    normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}
