//! Per-feed extraction knobs.
//!
//! Selectors and markers describing where one feed's DOM keeps each
//! post field. Extraction logic stays generic; supporting another feed
//! means supplying another profile, not new code.

/// DOM shape of one feed's posts.
///
/// Selector lists are ordered by priority: the first selector with a
/// match wins for its field, and later selectors are never merged in.
#[derive(Debug, Clone)]
pub struct FeedProfile {
    /// Candidate author-name sub-nodes.
    pub actor_selectors: Vec<String>,

    /// Actor shown when no name node resolves.
    pub actor_placeholder: String,

    /// Candidate canonical text containers.
    pub text_selectors: Vec<String>,

    /// Images with a declared width or height below this are UI chrome.
    pub min_image_dimension: u32,

    /// Most images kept per post.
    pub max_images: usize,

    /// Alt-text substrings marking an image as a reaction icon.
    pub icon_alt_markers: Vec<String>,

    /// Source-URL substrings marking an image as a reaction icon.
    pub icon_src_markers: Vec<String>,

    /// Href substrings identifying a permalink anchor, tried in order.
    pub permalink_markers: Vec<String>,

    /// Content-identifier pattern searched in data attributes when no
    /// permalink anchor exists.
    pub content_id_pattern: String,

    /// Permalink rebuilt from a matched content id; `{id}` is replaced
    /// with the URL-encoded identifier.
    pub permalink_template: String,
}

impl Default for FeedProfile {
    fn default() -> Self {
        Self {
            actor_selectors: vec![
                ".feed-shared-actor__name".to_string(),
                ".update-components-actor__title span".to_string(),
            ],
            actor_placeholder: "LinkedIn member".to_string(),
            text_selectors: vec![
                ".update-components-text".to_string(),
                ".feed-shared-update-v2__description".to_string(),
                ".feed-shared-inline-show-more-text".to_string(),
            ],
            min_image_dimension: 40,
            max_images: 4,
            icon_alt_markers: vec!["reaction".to_string()],
            icon_src_markers: vec!["reaction".to_string(), "emoji".to_string()],
            permalink_markers: vec![
                "linkedin.com/posts/".to_string(),
                "/feed/update/".to_string(),
                "activity".to_string(),
            ],
            content_id_pattern: r"urn:li:(activity|ugcPost):[0-9]+".to_string(),
            permalink_template: "https://www.linkedin.com/feed/update/{id}/".to_string(),
        }
    }
}
